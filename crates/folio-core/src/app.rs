#![forbid(unsafe_code)]

//! Composition root.
//!
//! [`PortfolioCore`] owns the navigation and showcase controllers, the
//! reveal tracker and the toast stack. The host constructs exactly one per
//! page, forwards DOM events into it, and drains [`DomPatch`]es after each
//! call. No JS types and no statics live here.

use core::time::Duration;

use serde::Serialize;
use tracing::{info, trace, warn};

use crate::anchor::{AnchorOutcome, on_anchor_click};
use crate::config::FolioConfig;
use crate::contact::{ContactReceipt, ContactSubmission};
use crate::dom::{DomPatch, PatchBuffer};
use crate::error::{FolioError, Result};
use crate::navigation::{NavBindings, NavigationController, SectionExtent};
use crate::notification::{ToastId, ToastKind, ToastSnapshot, ToastStack, ms_to_duration};
use crate::project::ProjectCatalog;
use crate::reveal::RevealTracker;
use crate::showcase::{ShowcaseBindings, ShowcaseController};

/// Everything the host discovered about the page before `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBindings {
    pub nav: NavBindings,
    pub showcase: ShowcaseBindings,
    /// Number of `<section>` elements observed for the fade-in reveal.
    pub section_count: usize,
}

/// Serializable view of the observable page state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    pub initialized: bool,
    pub now_ms: f64,
    pub active_nav_link: Option<usize>,
    pub mobile_menu_open: bool,
    pub active_filter: usize,
    pub active_filter_label: String,
    pub visible_cards: Vec<bool>,
    pub revealed_sections: usize,
    pub contact_submissions: u64,
    pub toasts: Vec<ToastSnapshot>,
}

#[derive(Debug, Clone)]
pub struct PortfolioCore {
    config: FolioConfig,
    nav: NavigationController,
    showcase: ShowcaseController,
    reveal: RevealTracker,
    toasts: ToastStack,
    patches: PatchBuffer,
    initialized: bool,
}

impl PortfolioCore {
    #[must_use]
    pub fn new(config: FolioConfig, page: PageBindings) -> Self {
        Self::with_catalog(config, page, ProjectCatalog::default())
    }

    #[must_use]
    pub fn with_catalog(config: FolioConfig, page: PageBindings, catalog: ProjectCatalog) -> Self {
        Self {
            nav: NavigationController::new(page.nav, config.nav.scroll_lookahead_px),
            showcase: ShowcaseController::new(catalog, page.showcase, &config),
            reveal: RevealTracker::new(page.section_count, &config.reveal),
            toasts: ToastStack::new(&config.toast),
            patches: PatchBuffer::new(),
            initialized: false,
            config,
        }
    }

    /// Initialize navigation, then the showcase. Call once per page load;
    /// later calls are ignored.
    pub fn init(&mut self) {
        if self.initialized {
            warn!(target: "folio.app", "init called twice; ignoring");
            return;
        }
        self.nav.init(&mut self.patches);
        self.showcase.init(&mut self.patches);
        self.initialized = true;
        info!(
            target: "folio.app",
            projects = self.showcase.catalog().len(),
            patches = self.patches.len(),
            "portfolio initialized"
        );
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    #[must_use]
    pub fn showcase(&self) -> &ShowcaseController {
        &self.showcase
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    fn ensure_init(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(FolioError::NotInitialized)
        }
    }

    /// Drain patches produced since the last call.
    pub fn take_patches(&mut self) -> Vec<DomPatch> {
        self.patches.take()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionExtent]) -> Option<String> {
        if !self.initialized || !scroll_y.is_finite() {
            return None;
        }
        self.nav.on_scroll(scroll_y, sections, &mut self.patches)
    }

    pub fn toggle_mobile_menu(&mut self) -> Result<bool> {
        self.ensure_init()?;
        self.nav.toggle_menu(&mut self.patches);
        Ok(self.nav.menu_open())
    }

    pub fn click_nav_link(&mut self, index: usize) -> Result<()> {
        self.ensure_init()?;
        self.nav.on_link_click(index, &mut self.patches)
    }

    // ---------------------------------------------------------------------
    // Showcase
    // ---------------------------------------------------------------------

    pub fn hover_card(&mut self, index: usize, entered: bool) -> Result<()> {
        self.ensure_init()?;
        self.showcase.on_card_hover(index, entered, &mut self.patches)
    }

    pub fn select_filter(&mut self, index: usize) -> Result<()> {
        self.ensure_init()?;
        self.showcase.select_filter(index, &mut self.patches)
    }

    pub fn submit_contact(&mut self, submission: &ContactSubmission) -> Result<Option<ContactReceipt>> {
        self.ensure_init()?;
        Ok(self
            .showcase
            .submit_contact(submission, &mut self.toasts, &mut self.patches))
    }

    pub fn click_cta(&mut self) -> Result<bool> {
        self.ensure_init()?;
        Ok(self.showcase.click_cta(&mut self.patches))
    }

    // ---------------------------------------------------------------------
    // Page-wide behavior
    // ---------------------------------------------------------------------

    /// In-page anchor click. `None` when `href` is not an in-page anchor.
    pub fn click_anchor(&mut self, href: &str, exists: impl Fn(&str) -> bool) -> Option<AnchorOutcome> {
        on_anchor_click(href, exists, &mut self.patches)
    }

    pub fn section_intersecting(&mut self, index: usize, is_intersecting: bool) -> bool {
        self.reveal
            .on_intersection(index, is_intersecting, &mut self.patches)
    }

    pub fn section_geometry(&mut self, index: usize, top: f64, height: f64, viewport_height: f64) -> bool {
        self.reveal
            .on_geometry(index, top, height, viewport_height, &mut self.patches)
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Set the toast clock to `now_ms` since mount.
    pub fn set_time_ms(&mut self, now_ms: f64) {
        self.toasts.advance_to(ms_to_duration(now_ms), &mut self.patches);
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        duration_ms(self.toasts.now())
    }

    /// Absolute time of the next toast transition, if any.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.toasts.next_deadline().map(duration_ms)
    }

    /// Show a toast outside the contact flow.
    pub fn notify(&mut self, text: impl Into<String>, kind: ToastKind) -> ToastId {
        self.toasts.push(text, kind, &mut self.patches)
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        let filters = self.showcase.filters();
        PortfolioSnapshot {
            initialized: self.initialized,
            now_ms: self.now_ms(),
            active_nav_link: self.nav.active_link(),
            mobile_menu_open: self.nav.menu_open(),
            active_filter: filters.active(),
            active_filter_label: filters.buttons()[filters.active()].label.clone(),
            visible_cards: self.showcase.visible_cards().to_vec(),
            revealed_sections: self.reveal.revealed_count(),
            contact_submissions: self.showcase.contact().submissions(),
            toasts: self.toasts.snapshot(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        let json = serde_json::to_string(&self.snapshot())?;
        trace!(target: "folio.app", bytes = json.len(), "snapshot serialized");
        Ok(json)
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
