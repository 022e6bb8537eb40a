#![forbid(unsafe_code)]

//! Host-facing patch vocabulary.
//!
//! The core never touches live DOM nodes. Every controller appends
//! [`DomPatch`] commands to a shared [`PatchBuffer`]; the host drains the
//! buffer after each event and applies the commands in order.

use serde::Serialize;

use crate::notification::{ToastId, ToastKind};

/// Selectors and class names the page markup is expected to carry.
pub mod names {
    pub const NAV_MENU: &str = ".nav-menu";
    pub const NAV_LINK: &str = ".nav-link";
    pub const NAV_CONTAINER: &str = ".nav-container";
    pub const PROJECT_GRID_ID: &str = "projectGrid";
    pub const CONTACT_FORM_ID: &str = "contactForm";
    pub const CTA_BUTTON_ID: &str = "ctaButton";
    pub const PROJECTS_SECTION_ID: &str = "projects";
    pub const SECTION_WITH_ID: &str = "section[id]";
    pub const SECTION: &str = "section";
    pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";
    pub const PROJECT_CARD: &str = ".project-card";

    pub const ACTIVE: &str = "active";
    pub const HOVER: &str = "hover";
    pub const FADE_IN: &str = "fade-in";
    pub const SHOW: &str = "show";
    pub const FILTER_BUTTON: &str = "filter-btn";
    pub const FILTER_CONTAINER: &str = "project-filters";
    pub const MOBILE_TOGGLE: &str = "mobile-toggle";
    pub const MOBILE_TOGGLE_GLYPH: &str = "\u{2630}";
    pub const NOTIFICATION: &str = "notification";
}

/// An element the core can address. Indices refer to host-provided order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum DomTarget {
    NavMenu,
    MobileToggle,
    NavLink(usize),
    FilterButton(usize),
    ProjectCard(usize),
    ProjectGrid,
    /// Element looked up by `id`.
    ById(String),
    /// Nth `<section>` element in document order.
    Section(usize),
    Toast(ToastId),
}

/// Label and key for one filter button, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButtonSpec {
    pub label: String,
    pub active: bool,
}

/// One imperative DOM update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    AddClass {
        target: DomTarget,
        class: &'static str,
    },
    RemoveClass {
        target: DomTarget,
        class: &'static str,
    },
    /// `display: block` when visible, `display: none` otherwise.
    SetVisible { target: DomTarget, visible: bool },
    SetInnerHtml { target: DomTarget, html: String },
    /// Create the mobile toggle button and append it to the nav container.
    MountMobileToggle,
    /// Create the filter bar and insert it before the project grid.
    MountFilterBar { buttons: Vec<FilterButtonSpec> },
    ScrollIntoView {
        target: DomTarget,
        smooth: bool,
        align_start: bool,
    },
    AppendToast {
        id: ToastId,
        text: String,
        kind: ToastKind,
    },
    RemoveToast { id: ToastId },
    ResetForm,
}

impl DomPatch {
    #[must_use]
    pub fn add_class(target: DomTarget, class: &'static str) -> Self {
        Self::AddClass { target, class }
    }

    #[must_use]
    pub fn remove_class(target: DomTarget, class: &'static str) -> Self {
        Self::RemoveClass { target, class }
    }

    /// Toggle helper: `AddClass` when `on`, `RemoveClass` otherwise.
    #[must_use]
    pub fn set_class(target: DomTarget, class: &'static str, on: bool) -> Self {
        if on {
            Self::add_class(target, class)
        } else {
            Self::remove_class(target, class)
        }
    }
}

/// Ordered queue of patches awaiting the host.
#[derive(Debug, Default, Clone)]
pub struct PatchBuffer {
    patches: Vec<DomPatch>,
}

impl PatchBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            patches: Vec::new(),
        }
    }

    pub fn push(&mut self, patch: DomPatch) {
        self.patches.push(patch);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Drain every pending patch.
    pub fn take(&mut self) -> Vec<DomPatch> {
        std::mem::take(&mut self.patches)
    }
}
