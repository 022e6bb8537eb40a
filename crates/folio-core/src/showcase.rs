#![forbid(unsafe_code)]

//! Project grid, filter bar, contact form and CTA.

use tracing::debug;

use crate::anchor::on_cta_click;
use crate::config::FolioConfig;
use crate::contact::{ContactController, ContactReceipt, ContactSubmission};
use crate::dom::{DomPatch, DomTarget, PatchBuffer, names};
use crate::error::{FolioError, Result};
use crate::filter::FilterBar;
use crate::notification::ToastStack;
use crate::project::{ProjectCatalog, render_project_grid};

/// Which showcase elements the page actually has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowcaseBindings {
    pub has_grid: bool,
    pub has_contact_form: bool,
    pub has_cta: bool,
    pub has_projects_section: bool,
}

#[derive(Debug, Clone)]
pub struct ShowcaseController {
    catalog: ProjectCatalog,
    /// Per-card technology keys, as stored on the rendered cards.
    card_keys: Vec<String>,
    visible: Vec<bool>,
    hovered: Vec<bool>,
    filters: FilterBar,
    filters_mounted: bool,
    contact: ContactController,
    bindings: ShowcaseBindings,
}

impl ShowcaseController {
    #[must_use]
    pub fn new(catalog: ProjectCatalog, bindings: ShowcaseBindings, config: &FolioConfig) -> Self {
        let filters = FilterBar::from_catalog(&catalog, config.filter.match_mode);
        let contact = ContactController::new(
            bindings.has_contact_form,
            config.contact.success_message.clone(),
        );
        Self {
            catalog,
            card_keys: Vec::new(),
            visible: Vec::new(),
            hovered: Vec::new(),
            filters,
            filters_mounted: false,
            contact,
            bindings,
        }
    }

    /// Render cards, then mount the filter bar.
    pub fn init(&mut self, out: &mut PatchBuffer) {
        self.render(out);
        if self.bindings.has_projects_section {
            out.push(DomPatch::MountFilterBar {
                buttons: self.filters.specs(),
            });
            self.filters_mounted = true;
        }
        debug!(
            target: "folio.showcase",
            cards = self.card_keys.len(),
            filters = self.filters.buttons().len(),
            filter_bar = self.filters_mounted,
            contact = self.contact.is_bound(),
            cta = self.bindings.has_cta,
            "showcase bound"
        );
    }

    fn render(&mut self, out: &mut PatchBuffer) {
        if !self.bindings.has_grid {
            return;
        }
        out.push(DomPatch::SetInnerHtml {
            target: DomTarget::ProjectGrid,
            html: render_project_grid(self.catalog.projects()),
        });
        self.card_keys = self
            .catalog
            .projects()
            .iter()
            .map(|p| p.technology_key())
            .collect();
        self.visible = vec![true; self.card_keys.len()];
        self.hovered = vec![false; self.card_keys.len()];
    }

    #[must_use]
    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    /// Rendered card count; zero when there is no grid.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_keys.len()
    }

    #[must_use]
    pub fn visible_cards(&self) -> &[bool] {
        &self.visible
    }

    #[must_use]
    pub fn contact(&self) -> &ContactController {
        &self.contact
    }

    /// Cosmetic hover class on enter/leave.
    pub fn on_card_hover(&mut self, index: usize, entered: bool, out: &mut PatchBuffer) -> Result<()> {
        let len = self.hovered.len();
        let slot = self
            .hovered
            .get_mut(index)
            .ok_or(FolioError::UnknownCard { index, len })?;
        *slot = entered;
        out.push(DomPatch::set_class(
            DomTarget::ProjectCard(index),
            names::HOVER,
            entered,
        ));
        Ok(())
    }

    /// Activate filter button `index` and show/hide cards accordingly.
    pub fn select_filter(&mut self, index: usize, out: &mut PatchBuffer) -> Result<()> {
        let visible = self
            .filters
            .select(index, self.card_keys.iter().map(String::as_str))?;

        for i in 0..self.filters.buttons().len() {
            out.push(DomPatch::remove_class(DomTarget::FilterButton(i), names::ACTIVE));
        }
        out.push(DomPatch::add_class(DomTarget::FilterButton(index), names::ACTIVE));

        for (i, shown) in visible.iter().copied().enumerate() {
            let card = DomTarget::ProjectCard(i);
            out.push(DomPatch::SetVisible {
                target: card.clone(),
                visible: shown,
            });
            out.push(DomPatch::set_class(card, names::FADE_IN, shown));
        }
        debug!(
            target: "folio.showcase",
            filter = ?self.filters.active_filter(),
            shown = visible.iter().filter(|v| **v).count(),
            "filter applied"
        );
        self.visible = visible;
        Ok(())
    }

    pub fn submit_contact(
        &mut self,
        submission: &ContactSubmission,
        toasts: &mut ToastStack,
        out: &mut PatchBuffer,
    ) -> Option<ContactReceipt> {
        self.contact.submit(submission, toasts, out)
    }

    pub fn click_cta(&self, out: &mut PatchBuffer) -> bool {
        if !self.bindings.has_cta {
            return false;
        }
        on_cta_click(self.bindings.has_projects_section, out)
    }
}
