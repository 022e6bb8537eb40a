#![forbid(unsafe_code)]

//! Scroll-driven nav highlighting and the mobile menu toggle.

use serde::Serialize;
use tracing::debug;

use crate::dom::{DomPatch, DomTarget, PatchBuffer, names};
use crate::error::{FolioError, Result};

/// Vertical extent of one `section[id]`, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionExtent {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionExtent {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment: `top <= pos < top + height`.
    #[must_use]
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.top && pos < self.top + self.height
    }
}

/// Section whose extent contains `scroll_y + lookahead`.
///
/// Sections are scanned in document order and the last match wins.
#[must_use]
pub fn active_section(scroll_y: f64, lookahead: f64, sections: &[SectionExtent]) -> Option<&str> {
    let pos = scroll_y + lookahead;
    sections
        .iter()
        .rev()
        .find(|s| s.contains(pos))
        .map(|s| s.id.as_str())
}

/// Which nav elements the page actually has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavBindings {
    pub has_menu: bool,
    pub has_container: bool,
    /// `href` attribute of each `.nav-link`, in document order.
    pub link_hrefs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    bindings: NavBindings,
    lookahead: f64,
    active_link: Option<usize>,
    menu_open: bool,
    toggle_mounted: bool,
}

impl NavigationController {
    #[must_use]
    pub fn new(bindings: NavBindings, lookahead: f64) -> Self {
        Self {
            bindings,
            lookahead,
            active_link: None,
            menu_open: false,
            toggle_mounted: false,
        }
    }

    /// Mount the mobile toggle. The toggle only exists when there is a
    /// container to append it to.
    pub fn init(&mut self, out: &mut PatchBuffer) {
        if self.bindings.has_container {
            out.push(DomPatch::MountMobileToggle);
            self.toggle_mounted = true;
        }
        debug!(
            target: "folio.nav",
            links = self.bindings.link_hrefs.len(),
            toggle = self.toggle_mounted,
            "navigation bound"
        );
    }

    #[must_use]
    pub fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Recompute the highlighted link from live geometry.
    ///
    /// Returns the matched section id. When nothing matches, link classes are
    /// left as they were.
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        sections: &[SectionExtent],
        out: &mut PatchBuffer,
    ) -> Option<String> {
        if self.bindings.link_hrefs.is_empty() {
            return None;
        }
        let section = active_section(scroll_y, self.lookahead, sections)?.to_owned();
        let fragment = format!("#{section}");

        let mut matched = None;
        for (i, href) in self.bindings.link_hrefs.iter().enumerate() {
            let on = *href == fragment;
            if on && matched.is_none() {
                matched = Some(i);
            }
            out.push(DomPatch::set_class(DomTarget::NavLink(i), names::ACTIVE, on));
        }
        if matched != self.active_link {
            debug!(target: "folio.nav", section = %section, link = ?matched, "active link changed");
        }
        self.active_link = matched;
        Some(section)
    }

    /// Flip the mobile menu open/closed.
    pub fn toggle_menu(&mut self, out: &mut PatchBuffer) {
        if !self.toggle_mounted {
            return;
        }
        self.menu_open = !self.menu_open;
        self.push_menu_state(out);
    }

    /// A nav link was clicked: always close the mobile menu.
    pub fn on_link_click(&mut self, index: usize, out: &mut PatchBuffer) -> Result<()> {
        let len = self.bindings.link_hrefs.len();
        if index >= len {
            return Err(FolioError::UnknownNavLink { index, len });
        }
        self.menu_open = false;
        self.push_menu_state(out);
        Ok(())
    }

    fn push_menu_state(&self, out: &mut PatchBuffer) {
        if self.bindings.has_menu {
            out.push(DomPatch::set_class(
                DomTarget::NavMenu,
                names::ACTIVE,
                self.menu_open,
            ));
        }
        if self.toggle_mounted {
            out.push(DomPatch::set_class(
                DomTarget::MobileToggle,
                names::ACTIVE,
                self.menu_open,
            ));
        }
    }
}
