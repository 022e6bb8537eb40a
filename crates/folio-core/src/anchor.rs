#![forbid(unsafe_code)]

//! In-page anchor links and the CTA button: smooth scrolling instead of
//! fragment navigation.

use tracing::trace;

use crate::dom::{DomPatch, DomTarget, PatchBuffer, names};

/// An `href` beginning with `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorHref<'a> {
    raw: &'a str,
}

impl<'a> AnchorHref<'a> {
    /// `None` for hrefs that do not start with `#`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        raw.starts_with('#').then_some(Self { raw })
    }

    /// Target element id. A bare `#` names nothing. The fragment is looked
    /// up as a literal id, not parsed as a CSS selector.
    #[must_use]
    pub fn target_id(&self) -> Option<&'a str> {
        let id = &self.raw[1..];
        (!id.is_empty()).then_some(id)
    }
}

/// What the host does with an anchor click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorOutcome {
    /// Always true for in-page anchors, even when nothing scrolls.
    pub prevent_default: bool,
    pub scrolled_to: Option<String>,
}

fn scroll_to(id: &str, out: &mut PatchBuffer) {
    out.push(DomPatch::ScrollIntoView {
        target: DomTarget::ById(id.to_owned()),
        smooth: true,
        align_start: true,
    });
}

/// Handle a click on an in-page anchor. `exists` answers whether an element
/// with the given id is on the page.
pub fn on_anchor_click(
    href: &str,
    exists: impl Fn(&str) -> bool,
    out: &mut PatchBuffer,
) -> Option<AnchorOutcome> {
    let anchor = AnchorHref::parse(href)?;
    let scrolled_to = anchor
        .target_id()
        .filter(|id| exists(*id))
        .map(|id| {
            scroll_to(id, out);
            id.to_owned()
        });
    trace!(target: "folio.anchor", href, scrolled = scrolled_to.is_some(), "anchor click");
    Some(AnchorOutcome {
        prevent_default: true,
        scrolled_to,
    })
}

/// CTA click: bring the projects section into view if there is one.
pub fn on_cta_click(has_projects_section: bool, out: &mut PatchBuffer) -> bool {
    if has_projects_section {
        scroll_to(names::PROJECTS_SECTION_ID, out);
    }
    has_projects_section
}
