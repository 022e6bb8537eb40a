#![forbid(unsafe_code)]

//! One-shot fade-in for sections entering the viewport.

use tracing::trace;

use crate::config::RevealConfig;
use crate::dom::{DomPatch, DomTarget, PatchBuffer, names};

/// Fraction of a section's height inside `[0, viewport_height + bottom_margin)`.
///
/// `top` is relative to the viewport top.
#[must_use]
pub fn visible_ratio(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let root_bottom = viewport_height + bottom_margin;
    let visible = (top + height).min(root_bottom) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    bottom_margin: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    #[must_use]
    pub fn new(section_count: usize, config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            bottom_margin: config.root_margin_bottom_px,
            revealed: vec![false; section_count],
        }
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Observer callback for section `index`. The class is added the first
    /// time the section intersects and never removed.
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool, out: &mut PatchBuffer) -> bool {
        if !is_intersecting {
            return false;
        }
        let Some(slot) = self.revealed.get_mut(index) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
        out.push(DomPatch::add_class(DomTarget::Section(index), names::FADE_IN));
        trace!(target: "folio.reveal", section = index, "section revealed");
        true
    }

    /// Geometry fallback for hosts without an intersection observer.
    pub fn on_geometry(
        &mut self,
        index: usize,
        top: f64,
        height: f64,
        viewport_height: f64,
        out: &mut PatchBuffer,
    ) -> bool {
        let ratio = visible_ratio(top, height, viewport_height, self.bottom_margin);
        self.on_intersection(index, ratio > 0.0 && ratio >= self.threshold, out)
    }
}
