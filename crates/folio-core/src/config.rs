#![forbid(unsafe_code)]

//! Page tunables.
//!
//! Every field has a default matching the shipped page, so an empty JSON
//! object (or no config at all) reproduces stock behavior.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::filter::FilterMatch;
use crate::notification::ToastTimings;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub nav: NavConfig,
    pub toast: ToastTimings,
    pub reveal: RevealConfig,
    pub filter: FilterConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Added to the scroll offset before testing section extents.
    pub scroll_lookahead_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_lookahead_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Visible fraction at which a section is revealed.
    pub threshold: f64,
    /// Bottom root margin in pixels; negative shrinks the viewport.
    pub root_margin_bottom_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom_px: -50.0,
        }
    }
}

impl RevealConfig {
    /// CSS `rootMargin` string for `IntersectionObserver`.
    #[must_use]
    pub fn root_margin_css(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom_px)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(rename = "match")]
    pub match_mode: FilterMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub success_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            success_message: "Message sent successfully! I'll get back to you soon.".to_owned(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make scheduling or geometry meaningless.
    pub fn validate(&self) -> Result<()> {
        finite("nav.scroll_lookahead_px", self.nav.scroll_lookahead_px)?;
        non_negative("toast.reveal_delay_ms", self.toast.reveal_delay_ms)?;
        non_negative("toast.display_ms", self.toast.display_ms)?;
        non_negative("toast.hide_transition_ms", self.toast.hide_transition_ms)?;
        if self.toast.display_ms < self.toast.reveal_delay_ms {
            return Err(FolioError::InvalidConfig {
                field: "toast.display_ms",
                reason: format!(
                    "{} is shorter than reveal_delay_ms {}",
                    self.toast.display_ms, self.toast.reveal_delay_ms
                ),
            });
        }
        finite("reveal.threshold", self.reveal.threshold)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(FolioError::InvalidConfig {
                field: "reveal.threshold",
                reason: format!("{} not within [0, 1]", self.reveal.threshold),
            });
        }
        finite(
            "reveal.root_margin_bottom_px",
            self.reveal.root_margin_bottom_px,
        )?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FolioError::InvalidConfig {
            field,
            reason: format!("{value} is not finite"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(FolioError::InvalidConfig {
            field,
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}
