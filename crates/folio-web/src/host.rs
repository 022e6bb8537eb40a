#![forbid(unsafe_code)]

//! Small host-side helpers shared by the wasm bindings and native tests.

use folio_core::dom::names;
use folio_core::{FolioConfig, ToastKind};
use tracing::warn;

/// Parse the optional JSON config handed over by the page. A missing or
/// blank blob gives defaults; an invalid one is logged and also falls back
/// to defaults so the page still works.
#[must_use]
pub fn load_config(json: Option<&str>) -> FolioConfig {
    let Some(json) = json.map(str::trim).filter(|j| !j.is_empty()) else {
        return FolioConfig::default();
    };
    match FolioConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            warn!(target: "folio.web", error = %err, "rejected page config; using defaults");
            FolioConfig::default()
        }
    }
}

/// `class` attribute for a freshly appended toast.
#[must_use]
pub fn toast_class(kind: ToastKind) -> String {
    format!("{} {}", names::NOTIFICATION, kind.class())
}

/// Inline `display` value for a filtered card.
#[must_use]
pub const fn display_value(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// `class` attribute for a filter button.
#[must_use]
pub fn filter_button_class(active: bool) -> String {
    if active {
        format!("{} {}", names::FILTER_BUTTON, names::ACTIVE)
    } else {
        names::FILTER_BUTTON.to_owned()
    }
}

/// Delay until `deadline_ms`, clamped to a non-negative whole millisecond
/// count that `setTimeout` accepts.
#[must_use]
pub fn timer_delay_ms(deadline_ms: f64, now_ms: f64) -> i32 {
    let delay = (deadline_ms - now_ms).ceil();
    if !delay.is_finite() || delay <= 0.0 {
        0
    } else {
        delay.min(f64::from(i32::MAX)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::filter::FilterMatch;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_or_missing_config_is_default() {
        assert_eq!(load_config(None), FolioConfig::default());
        assert_eq!(load_config(Some("  ")), FolioConfig::default());
    }

    #[test]
    fn valid_config_is_applied() {
        let config = load_config(Some(r#"{"filter":{"match":"exact_tag"}}"#));
        assert_eq!(config.filter.match_mode, FilterMatch::ExactTag);
    }

    #[test]
    fn invalid_config_falls_back() {
        assert_eq!(load_config(Some("{not json")), FolioConfig::default());
        assert_eq!(
            load_config(Some(r#"{"reveal":{"threshold":-1}}"#)),
            FolioConfig::default()
        );
    }

    #[test]
    fn class_helpers() {
        assert_eq!(toast_class(ToastKind::Success), "notification success");
        assert_eq!(toast_class(ToastKind::Error), "notification error");
        assert_eq!(filter_button_class(true), "filter-btn active");
        assert_eq!(filter_button_class(false), "filter-btn");
        assert_eq!(display_value(false), "none");
    }

    #[test]
    fn timer_delay_rounds_up_and_clamps() {
        assert_eq!(timer_delay_ms(100.0, 0.0), 100);
        assert_eq!(timer_delay_ms(100.0, 99.2), 1);
        assert_eq!(timer_delay_ms(100.0, 250.0), 0);
        assert_eq!(timer_delay_ms(f64::NAN, 0.0), 0);
    }
}
