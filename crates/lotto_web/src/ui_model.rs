//! UI text and page settings that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test them
//! on the host.

use lotto_gate::config::{ApiBase, ClientConfig, FlowConfig};
use lotto_gate::error::NoticeLevel;
use lotto_gate::flow::TriggerState;

/// `<body>` attribute that switches the watch gate off when set to a false value.
pub const WATCH_GATE_ATTR: &str = "data-watch-gate";

/// Fallback focus target when a modal closes.
pub const PREDICT_BUTTON_ID: &str = "predict-btn";
/// Element the embedded player replaces.
pub const PLAYER_ELEMENT_ID: &str = "yt-player";
/// Element whose children are made inert while a modal is open.
pub const CONTAINER_SELECTOR: &str = ".container";
/// Results container, focused when the predict button cannot be.
pub const RESULTS_SECTION_ID: &str = "prediction-section";
/// YouTube IFrame API loader.
pub const YT_IFRAME_API_SRC: &str = "https://www.youtube.com/iframe_api";

pub const GATE_TITLE: &str = "Stretch for a minute first";
pub const GATE_HINT: &str = "Watch the video for a minute and your numbers unlock.";
pub const DONE_LABEL: &str = "Get my numbers";
pub const FEEDBACK_TITLE: &str = "Send feedback";
pub const FEEDBACK_PLACEHOLDER: &str = "Tell us what you think";

/// Selectors tried in order when focusing into an open modal.
pub const FOCUSABLE_SELECTORS: &[&str] = &[
    "button:not([disabled])",
    "a[href]",
    "input:not([disabled])",
    "select:not([disabled])",
    "textarea:not([disabled])",
    "[tabindex]:not([tabindex=\"-1\"])",
];

pub fn focusable_query() -> String {
    FOCUSABLE_SELECTORS.join(",")
}

/// Matches a loader script that is already on the page.
pub fn sdk_script_selector() -> String {
    format!("script[src=\"{YT_IFRAME_API_SRC}\"]")
}

/// The ready callback fires once per page, possibly before the app starts,
/// so a defined `YT.Player` is what counts.
pub fn embedded_player_usable(player_ctor_defined: bool, container_present: bool) -> bool {
    player_ctor_defined && container_present
}

pub fn trigger_label(state: TriggerState) -> &'static str {
    match state {
        TriggerState::Ready => "Predict lucky numbers",
        TriggerState::InFlight => "Calculating...",
        TriggerState::Spent => "Come back next session",
    }
}

pub fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Warning => "notice notice-warning",
        NoticeLevel::Error => "notice notice-error",
    }
}

/// Missing or unrecognised values keep the gate on.
pub fn watch_gate_enabled(attr: Option<&str>) -> bool {
    match attr.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) => !matches!(v.as_str(), "false" | "0" | "off" | "no"),
        None => true,
    }
}

/// Page configuration derived from the host name and the body attribute.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub client: ClientConfig,
    pub flow: FlowConfig,
}

impl PageConfig {
    pub fn from_page(hostname: &str, watch_gate_attr: Option<&str>) -> Self {
        let require_watch_gate = watch_gate_enabled(watch_gate_attr);
        Self {
            client: ClientConfig::new(ApiBase::for_hostname(hostname)),
            flow: FlowConfig {
                require_watch_gate,
                // The open variant shows the extra detail the gated one hides.
                show_details: !require_watch_gate,
                ..FlowConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_gate::config::{DEPLOYED_API_BASE, LOCAL_API_BASE};

    #[test]
    fn watch_gate_attribute() {
        assert!(watch_gate_enabled(None));
        assert!(watch_gate_enabled(Some("true")));
        assert!(watch_gate_enabled(Some("")));
        assert!(!watch_gate_enabled(Some("false")));
        assert!(!watch_gate_enabled(Some(" OFF ")));
        assert!(!watch_gate_enabled(Some("0")));
    }

    #[test]
    fn page_config_follows_host() {
        let local = PageConfig::from_page("127.0.0.1", None);
        assert_eq!(local.client.base.as_str(), LOCAL_API_BASE);
        assert!(local.flow.require_watch_gate);
        assert!(!local.flow.show_details);

        let deployed = PageConfig::from_page("lotto.example.com", Some("false"));
        assert_eq!(deployed.client.base.as_str(), DEPLOYED_API_BASE);
        assert!(!deployed.flow.require_watch_gate);
        assert!(deployed.flow.show_details);
    }

    #[test]
    fn trigger_labels_are_distinct() {
        let mut labels: Vec<&str> = [TriggerState::Ready, TriggerState::InFlight, TriggerState::Spent]
            .into_iter()
            .map(trigger_label)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn sdk_loader_targets_iframe_api() {
        assert!(YT_IFRAME_API_SRC.starts_with("https://"));
        assert!(YT_IFRAME_API_SRC.ends_with("/iframe_api"));
        assert_eq!(
            sdk_script_selector(),
            "script[src=\"https://www.youtube.com/iframe_api\"]"
        );
    }

    #[test]
    fn player_usable_once_constructor_exists() {
        assert!(embedded_player_usable(true, true));
        assert!(!embedded_player_usable(false, true));
        assert!(!embedded_player_usable(true, false));
    }

    #[test]
    fn focus_query_starts_with_buttons() {
        let q = focusable_query();
        assert!(q.starts_with("button:not([disabled]),a[href]"));
        assert_eq!(q.matches(',').count(), FOCUSABLE_SELECTORS.len() - 1);
    }
}
