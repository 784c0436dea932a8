//! Trigger → gate → predict flow, and the feedback form.
//!
//! The flow never talks to the network itself. Front-ends ask it what to do,
//! run the request, and hand the result back through [`PredictFlow::finish`],
//! which is the single place loading and trigger state are restored.

use crate::api::{PredictionRequest, PredictionResponse};
use crate::config::FlowConfig;
use crate::error::{ClientError, Notice};

/// Trigger control state. `Spent` is the client-side one-prediction-per-session
/// rule; nothing on the server enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Ready,
    InFlight,
    Spent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// Trigger or done action was not available.
    Ignored,
    OpenGate,
    /// Issue this request now (after closing the gate, if it is open).
    Predict(PredictionRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Rendered(PredictionResponse),
    Failed(Notice),
}

#[derive(Debug, Clone)]
pub struct PredictFlow {
    config: FlowConfig,
    trigger: TriggerState,
    loading: bool,
}

impl PredictFlow {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            trigger: TriggerState::Ready,
            loading: false,
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn trigger(&self) -> TriggerState {
        self.trigger
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger == TriggerState::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn on_trigger(&mut self) -> FlowAction {
        if !self.trigger_enabled() {
            return FlowAction::Ignored;
        }
        if self.config.require_watch_gate {
            FlowAction::OpenGate
        } else {
            self.begin_request()
        }
    }

    /// Done button in the gate modal. A locked gate makes this a no-op.
    pub fn on_done(&mut self, unlocked: bool) -> FlowAction {
        if !unlocked || !self.trigger_enabled() {
            return FlowAction::Ignored;
        }
        self.begin_request()
    }

    fn begin_request(&mut self) -> FlowAction {
        self.trigger = TriggerState::InFlight;
        self.loading = true;
        FlowAction::Predict(self.config.request())
    }

    /// Clears loading on every path. Success spends the trigger; any failure
    /// re-enables it.
    pub fn finish(&mut self, result: Result<PredictionResponse, ClientError>) -> FlowOutcome {
        self.loading = false;
        match result {
            Ok(resp) => {
                self.trigger = TriggerState::Spent;
                FlowOutcome::Rendered(resp)
            }
            Err(e) => {
                self.trigger = TriggerState::Ready;
                FlowOutcome::Failed(e.predict_notice())
            }
        }
    }
}

impl Default for PredictFlow {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}

pub const FEEDBACK_THANKS: &str = "Your feedback was received. Thank you!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackResult {
    pub notice: Notice,
    /// Only a confirmed success closes the feedback modal.
    pub close_modal: bool,
}

/// Draft text of the feedback modal. Cleared each time the modal opens.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    draft: String,
    sending: bool,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.sending = false;
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Message to send, or `None` while a send is pending.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.sending {
            return None;
        }
        self.sending = true;
        Some(self.draft.clone())
    }

    pub fn finish(&mut self, result: Result<(), ClientError>) -> FeedbackResult {
        self.sending = false;
        match result {
            Ok(()) => {
                self.draft.clear();
                FeedbackResult {
                    notice: Notice::info(FEEDBACK_THANKS),
                    close_modal: true,
                }
            }
            Err(e) => FeedbackResult {
                notice: e.feedback_notice(),
                close_modal: false,
            },
        }
    }
}
