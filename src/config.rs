//! Client and flow configuration.

use std::time::Duration;

use crate::api::{Endpoint, PredictMethod, PredictionRequest};

pub const LOCAL_API_BASE: &str = "http://localhost:8000/api";
pub const DEPLOYED_API_BASE: &str = "/api";

/// Best-effort warm-up ping.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
pub const PREDICT_TIMEOUT: Duration = Duration::from_secs(90);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL every endpoint path is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self(base)
    }

    /// Local dev servers talk to the backend directly; deployed pages use the
    /// same-origin `/api` prefix.
    pub fn for_hostname(hostname: &str) -> Self {
        match hostname.trim() {
            "localhost" | "127.0.0.1" => Self::new(LOCAL_API_BASE),
            _ => Self::new(DEPLOYED_API_BASE),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.0, endpoint.path())
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self::new(LOCAL_API_BASE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base: ApiBase,
    pub health_timeout: Duration,
    pub predict_timeout: Duration,
    /// Feedback, analysis and disclaimer calls.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base: ApiBase) -> Self {
        Self {
            base,
            health_timeout: HEALTH_TIMEOUT,
            predict_timeout: PREDICT_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn timeout_for(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::Health => self.health_timeout,
            Endpoint::Predict => self.predict_timeout,
            Endpoint::Feedback | Endpoint::ComprehensiveAnalysis | Endpoint::Disclaimer => {
                self.request_timeout
            }
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiBase::default())
    }
}

/// One flow for both page variants: with the watch gate, or predict at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    pub require_watch_gate: bool,
    pub method: PredictMethod,
    pub num_sets: u32,
    pub include_bonus: bool,
    /// Show confidence scores and reasoning next to the numbers.
    pub show_details: bool,
}

impl FlowConfig {
    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            method: self.method,
            num_sets: self.num_sets.max(1),
            include_bonus: self.include_bonus,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            require_watch_gate: true,
            method: PredictMethod::Unified,
            num_sets: 1,
            include_bonus: false,
            show_details: false,
        }
    }
}
