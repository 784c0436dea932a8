//! Wire types for the prediction service.
//!
//! Every response is wrapped in an [`ApiEnvelope`]; `success` is authoritative
//! even when the HTTP status is 2xx.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PredictMethod {
    /// Single blended method the gated flow always uses.
    #[default]
    Unified,
    Statistical,
    Ml,
    Hybrid,
}

impl PredictMethod {
    pub fn label(self) -> &'static str {
        match self {
            PredictMethod::Unified => "unified",
            PredictMethod::Statistical => "statistical",
            PredictMethod::Ml => "ml",
            PredictMethod::Hybrid => "hybrid",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "unified" => Some(PredictMethod::Unified),
            "statistical" | "stat" => Some(PredictMethod::Statistical),
            "ml" => Some(PredictMethod::Ml),
            "hybrid" => Some(PredictMethod::Hybrid),
            _ => None,
        }
    }

    pub fn all() -> &'static [PredictMethod] {
        &[
            PredictMethod::Unified,
            PredictMethod::Statistical,
            PredictMethod::Ml,
            PredictMethod::Hybrid,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionRequest {
    pub method: PredictMethod,
    pub num_sets: u32,
    pub include_bonus: bool,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            method: PredictMethod::Unified,
            num_sets: 1,
            include_bonus: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub sets: Vec<Vec<u32>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub confidence_scores: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reasoning: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub analysis_summary: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub disclaimer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OddEvenRatio {
    pub odd_ratio: f64,
    pub even_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeasonStats {
    #[cfg_attr(feature = "serde", serde(default))]
    pub draw_count: u32,
    /// `(number, count)` pairs, hottest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hot_numbers: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComprehensiveAnalysis {
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_draws: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hot_numbers: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cold_numbers: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub odd_even_ratio: OddEvenRatio,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seasonal_analysis: BTreeMap<String, SeasonStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Disclaimer {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackRequest {
    pub message: String,
}

/// `{success, message?, data?, error?}` wrapper around every response body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApiEnvelope<T> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
    pub data: Option<T>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Predict,
    Feedback,
    ComprehensiveAnalysis,
    Disclaimer,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::Predict => "/predict",
            Endpoint::Feedback => "/feedback",
            Endpoint::ComprehensiveAnalysis => "/analysis/comprehensive",
            Endpoint::Disclaimer => "/disclaimer",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::Predict | Endpoint::Feedback => HttpMethod::Post,
            Endpoint::Health | Endpoint::ComprehensiveAnalysis | Endpoint::Disclaimer => {
                HttpMethod::Get
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn request_uses_snake_case_and_lowercase_method() {
        let body = serde_json::to_value(PredictionRequest::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"method": "unified", "num_sets": 1, "include_bonus": false})
        );
    }

    #[test]
    fn prediction_payload_tolerates_missing_optionals() {
        let env: ApiEnvelope<PredictionResponse> =
            serde_json::from_str(r#"{"success":true,"data":{"sets":[[1,2,3,4,5,6]]}}"#).unwrap();
        assert!(env.success);
        let data = env.data.unwrap();
        assert_eq!(data.sets, vec![vec![1, 2, 3, 4, 5, 6]]);
        assert!(data.confidence_scores.is_none());
        assert!(data.reasoning.is_none());
    }

    #[test]
    fn analysis_payload_decodes_seasonal_pairs() {
        let raw = r#"{
            "hot_numbers": [34, 12],
            "cold_numbers": [9],
            "odd_even_ratio": {"odd_ratio": 0.52, "even_ratio": 0.48},
            "seasonal_analysis": {"winter": {"draw_count": 10, "hot_numbers": [[7, 4], [3, 2]]}},
            "number_frequency": {"1": 3}
        }"#;
        let a: ComprehensiveAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(a.hot_numbers, vec![34, 12]);
        assert_eq!(a.seasonal_analysis["winter"].hot_numbers, vec![(7, 4), (3, 2)]);
        assert!(a.total_draws.is_none());
    }

    #[test]
    fn method_parse_matches_labels() {
        for m in PredictMethod::all() {
            assert_eq!(PredictMethod::parse(m.label()), Some(*m));
        }
        assert_eq!(PredictMethod::parse("nope"), None);
    }

    #[test]
    fn endpoint_methods() {
        assert_eq!(Endpoint::Predict.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Health.method(), HttpMethod::Get);
        assert_eq!(Endpoint::ComprehensiveAnalysis.path(), "/analysis/comprehensive");
    }
}
