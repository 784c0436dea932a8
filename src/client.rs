//! Prediction service client.
//!
//! HTTP itself is behind [`Transport`] so the same call/timeout/error mapping
//! runs over browser `fetch` and over `reqwest`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    ApiEnvelope, ComprehensiveAnalysis, Disclaimer, Endpoint, FeedbackRequest, HttpMethod,
    PredictionRequest, PredictionResponse,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, TransportError};

pub const EMPTY_FEEDBACK: &str = "Please enter your feedback.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; `None` for GET.
    pub body: Option<String>,
    pub timeout: std::time::Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One request, bounded by `request.timeout`. An expired timeout must surface
/// as [`TransportError::Timeout`], never as a generic network error.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub struct PredictionClient<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> PredictionClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, endpoint: Endpoint, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method: endpoint.method(),
            url: self.config.base.url(endpoint),
            body,
            timeout: self.config.timeout_for(endpoint),
        }
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<ApiEnvelope<R>, ClientError> {
        let body = match body {
            Some(b) => Some(serde_json::to_string(b).map_err(|e| {
                ClientError::ServerRejected {
                    status: None,
                    message: format!("serialize: {e}"),
                }
            })?),
            None => None,
        };

        let resp = self.transport.send(self.request(endpoint, body)).await?;
        let status = resp.status;
        let envelope: ApiEnvelope<R> =
            serde_json::from_str(&resp.body).map_err(|e| ClientError::ServerRejected {
                status: Some(status),
                message: format!("unreadable response: {e}"),
            })?;

        if !resp.is_ok() || !envelope.success {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(ClientError::ServerRejected {
                status: Some(status),
                message,
            });
        }
        Ok(envelope)
    }

    async fn call_data<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<R, ClientError> {
        let envelope = self.call::<B, R>(endpoint, body).await?;
        envelope.data.ok_or_else(|| ClientError::ServerRejected {
            status: None,
            message: "response carried no data".to_string(),
        })
    }

    /// Best-effort warm-up ping. Returns whether the server answered 2xx;
    /// failures are never surfaced as errors.
    pub async fn check_health(&self) -> bool {
        match self.transport.send(self.request(Endpoint::Health, None)).await {
            Ok(resp) => resp.is_ok(),
            Err(_) => false,
        }
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ClientError> {
        self.call_data(Endpoint::Predict, Some(request)).await
    }

    /// Empty or whitespace-only messages fail validation without a request.
    pub async fn send_feedback(&self, message: &str) -> Result<(), ClientError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::ValidationFailure(EMPTY_FEEDBACK));
        }
        let body = FeedbackRequest {
            message: message.to_string(),
        };
        self.call::<_, serde_json::Value>(Endpoint::Feedback, Some(&body))
            .await
            .map(|_| ())
    }

    pub async fn comprehensive_analysis(&self) -> Result<ComprehensiveAnalysis, ClientError> {
        self.call_data::<(), _>(Endpoint::ComprehensiveAnalysis, None)
            .await
    }

    pub async fn disclaimer(&self) -> Result<Disclaimer, ClientError> {
        self.call_data::<(), _>(Endpoint::Disclaimer, None).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;
    use crate::config::ApiBase;
    use std::time::Duration;

    fn client(t: &ScriptedTransport) -> PredictionClient<&ScriptedTransport> {
        PredictionClient::new(ClientConfig::new(ApiBase::new("http://api.test/api")), t)
    }

    #[test]
    fn predict_posts_request_with_long_timeout() {
        let t = ScriptedTransport::default()
            .reply(200, r#"{"success":true,"data":{"sets":[[1,2,3,4,5,6]]}}"#);
        let out = pollster::block_on(client(&t).predict(&PredictionRequest::default())).unwrap();
        assert_eq!(out.sets, vec![vec![1, 2, 3, 4, 5, 6]]);

        let seen = t.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].url, "http://api.test/api/predict");
        assert_eq!(seen[0].timeout, Duration::from_secs(90));
        let body: serde_json::Value = serde_json::from_str(seen[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["method"], "unified");
        assert_eq!(body["num_sets"], 1);
        assert_eq!(body["include_bonus"], false);
    }

    #[test]
    fn success_false_is_rejected() {
        let t = ScriptedTransport::default().reply(200, r#"{"success":false,"message":"nope"}"#);
        let err = pollster::block_on(client(&t).predict(&PredictionRequest::default())).unwrap_err();
        assert_eq!(
            err,
            ClientError::ServerRejected {
                status: Some(200),
                message: "nope".into()
            }
        );
    }

    #[test]
    fn http_error_is_rejected_even_with_success_flag() {
        let t = ScriptedTransport::default().reply(500, r#"{"success":true,"data":{"sets":[]}}"#);
        let err = pollster::block_on(client(&t).predict(&PredictionRequest::default())).unwrap_err();
        assert!(matches!(err, ClientError::ServerRejected { status: Some(500), .. }));
    }

    #[test]
    fn unreadable_body_is_rejected() {
        let t = ScriptedTransport::default().reply(502, "<html>bad gateway</html>");
        let err = pollster::block_on(client(&t).predict(&PredictionRequest::default())).unwrap_err();
        assert!(matches!(err, ClientError::ServerRejected { status: Some(502), .. }));
    }

    #[test]
    fn timeout_and_network_map_distinctly() {
        let t = ScriptedTransport::default()
            .fail(TransportError::Timeout)
            .fail(TransportError::Network("refused".into()));
        let c = client(&t);
        let req = PredictionRequest::default();
        assert_eq!(pollster::block_on(c.predict(&req)), Err(ClientError::Timeout));
        assert_eq!(
            pollster::block_on(c.predict(&req)),
            Err(ClientError::NetworkFailure("refused".into()))
        );
    }

    #[test]
    fn blank_feedback_never_hits_the_network() {
        let t = ScriptedTransport::default();
        let c = client(&t);
        for msg in ["", "   ", "\n\t"] {
            assert_eq!(
                pollster::block_on(c.send_feedback(msg)),
                Err(ClientError::ValidationFailure(EMPTY_FEEDBACK))
            );
        }
        assert!(t.seen.borrow().is_empty());
    }

    #[test]
    fn feedback_is_trimmed_and_posted() {
        let t = ScriptedTransport::default().reply(200, r#"{"success":true}"#);
        pollster::block_on(client(&t).send_feedback("  nice site  ")).unwrap();
        let seen = t.seen.borrow();
        assert_eq!(seen[0].url, "http://api.test/api/feedback");
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"message":"nice site"}"#));
    }

    #[test]
    fn health_failures_are_swallowed() {
        let t = ScriptedTransport::default()
            .fail(TransportError::Network("boom".into()))
            .fail(TransportError::Timeout)
            .reply(200, r#"{"status":"healthy"}"#);
        let c = client(&t);
        assert!(!pollster::block_on(c.check_health()));
        assert!(!pollster::block_on(c.check_health()));
        assert!(pollster::block_on(c.check_health()));
        let seen = t.seen.borrow();
        assert!(seen.iter().all(|r| r.timeout == Duration::from_secs(5)));
        assert!(seen.iter().all(|r| r.body.is_none()));
    }

    #[test]
    fn failed_prewarm_does_not_affect_prediction() {
        use crate::flow::{FlowAction, FlowOutcome, PredictFlow};

        let t = ScriptedTransport::default()
            .fail(TransportError::Network("connection refused".into()))
            .reply(200, r#"{"success":true,"data":{"sets":[[4,8,15,16,23,42]]}}"#);
        let c = client(&t);
        let mut flow = PredictFlow::default();

        assert_eq!(flow.on_trigger(), FlowAction::OpenGate);
        assert!(!pollster::block_on(c.check_health()));
        let FlowAction::Predict(request) = flow.on_done(true) else {
            panic!("unlocked gate should predict");
        };
        let outcome = flow.finish(pollster::block_on(c.predict(&request)));
        let FlowOutcome::Rendered(resp) = outcome else {
            panic!("prediction should render");
        };
        assert_eq!(resp.sets, vec![vec![4, 8, 15, 16, 23, 42]]);

        let seen = t.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].url, "http://api.test/api/health");
        assert_eq!(seen[1].url, "http://api.test/api/predict");
    }

    #[test]
    fn analysis_and_disclaimer_unwrap_data() {
        let t = ScriptedTransport::default()
            .reply(
                200,
                r#"{"success":true,"data":{"hot_numbers":[1],"cold_numbers":[2],
                    "odd_even_ratio":{"odd_ratio":0.5,"even_ratio":0.5},"seasonal_analysis":{}}}"#,
            )
            .reply(
                200,
                r#"{"success":true,"data":{"title":"Notice","content":["a","b"]}}"#,
            )
            .reply(200, r#"{"success":true}"#);
        let c = client(&t);
        let a = pollster::block_on(c.comprehensive_analysis()).unwrap();
        assert_eq!(a.hot_numbers, vec![1]);
        let d = pollster::block_on(c.disclaimer()).unwrap();
        assert_eq!(d.content.len(), 2);
        assert!(pollster::block_on(c.disclaimer()).is_err());
    }
}
