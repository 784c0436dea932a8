use thiserror::Error;

/// Failure reported by a [`Transport`](crate::client::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("connection failed: {0}")]
    NetworkFailure(String),
    /// The call was aborted by its timeout.
    #[error("request timed out")]
    Timeout,
    /// Non-2xx status, `success: false`, or an unreadable body.
    #[error("server rejected the request (status {status:?}): {message}")]
    ServerRejected { status: Option<u16>, message: String },
    /// Rejected locally; no request was issued.
    #[error("invalid input: {0}")]
    ValidationFailure(&'static str),
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => ClientError::Timeout,
            TransportError::Network(msg) => ClientError::NetworkFailure(msg),
        }
    }
}

impl ClientError {
    /// Notice shown for a failed prediction.
    pub fn predict_notice(&self) -> Notice {
        let text = match self {
            ClientError::Timeout => {
                "The request took too long and was cancelled. Please try again shortly."
            }
            ClientError::NetworkFailure(_) => "Could not connect to the server.",
            ClientError::ServerRejected { .. } => "Prediction failed. Please try again.",
            ClientError::ValidationFailure(msg) => *msg,
        };
        Notice::error(text)
    }

    /// Notice shown for a failed feedback submission.
    pub fn feedback_notice(&self) -> Notice {
        let text = match self {
            ClientError::ValidationFailure(msg) => return Notice::warning(*msg),
            ClientError::NetworkFailure(_) | ClientError::Timeout => {
                "Sending failed because of a network error."
            }
            ClientError::ServerRejected { .. } => {
                "Sending failed. Please try again in a moment."
            }
        };
        Notice::error(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-visible message (alert, banner, or a stderr line on the CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
