use lotto_gate::error::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("config: {0}")]
    Config(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
    /// A notice already rendered for the user.
    #[error("{0}")]
    Failed(String),
    #[error("interrupted")]
    Interrupted,
}
