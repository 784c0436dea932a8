//! Layered settings: defaults ← config file ← environment ← flags.

use std::path::Path;
use std::time::Duration;

use lotto_gate::api::PredictMethod;
use lotto_gate::config::{ApiBase, ClientConfig, FlowConfig, LOCAL_API_BASE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::args::PredictArgs;
use crate::error::CliError;

pub const ENV_API_BASE: &str = "LOTTO_API_BASE";
pub const ENV_WATCH_GATE: &str = "LOTTO_WATCH_GATE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_true")]
    pub require_watch_gate: bool,
    #[serde(default = "default_num_sets")]
    pub num_sets: u32,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub show_details: bool,
    #[serde(default = "default_predict_timeout_secs")]
    pub predict_timeout_secs: u64,
}

fn default_api_base() -> String {
    LOCAL_API_BASE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_num_sets() -> u32 {
    1
}

fn default_predict_timeout_secs() -> u64 {
    90
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            require_watch_gate: true,
            num_sets: default_num_sets(),
            method: None,
            show_details: false,
            predict_timeout_secs: default_predict_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let cfg = serde_json::from_str(&raw)?;
                info!("Loaded config from {}", path.display());
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(base) = get(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base;
        }
        if let Some(v) = get(ENV_WATCH_GATE) {
            match parse_bool(&v) {
                Some(b) => self.require_watch_gate = b,
                None => warn!("Ignoring {}={:?}: expected a boolean", ENV_WATCH_GATE, v),
            }
        }
    }
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub flow: FlowConfig,
}

impl Settings {
    pub fn resolve(
        file: FileConfig,
        api_override: Option<&str>,
        predict: Option<&PredictArgs>,
    ) -> Result<Self, CliError> {
        let base = api_override.unwrap_or(&file.api_base).to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CliError::Config(format!(
                "api base must be an absolute http(s) URL, got {base:?}"
            )));
        }

        let mut client = ClientConfig::new(ApiBase::new(base));
        client.predict_timeout = Duration::from_secs(file.predict_timeout_secs.max(1));

        let method = match file.method.as_deref() {
            Some(m) => PredictMethod::parse(m)
                .ok_or_else(|| CliError::Config(format!("unknown method {m:?}")))?,
            None => PredictMethod::Unified,
        };

        let mut flow = FlowConfig {
            require_watch_gate: file.require_watch_gate,
            method,
            num_sets: file.num_sets.max(1),
            include_bonus: false,
            show_details: file.show_details,
        };

        if let Some(p) = predict {
            if p.no_gate {
                flow.require_watch_gate = false;
            }
            if let Some(n) = p.sets {
                flow.num_sets = n.max(1);
            }
            if let Some(m) = p.method {
                flow.method = m;
            }
            if p.details {
                flow.show_details = true;
            }
        }

        Ok(Self { client, flow })
    }
}
