//! Cross-platform application paths

use std::path::PathBuf;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, CliError> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    fn get_config_dir() -> Result<PathBuf, CliError> {
        let base = dirs::config_dir()
            .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
        Ok(base.join("lotto_gate"))
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
