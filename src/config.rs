use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

/// Persistent settings, read from `<config dir>/licenso/config.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub tenant_id: Option<String>,
    pub license_names: Option<PathBuf>,
    pub service_names: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().context("Could not find config directory")?;
        path.push("licenso");
        path.push("config.toml");
        Ok(path)
    }

    /// Command-line values take precedence over the file
    pub fn with_tenant(mut self, tenant_id: Option<String>) -> Self {
        if tenant_id.is_some() {
            self.tenant_id = tenant_id;
        }
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
