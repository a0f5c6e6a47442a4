//! Runtime configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-output configuration section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output name as reported by the compositor (e.g. "HDMI-A-1")
    pub name: String,

    /// Comma-separated application ids placed on this output
    #[serde(rename = "app-ids", skip_serializing_if = "Option::is_none")]
    pub app_ids: Option<String>,
}

/// Shell configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Re-fullscreen root windows on every maximize or fullscreen request,
    /// instead of letting them become Normal or Maximized
    pub enforce_root_fullscreen: bool,

    /// Output sections, matched by name
    #[serde(rename = "output")]
    pub outputs: Vec<OutputConfig>,
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("kiosk-shell/config.toml")),
            Some(std::path::PathBuf::from("/etc/kiosk-shell/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::from_path(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(?path, error = %e, "failed to load config");
                    }
                }
            }
        }

        tracing::info!("using default configuration");
        Self::default()
    }

    /// Load configuration from an explicit path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            ?path,
            outputs = config.outputs.len(),
            enforce_root_fullscreen = config.enforce_root_fullscreen,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Look up `field` in the first `section` whose `key` equals `value`.
    ///
    /// Only `("output", "name", <output name>, "app-ids")` carries data.
    pub fn get_string(&self, section: &str, key: &str, value: &str, field: &str) -> Option<String> {
        match (section, key, field) {
            ("output", "name", "app-ids") => self
                .outputs
                .iter()
                .find(|output| output.name == value)
                .and_then(|output| output.app_ids.clone()),
            _ => None,
        }
    }

    /// Application ids configured for the named output
    pub fn output_app_ids(&self, output_name: &str) -> Option<String> {
        self.get_string("output", "name", output_name, "app-ids")
    }
}

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Helper for getting XDG directories
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }
}
