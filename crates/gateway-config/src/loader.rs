//! Reading configuration from disk.

use crate::error::ConfigError;
use crate::settings::GatewayConfig;
use std::path::Path;
use tracing::info;
use validator::Validate;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl GatewayConfig {
    /// Parse and validate configuration text. Environment overrides are not
    /// applied.
    ///
    /// # Errors
    /// Returns a parse or validation error
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse {
            format: format.as_str(),
            message,
        };

        let config: Self = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(contents).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| parse_err(e.to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from `path`, apply `GATEWAY_*` overrides and validate.
///
/// # Errors
/// Returns an error if the file is unreadable, in an unknown format, fails to
/// parse, or fails validation.
pub async fn load_config(path: impl AsRef<Path>) -> Result<GatewayConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut config = GatewayConfig::parse(&contents, format)?;
    config.apply_env_overrides()?;
    config.validate()?;

    info!(
        path = %path.display(),
        format = format.as_str(),
        models = config.model_list.len(),
        "Configuration loaded"
    );

    Ok(config)
}
