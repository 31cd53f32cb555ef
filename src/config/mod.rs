//! Grabber configuration
//!
//! Two files are involved:
//!
//! - the optional settings file ([`GrabberSettings`], TOML) tuning the
//!   source URL, timeouts and output metadata, overridable through
//!   `TVCLUB_*` environment variables;
//! - the channel selection file ([`ChannelSelection`]), the XMLTV grabber
//!   configuration written by `--configure`.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub mod channels;
pub mod defaults;
pub mod duration_serde;

pub use channels::{ChannelSelection, default_config_file};

use crate::errors::{AppError, AppResult};
use crate::utils::url::UrlUtils;
use defaults::*;

/// Runtime settings of the grabber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrabberSettings {
    /// Feed location
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Total time allowed for the feed download
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
    /// `generator-info-name` of the output document
    #[serde(default)]
    pub generator_name: Option<String>,
    /// `generator-info-url` of the output document
    #[serde(default)]
    pub generator_url: Option<String>,
    /// Drop programmes of channels that are not selected
    #[serde(default = "default_filter_programmes_by_channel")]
    pub filter_programmes_by_channel: bool,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    parse_default_duration(DEFAULT_REQUEST_TIMEOUT, 30)
}

fn default_connect_timeout() -> Duration {
    parse_default_duration(DEFAULT_CONNECT_TIMEOUT, 10)
}

fn default_filter_programmes_by_channel() -> bool {
    DEFAULT_FILTER_PROGRAMMES_BY_CHANNEL
}

fn parse_default_duration(value: &str, fallback_secs: u64) -> Duration {
    humantime::parse_duration(value).unwrap_or(Duration::from_secs(fallback_secs))
}

impl Default for GrabberSettings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            generator_name: Some(DEFAULT_GENERATOR_NAME.to_string()),
            generator_url: Some(DEFAULT_GENERATOR_URL.to_string()),
            filter_programmes_by_channel: default_filter_programmes_by_channel(),
        }
    }
}

impl GrabberSettings {
    /// Load settings from defaults, then the optional TOML file, then
    /// `TVCLUB_*` environment variables
    pub fn load(settings_file: Option<&Path>) -> AppResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = settings_file {
            if !path.is_file() {
                return Err(AppError::configuration(format!(
                    "Settings file {} does not exist",
                    path.display()
                )));
            }
            debug!("Loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        Self::extract(figment.merge(Env::prefixed(SETTINGS_ENV_PREFIX)))
    }

    /// Load settings from a TOML string layered over the defaults
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(content)))
    }

    fn extract(figment: Figment) -> AppResult<Self> {
        let settings: Self = figment
            .extract()
            .map_err(|e| AppError::configuration(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that serde cannot express
    pub fn validate(&self) -> AppResult<()> {
        UrlUtils::parse_http(&self.source_url).map_err(AppError::configuration)?;
        if self.request_timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(AppError::configuration("Timeouts must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = GrabberSettings::default();
        assert_eq!(settings.source_url, "http://guide.tvclub.fr/tvguide.xml");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.generator_name.as_deref(), Some("tv_grab_fr_tvclub"));
        assert!(!settings.filter_programmes_by_channel);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let settings = GrabberSettings::from_toml_str(
            r#"
            source_url = "https://mirror.example.com/tvguide.xml.gz"
            request_timeout = "1m 30s"
            connect_timeout = 5
            filter_programmes_by_channel = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.source_url, "https://mirror.example.com/tvguide.xml.gz");
        assert_eq!(settings.request_timeout, Duration::from_secs(90));
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
        assert!(settings.filter_programmes_by_channel);
        assert_eq!(settings.generator_url.as_deref(), Some(DEFAULT_GENERATOR_URL));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(GrabberSettings::from_toml_str(r#"source_url = "ftp://example.com""#).is_err());
        assert!(GrabberSettings::from_toml_str(r#"request_timeout = "soon""#).is_err());
        assert!(GrabberSettings::from_toml_str(r#"connect_timeout = "0s""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"generator_name = "custom""#).unwrap();

        let settings = GrabberSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.generator_name.as_deref(), Some("custom"));
    }

    #[test]
    fn test_missing_settings_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = GrabberSettings::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(error, AppError::Configuration { .. }));
    }
}
