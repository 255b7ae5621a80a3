use log::warn;
use serde::Deserialize;

use crate::error::{ConfigError, HeadersError};
use crate::http::headers::Headers;
use crate::http::init::HeadersInit;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadersConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_level: String,

    /// Initializer: a table (record) or an array of `[name, value]` pairs
    pub headers: Option<toml::Value>,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            headers: None,
        }
    }
}

impl HeadersConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<HeadersConfig>(content)?)
    }

    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Like [`HeadersConfig::load`], falling back to the default config when
    /// the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Fail to load {}: {err}", path);
                warn!("Fall back to default config");
                HeadersConfig::default()
            }
        }
    }

    pub fn init(&self) -> Result<HeadersInit, HeadersError> {
        match &self.headers {
            Some(value) => HeadersInit::from_toml(value),
            None => Ok(HeadersInit::Empty),
        }
    }

    pub fn build_headers(&self) -> Result<Headers, HeadersError> {
        Headers::try_from(self.init()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config = HeadersConfig::parse("").unwrap();
        assert_eq!(config, HeadersConfig::default());
        assert!(config.build_headers().unwrap().is_empty());
    }

    #[test]
    fn test_record_headers() {
        let config = HeadersConfig::parse(
            r#"
log_level = "debug"

[headers]
Content-Type = "text/html"
X-Request-Id = 42
"#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");

        let headers = config.build_headers().unwrap();
        assert_eq!(headers.get("content-type").unwrap().as_deref(), Some("text/html"));
        assert_eq!(headers.get("x-request-id").unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_invalid_header_surfaces() {
        let config = HeadersConfig::parse("headers = [[\"Bad Name\", \"v\"]]").unwrap();
        assert!(matches!(config.build_headers(), Err(HeadersError::InvalidHeaderName(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(HeadersConfig::parse("log_level = "), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert!(matches!(
            HeadersConfig::load("/nonexistent/headers.toml"),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(HeadersConfig::from_file("/nonexistent/headers.toml"), HeadersConfig::default());
    }
}
