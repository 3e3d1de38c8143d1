//! Client configuration.
//!
//! Everything here is fixed at construction; clients never mutate it afterwards.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};

const FROM_ENV: &str = "ClientConfig::from_env";

/// Connection and paging settings shared by every entity client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Name of the metadata server the calls are addressed to (`{0}` in every route).
    pub server_name: String,
    /// Network address of the platform hosting the server, e.g. `https://localhost:9443`.
    pub platform_url_root: String,
    /// Largest page a caller may request; `0` disables the ceiling.
    pub max_page_size: u32,
    pub request_timeout_secs: u64,
    /// Credentials of the calling application, sent as basic auth when both are present.
    pub user_id: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Zones newly created elements (and withdrawn ones) belong to.
    pub default_zones: Vec<String>,
    /// Zones published elements belong to.
    pub published_zones: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_name: "cocoMDS1".to_string(),
            platform_url_root: "https://localhost:9443".to_string(),
            max_page_size: 1000,
            request_timeout_secs: 30,
            user_id: None,
            password: None,
            default_zones: vec!["quarantine".to_string()],
            published_zones: vec!["data-lake".to_string()],
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_name", &self.server_name)
            .field("platform_url_root", &self.platform_url_root)
            .field("max_page_size", &self.max_page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("default_zones", &self.default_zones)
            .field("published_zones", &self.published_zones)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(server_name: impl Into<String>, platform_url_root: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            platform_url_root: platform_url_root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.password = Some(password.into());
        self
    }

    /// Loads configuration from `CATALOG_*` environment variables on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = env_string("CATALOG_SERVER_NAME") {
            config.server_name = name;
        }
        if let Some(url) = env_string("CATALOG_PLATFORM_URL") {
            config.platform_url_root = url.trim_end_matches('/').to_string();
        }
        if let Some(size) = env_u32("CATALOG_MAX_PAGE_SIZE")? {
            config.max_page_size = size;
        }
        if let Some(secs) = env_u64("CATALOG_TIMEOUT_SECS")? {
            config.request_timeout_secs = secs;
        }
        config.user_id = env_string("CATALOG_CLIENT_USER");
        config.password = env_string("CATALOG_CLIENT_PASSWORD");
        if let Some(zones) = env_string("CATALOG_DEFAULT_ZONES") {
            config.default_zones = parse_zones(&zones);
        }
        if let Some(zones) = env_string("CATALOG_PUBLISHED_ZONES") {
            config.published_zones = parse_zones(&zones);
        }

        if config.server_name.is_empty() {
            return Err(ClientError::invalid(FROM_ENV, "CATALOG_SERVER_NAME", "must not be empty"));
        }
        Ok(config)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_u32(name: &str) -> Result<Option<u32>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u32>()
        .map(Some)
        .map_err(|e| ClientError::invalid(FROM_ENV, name, format!("must be a u32: {e}")))
}

fn env_u64(name: &str) -> Result<Option<u64>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u64>()
        .map(Some)
        .map_err(|e| ClientError::invalid(FROM_ENV, name, format!("must be a u64: {e}")))
}

fn parse_zones(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|zone| !zone.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zones_skips_blanks() {
        assert_eq!(
            parse_zones(" data-lake, ,personal-files,"),
            vec!["data-lake".to_string(), "personal-files".to_string()]
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("srv", "http://localhost:9443").with_credentials("npa", "secret");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_serialize_omits_password() {
        let config = ClientConfig::new("srv", "http://localhost:9443").with_credentials("npa", "secret");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["userId"], "npa");
        assert!(value.get("password").is_none());
    }
}
