//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SupabaseError};

pub const ENV_BASE_URL: &str = "DB_URL";
pub const ENV_API_KEY: &str = "DB_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "DB_TIMEOUT_SECS";

/// Connection settings for a [`Client`](crate::Client)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`
    pub base_url: String,
    /// Anon or service key, sent as the `apikey` header
    pub api_key: String,
    /// Per-request timeout. `None` or zero keeps the transport default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Timeout to apply to the transport, if any
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }

    /// Load settings from `DB_URL`, `DB_API_KEY` and `DB_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SupabaseError::Config(format!("{ENV_BASE_URL} is not set")))?;
        let api_key = lookup(ENV_API_KEY).unwrap_or_default();

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                SupabaseError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds: {raw}"))
            })?)),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_zero_timeout_uses_transport_default() {
        let config = ClientConfig::new("http://localhost", "key").with_timeout(Duration::ZERO);
        assert_eq!(config.effective_timeout(), None);

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DB_URL", "http://localhost:54321"),
            ("DB_API_KEY", "anon"),
            ("DB_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:54321");
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_from_lookup_requires_url() {
        let err = ClientConfig::from_lookup(lookup(&[("DB_API_KEY", "anon")])).unwrap_err();
        assert!(matches!(err, SupabaseError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[
            ("DB_URL", "http://localhost"),
            ("DB_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_TIMEOUT_SECS"));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost");
        assert!(config.api_key.is_empty());
        assert!(config.timeout.is_none());
    }
}
