use anyhow::{Context, Result};
use std::env;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub bridge_url: Option<String>,
    pub bridge_token: Option<String>,
    pub webhook_secret: Option<String>,
    pub http_addr: String,
}

impl Config {
    /// Reads the process environment (call `dotenv()` first for `.env` support).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").context("DATABASE_URL must be set in .env file")?,
            gemini_api_key: get("GEMINI_API_KEY").context("GEMINI_API_KEY must be set in .env file")?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            bridge_url: get("BRIDGE_URL"),
            bridge_token: get("BRIDGE_TOKEN"),
            webhook_secret: get("WEBHOOK_SECRET"),
            http_addr: get("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/sastreria"),
            ("GEMINI_API_KEY", "key"),
        ])
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.http_addr, "0.0.0.0:3000");
        assert!(config.bridge_url.is_none());
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/sastreria"),
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("BRIDGE_URL", "http://bridge:3001"),
            ("WEBHOOK_SECRET", "s3cret"),
            ("HTTP_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.bridge_url.as_deref(), Some("http://bridge:3001"));
        assert_eq!(config.webhook_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.http_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_required() {
        let err = config_from(&[("DATABASE_URL", "postgres://localhost/sastreria")]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = config_from(&[("GEMINI_API_KEY", "key"), ("DATABASE_URL", "  ")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
