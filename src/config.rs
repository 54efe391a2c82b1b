// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::time::Duration;

pub const BLS_API_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";
pub const NASS_API_URL: &str = "https://quickstats.nass.usda.gov/api/api_GET/";

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 8;
const DEFAULT_AGGREGATION_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub bls_url: String,
    pub bls_key: Option<String>,
    pub nass_url: String,
    pub nass_key: Option<String>,
    /// Bound on every single outbound request.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            bls_url: BLS_API_URL.to_string(),
            bls_key: None,
            nass_url: NASS_API_URL.to_string(),
            nass_key: None,
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub upstream: UpstreamConfig,
    /// Bound on the whole fetch-and-reconcile pass of one request.
    pub aggregation_timeout: Duration,
    /// Skip both upstreams and always serve the catalog baseline.
    pub mock_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            upstream: UpstreamConfig::default(),
            aggregation_timeout: Duration::from_secs(DEFAULT_AGGREGATION_TIMEOUT_SECS),
            mock_mode: false,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().context("PORT must be a number")?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let timeout = seconds(&lookup, "UPSTREAM_TIMEOUT_SECS")?.unwrap_or(defaults.upstream.timeout);
        let aggregation_timeout =
            seconds(&lookup, "AGGREGATION_TIMEOUT_SECS")?.unwrap_or(defaults.aggregation_timeout);

        let mock_mode = match lookup("MOCK_MODE") {
            Some(raw) => parse_flag(&raw).with_context(|| format!("MOCK_MODE has invalid value '{}'", raw))?,
            None => false,
        };

        Ok(AppConfig {
            port,
            upstream: UpstreamConfig {
                bls_url: lookup("BLS_API_URL").unwrap_or(defaults.upstream.bls_url),
                bls_key: non_empty(lookup("BLS_API_KEY")),
                nass_url: lookup("NASS_API_URL").unwrap_or(defaults.upstream.nass_url),
                nass_key: non_empty(lookup("NASS_API_KEY")),
                timeout,
            },
            aggregation_timeout,
            mock_mode,
        })
    }
}

fn seconds<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds", key))?;
            if secs == 0 {
                anyhow::bail!("{} must be greater than zero", key);
            }
            Ok(Some(Duration::from_secs(secs)))
        }
        None => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.upstream.bls_url, BLS_API_URL);
        assert_eq!(config.upstream.timeout, Duration::from_secs(8));
        assert!(!config.mock_mode);
        assert!(config.upstream.nass_key.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
            ("MOCK_MODE", "true"),
            ("NASS_API_KEY", "abc"),
            ("BLS_API_KEY", "  "),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.timeout, Duration::from_secs(5));
        assert!(config.mock_mode);
        assert_eq!(config.upstream.nass_key.as_deref(), Some("abc"));
        assert!(config.upstream.bls_key.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("MOCK_MODE", "maybe")])).is_err());
    }
}
