//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::{DEFAULT_MAX_MINUTES, FeedPolicy};
use crate::predictor::PredictorConfig;

/// Errors while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Predictor API base URL.
    pub predictor_base_url: String,

    /// Predictor request timeout in seconds.
    pub predictor_timeout_secs: u64,

    /// Serve mock responses from this directory instead of the live API.
    pub mock_dir: Option<PathBuf>,

    /// How long a fetched response is reused.
    pub cache_ttl: Duration,

    /// Exclusive upper bound of the actionable window (minutes).
    pub max_minutes: f64,

    /// Static assets directory.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let predictor = PredictorConfig::default();
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            predictor_base_url: predictor.base_url,
            predictor_timeout_secs: predictor.timeout_secs,
            mock_dir: None,
            cache_ttl: Duration::from_secs(60),
            max_minutes: DEFAULT_MAX_MINUTES,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("BRT_BIND_ADDR") {
            config.bind_addr = parse_var("BRT_BIND_ADDR", &v)?;
        }
        if let Some(v) = get("PREDICTOR_BASE_URL") {
            config.predictor_base_url = v;
        }
        if let Some(v) = get("PREDICTOR_TIMEOUT_SECS") {
            let timeout: u64 = parse_var("PREDICTOR_TIMEOUT_SECS", &v)?;
            if timeout == 0 {
                return Err(ConfigError::Invalid {
                    name: "PREDICTOR_TIMEOUT_SECS",
                    value: v,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.predictor_timeout_secs = timeout;
        }
        if let Some(v) = get("PREDICTOR_MOCK_DIR") {
            config.mock_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get("BRT_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse_var("BRT_CACHE_TTL_SECS", &v)?);
        }
        if let Some(v) = get("BRT_MAX_MINUTES") {
            let max: f64 = parse_var("BRT_MAX_MINUTES", &v)?;
            if !max.is_finite() || max <= 0.0 {
                return Err(ConfigError::Invalid {
                    name: "BRT_MAX_MINUTES",
                    value: v,
                    reason: "must be a positive number".to_string(),
                });
            }
            config.max_minutes = max;
        }
        if let Some(v) = get("BRT_STATIC_DIR") {
            config.static_dir = PathBuf::from(v);
        }

        Ok(config)
    }

    /// Predictor client configuration.
    pub fn predictor(&self) -> PredictorConfig {
        PredictorConfig::new()
            .with_base_url(&self.predictor_base_url)
            .with_timeout(self.predictor_timeout_secs)
    }

    /// Feed filtering policy.
    pub fn feed_policy(&self) -> FeedPolicy {
        FeedPolicy::default().with_max_minutes(Some(self.max_minutes))
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.predictor_base_url, "https://api.mobilidade.rio/predictor");
        assert_eq!(config.predictor_timeout_secs, 30);
        assert_eq!(config.mock_dir, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.max_minutes, 16.0);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BRT_BIND_ADDR", "0.0.0.0:8080"),
            ("PREDICTOR_BASE_URL", "http://localhost:9000"),
            ("PREDICTOR_TIMEOUT_SECS", "5"),
            ("PREDICTOR_MOCK_DIR", "data/mock_predictions"),
            ("BRT_CACHE_TTL_SECS", "15"),
            ("BRT_MAX_MINUTES", "30"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.predictor().base_url, "http://localhost:9000");
        assert_eq!(config.predictor().timeout_secs, 5);
        assert_eq!(config.mock_dir, Some(PathBuf::from("data/mock_predictions")));
        assert_eq!(config.cache_ttl, Duration::from_secs(15));
        assert_eq!(config.feed_policy().max_minutes, Some(30.0));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("PREDICTOR_MOCK_DIR", "  ")])).unwrap();
        assert_eq!(config.mock_dir, None);
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("BRT_CACHE_TTL_SECS", "soon")])).unwrap_err();
        let ConfigError::Invalid { name, value, .. } = err;
        assert_eq!(name, "BRT_CACHE_TTL_SECS");
        assert_eq!(value, "soon");
    }

    #[test]
    fn non_positive_max_minutes_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("BRT_MAX_MINUTES", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("BRT_MAX_MINUTES", "-4")])).is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let err =
            AppConfig::from_lookup(lookup(&[("PREDICTOR_TIMEOUT_SECS", "0")])).unwrap_err();
        let ConfigError::Invalid { name, reason, .. } = err;
        assert_eq!(name, "PREDICTOR_TIMEOUT_SECS");
        assert_eq!(reason, "must be greater than zero");

        let config = AppConfig::from_lookup(lookup(&[("PREDICTOR_TIMEOUT_SECS", "1")])).unwrap();
        assert_eq!(config.predictor_timeout_secs, 1);
    }
}
