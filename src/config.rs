use crate::catalog::{BuildOptions, FailurePolicy};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_SUBDOMAIN: &str = "securedoorpm";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub rentvine_subdomain: String,
    pub rentvine_api_key: String,
    pub rentvine_api_secret: String,
    /// Replaces `https://{subdomain}.rentvine.com/api/manager/` when set.
    pub rentvine_base_url: Option<Url>,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub request_timeout: Duration,
    /// None keeps the catalog until it is refreshed by hand.
    pub catalog_ttl: Option<chrono::Duration>,
    pub failure_policy: FailurePolicy,
    pub fetch_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            rentvine_subdomain: get("RENTVINE_SUBDOMAIN")
                .unwrap_or_else(|| DEFAULT_SUBDOMAIN.to_string()),
            rentvine_api_key: required("RENTVINE_API_KEY")?,
            rentvine_api_secret: required("RENTVINE_API_SECRET")?,
            rentvine_base_url: get("RENTVINE_BASE_URL")
                .map(|raw| parse("RENTVINE_BASE_URL", &raw))
                .transpose()?,
            bind_addr: parse(
                "BIND_ADDR",
                &get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            )?,
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), 8)?,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                30,
            )?),
            catalog_ttl: get("CATALOG_TTL_SECS")
                .map(|raw| positive_seconds("CATALOG_TTL_SECS", &raw))
                .transpose()?,
            failure_policy: get("CATALOG_FAILURE_POLICY")
                .map(|raw| parse("CATALOG_FAILURE_POLICY", &raw))
                .transpose()?
                .unwrap_or_default(),
            fetch_concurrency: parse_or::<usize>("FETCH_CONCURRENCY", get("FETCH_CONCURRENCY"), 1)?
                .max(1),
        })
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            failure_policy: self.failure_policy,
            fetch_concurrency: self.fetch_concurrency,
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn positive_seconds(key: &'static str, raw: &str) -> Result<chrono::Duration, ConfigError> {
    let secs: i64 = parse(key, raw)?;
    if secs <= 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("must be a positive number of seconds, got {secs}"),
        });
    }
    Ok(chrono::Duration::seconds(secs))
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |raw| parse(key, &raw))
}
