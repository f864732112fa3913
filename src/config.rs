//! Service configuration read from the environment

use thiserror::Error;

use crate::types::DEFAULT_TOP_N;

pub const DEFAULT_PORT: u16 = 8081;

/// Upper bound on colleges enriched and scored per request (external API cost)
pub const DEFAULT_MAX_COLLEGES: usize = 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub max_colleges: usize,
    pub default_top_n: usize,
    pub catalog_path: Option<String>,
    pub stats_api_url: Option<String>,
    pub stats_api_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_colleges: DEFAULT_MAX_COLLEGES,
            default_top_n: DEFAULT_TOP_N,
            catalog_path: None,
            stats_api_url: None,
            stats_api_key: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("ADMITFIT_PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                name: "ADMITFIT_PORT",
                expected: "port number",
                value: v.clone(),
            })?,
            None => DEFAULT_PORT,
        };
        let max_colleges = parse_count(get("ADMITFIT_MAX_COLLEGES"), "ADMITFIT_MAX_COLLEGES", DEFAULT_MAX_COLLEGES)?;
        let default_top_n = parse_count(get("ADMITFIT_DEFAULT_TOP_N"), "ADMITFIT_DEFAULT_TOP_N", DEFAULT_TOP_N)?;

        Ok(Self {
            port,
            max_colleges,
            default_top_n,
            catalog_path: get("COLLEGE_CATALOG_PATH"),
            stats_api_url: get("COLLEGE_STATS_URL"),
            stats_api_key: get("COLLEGE_STATS_API_KEY"),
        })
    }
}

fn parse_count(value: Option<String>, name: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let parsed = value.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
        name,
        expected: "positive integer",
        value: value.clone(),
    })?;
    if parsed == 0 {
        return Err(ConfigError::Zero(name));
    }
    Ok(parsed)
}
