use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::{api::portal::Timing, database::ResourcePaths, utils::AppError};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory or `http(s)://` base URL holding the JSON resources.
    pub data_source: String,
    pub paths: ResourcePaths,
    pub session_file: String,
    pub timing: Timing,
    pub fetch_timeout: Duration,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = ResourcePaths::default();

        Ok(Self {
            data_source: var_or("PORTAL_DATA_SOURCE", "../tools"),
            paths: ResourcePaths {
                officials: var_or("PORTAL_OFFICIALS_FILE", &defaults.officials),
                members: var_or("PORTAL_MEMBERS_FILE", &defaults.members),
                institutions: var_or("PORTAL_INSTITUTIONS_FILE", &defaults.institutions),
            },
            session_file: var_or("PORTAL_SESSION_FILE", ".portal_session.json"),
            timing: Timing {
                search_debounce: Duration::from_millis(parse_or("PORTAL_SEARCH_DEBOUNCE_MS", 300)?),
                intake_reset: Duration::from_millis(parse_or("PORTAL_INTAKE_RESET_MS", 2000)?),
            },
            fetch_timeout: Duration::from_secs(parse_or("PORTAL_FETCH_TIMEOUT_SECS", 10)?),
        })
    }
}
