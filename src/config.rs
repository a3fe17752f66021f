use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/trip_planner";
const DEFAULT_DATABASE: &str = "trip_planner";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got `{0}`")]
    InvalidPort(String),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    /// Used only when `mongodb_uri` does not name a database
    pub database_name: String,
}

impl Config {
    /// Reads `HOST`, `PORT`, `MONGODB_URI` and `MONGODB_DATABASE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongodb_uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            database_name: lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_listen_on_port_5000() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.mongodb_uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.database_name, "trip_planner");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_in(&[
            ("PORT", "8080"),
            ("MONGODB_URI", "mongodb://db:27017/trips"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_uri, "mongodb://db:27017/trips");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Config::from_lookup(lookup_in(&[("PORT", "http")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".into()));
    }
}
