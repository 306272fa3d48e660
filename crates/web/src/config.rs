use std::time::Duration;

use anyhow::{Context, Result};
use storage::DatabaseOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            None => 10,
        };

        let acquire_timeout_secs = match lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .context("DATABASE_ACQUIRE_TIMEOUT_SECS must be a number")?,
            None => 5,
        };

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
            database_max_connections: max_connections,
            database_acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }

    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions::new(&self.database_url)
            .max_connections(self.database_max_connections)
            .acquire_timeout(self.database_acquire_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/training"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_keys, "");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_pool_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/training"),
            ("DATABASE_MAX_CONNECTIONS", "25"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        let options = config.database_options();
        assert_eq!(options.max_connections, 25);
        assert_eq!(options.acquire_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_database_url_fails() {
        let result = Config::from_lookup(lookup_from(&[("HOST", "0.0.0.0"), ("PORT", "8080")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "eighty"),
            ("DATABASE_URL", "postgres://localhost/training"),
        ]));
        assert!(result.is_err());
    }
}
