//! Process settings from environment variables, and the connection pool built from them.

use crate::error::ConfigError;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost:3306/explorer";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8082";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Idle connections are closed after this long.
    pub idle_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: 10,
            idle_timeout: Duration::from_secs(2),
        }
    }
}

impl Settings {
    /// `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `DB_IDLE_TIMEOUT_SECS`; unset keys keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
            }
        };
        let max_connections = number("DB_MAX_CONNECTIONS", u64::from(defaults.max_connections))?;
        let max_connections = u32::try_from(max_connections)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            })?;
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections,
            idle_timeout: Duration::from_secs(number("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout.as_secs())?),
        })
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .idle_timeout(self.idle_timeout)
    }

    /// Connect the fixed-size pool. Callers block on acquire when it is exhausted.
    pub async fn connect(&self) -> Result<MySqlPool, sqlx::Error> {
        self.pool_options().connect(&self.database_url).await
    }

    /// Pool that connects on first use.
    pub fn connect_lazy(&self) -> Result<MySqlPool, sqlx::Error> {
        self.pool_options().connect_lazy(&self.database_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(s.max_connections, 10);
        assert_eq!(s.idle_timeout, Duration::from_secs(2));
    }

    #[test]
    fn overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "mysql://u:p@db/app"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_IDLE_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(s.database_url, "mysql://u:p@db/app");
        assert_eq!(s.max_connections, 3);
        assert_eq!(s.idle_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_numbers() {
        let err = Settings::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
        assert!(Settings::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("DB_IDLE_TIMEOUT_SECS", "-1")])).is_err());
    }
}
