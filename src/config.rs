use std::env;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_JWT_EXPIRES_IN: u64 = 60 * 60; // 1 hour
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Where users and tasks are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String, max_connections: u32 },
    /// In-process storage, lost on restart. Used by the test suite and for local runs.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage: StorageBackend,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expires_in: u64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            storage,
            jwt_secret,
            jwt_expires_in: parse_or(&lookup, "JWT_EXPIRES_IN", DEFAULT_JWT_EXPIRES_IN)?,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
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
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                database_url: "postgres://test".into(),
                max_connections: 5
            }
        );
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt_expires_in, 3600);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRES_IN", "60"),
            ("BCRYPT_COST", "4"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.jwt_expires_in, 60);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_config_requires_secret_and_database() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")])).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[
                ("STORAGE_BACKEND", "memory"),
                ("JWT_SECRET", ""),
            ]))
            .unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "SERVER_PORT",
                value: "eighty".into()
            }
        );

        let err = Config::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "redis"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORAGE_BACKEND", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BCRYPT_COST", .. }));
    }
}
