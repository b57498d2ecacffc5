use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix
        let common = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let backend: StoreBackend = get_env("SETTINGS_STORE_BACKEND", Some("mongodb"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The in-memory backend never touches MongoDB, so the URI may stay unset.
        let uri_default = match backend {
            StoreBackend::Memory => Some("mongodb://localhost:27017"),
            StoreBackend::MongoDb => None,
        };

        Ok(Self {
            common,
            store: StoreConfig {
                backend,
                mongodb: MongoConfig {
                    uri: Secret::new(get_env("MONGODB_URI", uri_default, is_prod)?),
                    database: get_env(
                        "MONGODB_DATABASE",
                        Some("payment_settings_db"),
                        is_prod,
                    )?,
                },
            },
            service_name: "payment-settings-service".to_string(),
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("mongodb".parse::<StoreBackend>(), Ok(StoreBackend::MongoDb));
        assert_eq!("Mongo".parse::<StoreBackend>(), Ok(StoreBackend::MongoDb));
        assert_eq!("MEMORY".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_get_env_falls_back_outside_prod() {
        let value = get_env("PAYMENT_SETTINGS_TEST_UNSET_VARIABLE", Some("fallback"), false);
        assert_eq!(value.unwrap(), "fallback");

        let missing = get_env("PAYMENT_SETTINGS_TEST_UNSET_VARIABLE", None, false);
        assert!(matches!(missing, Err(AppError::ConfigError(_))));

        let prod = get_env("PAYMENT_SETTINGS_TEST_UNSET_VARIABLE", Some("fallback"), true);
        assert!(matches!(prod, Err(AppError::ConfigError(_))));
    }
}
