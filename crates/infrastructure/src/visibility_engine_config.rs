//! Environment configuration for the visibility engine.

use std::env;

use carelink_core::{AppError, AppResult, NonEmptyString};

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_REGISTRATION_CACHE_KEY_PREFIX: &str = "carelink:registrations";
const DEFAULT_REGISTRATION_CACHE_TTL_SECONDS: u32 = 60;

/// Backend used for the professional registration cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCacheProvider {
    /// Registrations are always read from the database.
    None,
    /// Process-local cache.
    Memory,
    /// Shared Redis cache.
    Redis {
        /// Redis connection URL.
        redis_url: String,
    },
}

/// Runtime configuration of the visibility engine.
#[derive(Debug, Clone)]
pub struct VisibilityEngineConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound of the connection pool.
    pub database_max_connections: u32,
    /// Registration cache backend.
    pub registration_cache_provider: RegistrationCacheProvider,
    /// Key namespace for shared cache entries.
    pub registration_cache_key_prefix: NonEmptyString,
    /// Registration cache entry ttl. Zero disables cache writes.
    pub registration_cache_ttl_seconds: u32,
}

impl VisibilityEngineConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> AppResult<Self> {
        Self::parse(|name| env::var(name).ok())
    }

    /// Parses configuration from an explicit key lookup.
    pub fn parse<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required_non_empty(&lookup, "DATABASE_URL")?;

        let database_max_connections = match optional_non_empty(&lookup, "DATABASE_MAX_CONNECTIONS")
        {
            Some(value) => {
                let parsed = value.parse::<u32>().map_err(|error| {
                    AppError::Validation(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
                })?;
                if parsed == 0 {
                    return Err(AppError::Validation(
                        "DATABASE_MAX_CONNECTIONS must be greater than zero".to_owned(),
                    ));
                }
                parsed
            }
            None => DEFAULT_DATABASE_MAX_CONNECTIONS,
        };

        let registration_cache_provider = match optional_non_empty(
            &lookup,
            "REGISTRATION_CACHE_PROVIDER",
        )
        .unwrap_or_else(|| "memory".to_owned())
        .to_ascii_lowercase()
        .as_str()
        {
            "none" => RegistrationCacheProvider::None,
            "memory" => RegistrationCacheProvider::Memory,
            "redis" => RegistrationCacheProvider::Redis {
                redis_url: required_non_empty(&lookup, "REDIS_URL")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "REGISTRATION_CACHE_PROVIDER must be one of 'none', 'memory' or 'redis', got '{other}'"
                )));
            }
        };

        let registration_cache_key_prefix = NonEmptyString::new(
            optional_non_empty(&lookup, "REGISTRATION_CACHE_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_REGISTRATION_CACHE_KEY_PREFIX.to_owned()),
        )?;

        let registration_cache_ttl_seconds =
            match optional_non_empty(&lookup, "REGISTRATION_CACHE_TTL_SECONDS") {
                Some(value) => value.parse::<u32>().map_err(|error| {
                    AppError::Validation(format!(
                        "invalid REGISTRATION_CACHE_TTL_SECONDS: {error}"
                    ))
                })?,
                None => DEFAULT_REGISTRATION_CACHE_TTL_SECONDS,
            };

        Ok(Self {
            database_url,
            database_max_connections,
            registration_cache_provider,
            registration_cache_key_prefix,
            registration_cache_ttl_seconds,
        })
    }
}

fn required_non_empty<F>(lookup: &F, name: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
