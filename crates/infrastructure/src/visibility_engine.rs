//! Wiring of the visibility engine from configuration.

use std::sync::Arc;

use carelink_application::{
    CachedProfessionalRegistrationRepository, ProfessionalRegistrationCache,
    ProfessionalRegistrationRepository, ResourceAccessService, VisibilityService,
};
use carelink_core::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::{
    InMemoryRegistrationCache, PostgresVisibilityRepository, RedisRegistrationCache,
    RegistrationCacheProvider, VisibilityEngineConfig,
};

/// Services composing the visibility engine.
#[derive(Clone)]
pub struct VisibilityEngine {
    /// Resolves caller visibility scopes.
    pub visibility_service: VisibilityService,
    /// Applies resolved scopes to owned records.
    pub resource_access_service: ResourceAccessService,
}

/// Connects to PostgreSQL, runs migrations and builds the engine services.
pub async fn build_visibility_engine(
    config: &VisibilityEngineConfig,
) -> AppResult<VisibilityEngine> {
    let pool = connect_and_migrate(config).await?;
    build_visibility_engine_with_pool(config, pool)
}

/// Builds the engine services on an existing connection pool.
pub fn build_visibility_engine_with_pool(
    config: &VisibilityEngineConfig,
    pool: PgPool,
) -> AppResult<VisibilityEngine> {
    let repository = Arc::new(PostgresVisibilityRepository::new(pool));
    let registration_repository = build_registration_repository(config, repository.clone())?;

    Ok(VisibilityEngine {
        visibility_service: VisibilityService::new(registration_repository, repository.clone()),
        resource_access_service: ResourceAccessService::new(repository),
    })
}

async fn connect_and_migrate(config: &VisibilityEngineConfig) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(config.database_url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

fn build_registration_repository(
    config: &VisibilityEngineConfig,
    repository: Arc<PostgresVisibilityRepository>,
) -> AppResult<Arc<dyn ProfessionalRegistrationRepository>> {
    let Some(cache) = build_registration_cache(config)? else {
        return Ok(repository);
    };

    Ok(Arc::new(CachedProfessionalRegistrationRepository::new(
        repository,
        cache,
        config.registration_cache_ttl_seconds,
    )))
}

fn build_registration_cache(
    config: &VisibilityEngineConfig,
) -> AppResult<Option<Arc<dyn ProfessionalRegistrationCache>>> {
    if config.registration_cache_ttl_seconds == 0 {
        info!("registration cache disabled by zero ttl");
        return Ok(None);
    }

    match &config.registration_cache_provider {
        RegistrationCacheProvider::None => Ok(None),
        RegistrationCacheProvider::Memory => Ok(Some(Arc::new(InMemoryRegistrationCache::new()))),
        RegistrationCacheProvider::Redis { redis_url } => {
            let client = redis::Client::open(redis_url.as_str())
                .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;
            Ok(Some(Arc::new(RedisRegistrationCache::new(
                client,
                config.registration_cache_key_prefix.as_str(),
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use carelink_core::{AppError, NonEmptyString};

    use super::build_registration_cache;
    use crate::{RegistrationCacheProvider, VisibilityEngineConfig};

    fn config(provider: RegistrationCacheProvider, ttl_seconds: u32) -> VisibilityEngineConfig {
        let Ok(key_prefix) = NonEmptyString::new("carelink:registrations") else {
            panic!("prefix should be valid");
        };

        VisibilityEngineConfig {
            database_url: "postgres://localhost/carelink".to_owned(),
            database_max_connections: 2,
            registration_cache_provider: provider,
            registration_cache_key_prefix: key_prefix,
            registration_cache_ttl_seconds: ttl_seconds,
        }
    }

    #[test]
    fn cache_is_skipped_for_none_provider_or_zero_ttl() {
        let none = build_registration_cache(&config(RegistrationCacheProvider::None, 60));
        let zero_ttl = build_registration_cache(&config(RegistrationCacheProvider::Memory, 0));

        assert!(matches!(none, Ok(None)));
        assert!(matches!(zero_ttl, Ok(None)));
    }

    #[test]
    fn memory_and_redis_providers_build_caches() {
        let memory = build_registration_cache(&config(RegistrationCacheProvider::Memory, 60));
        let redis = build_registration_cache(&config(
            RegistrationCacheProvider::Redis {
                redis_url: "redis://127.0.0.1/".to_owned(),
            },
            60,
        ));

        assert!(matches!(memory, Ok(Some(_))));
        assert!(matches!(redis, Ok(Some(_))));
    }

    #[test]
    fn malformed_redis_url_is_validation_error() {
        let result = build_registration_cache(&config(
            RegistrationCacheProvider::Redis {
                redis_url: "not a url".to_owned(),
            },
            60,
        ));

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
