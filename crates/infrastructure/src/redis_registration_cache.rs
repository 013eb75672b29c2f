//! Redis-backed professional registration cache.

use async_trait::async_trait;
use carelink_application::ProfessionalRegistrationCache;
use carelink_core::{AppError, AppResult, TenantId};
use carelink_domain::{PersonId, ProfessionalRegistration};
use redis::AsyncCommands;

/// Redis implementation of the professional registration cache port.
#[derive(Clone)]
pub struct RedisRegistrationCache {
    client: redis::Client,
    key_prefix: String,
}

impl RedisRegistrationCache {
    /// Creates a cache adapter with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, tenant_id: TenantId, person_id: PersonId) -> String {
        format!("{}:{}:{}", self.key_prefix, tenant_id, person_id)
    }

    fn decode_registrations(value: &str) -> AppResult<Vec<ProfessionalRegistration>> {
        serde_json::from_str(value).map_err(|error| {
            AppError::Internal(format!(
                "invalid professional registration cache value: {error}"
            ))
        })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl ProfessionalRegistrationCache for RedisRegistrationCache {
    async fn get_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Option<Vec<ProfessionalRegistration>>> {
        let key = self.key_for(tenant_id, person_id);
        let mut connection = self.connection().await?;

        let encoded: Option<String> = connection.get(key).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read professional registration cache entry: {error}"
            ))
        })?;

        encoded
            .as_deref()
            .map(Self::decode_registrations)
            .transpose()
    }

    async fn set_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
        registrations: &[ProfessionalRegistration],
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let key = self.key_for(tenant_id, person_id);
        let value = serde_json::to_string(registrations).map_err(|error| {
            AppError::Internal(format!(
                "failed to encode professional registration cache entry: {error}"
            ))
        })?;
        let mut connection = self.connection().await?;

        connection
            .set_ex(key, value, u64::from(ttl_seconds))
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write professional registration cache entry: {error}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use carelink_core::TenantId;
    use carelink_domain::{PersonId, ProfessionalRegistration};

    use super::RedisRegistrationCache;

    fn cache() -> RedisRegistrationCache {
        let Ok(client) = redis::Client::open("redis://127.0.0.1/") else {
            panic!("redis url should parse");
        };
        RedisRegistrationCache::new(client, "carelink:registrations")
    }

    #[test]
    fn keys_are_namespaced_by_tenant_and_person() {
        let tenant_id = TenantId::new();
        let person_id = PersonId::new();

        assert_eq!(
            cache().key_for(tenant_id, person_id),
            format!("carelink:registrations:{tenant_id}:{person_id}")
        );
    }

    #[test]
    fn malformed_cache_values_are_internal_errors() {
        assert!(RedisRegistrationCache::decode_registrations("not-json").is_err());

        let person_id = PersonId::new();
        let encoded = format!(r#"[{{"person_id":"{person_id}","role_title":"Supervisora"}}]"#);
        let decoded = RedisRegistrationCache::decode_registrations(encoded.as_str());
        assert!(matches!(
            decoded,
            Ok(registrations)
                if registrations == vec![ProfessionalRegistration::new(person_id, "Supervisora")]
        ));
    }
}
