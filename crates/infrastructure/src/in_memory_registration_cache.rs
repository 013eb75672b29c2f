use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use carelink_application::ProfessionalRegistrationCache;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{PersonId, ProfessionalRegistration};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct RegistrationCacheEntry {
    registrations: Vec<ProfessionalRegistration>,
    expires_at: Instant,
}

/// In-memory cache adapter for professional registrations.
#[derive(Default)]
pub struct InMemoryRegistrationCache {
    entries: RwLock<HashMap<(TenantId, PersonId), RegistrationCacheEntry>>,
}

impl InMemoryRegistrationCache {
    /// Creates an empty in-memory registration cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfessionalRegistrationCache for InMemoryRegistrationCache {
    async fn get_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Option<Vec<ProfessionalRegistration>>> {
        let key = (tenant_id, person_id);
        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.registrations.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(&key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(&key);
        }

        Ok(None)
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

        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(u64::from(ttl_seconds)))
            .unwrap_or(now);

        self.entries.write().await.insert(
            (tenant_id, person_id),
            RegistrationCacheEntry {
                registrations: registrations.to_vec(),
                expires_at,
            },
        );

        Ok(())
    }
}
