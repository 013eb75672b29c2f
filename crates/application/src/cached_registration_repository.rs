use std::sync::Arc;

use async_trait::async_trait;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{PersonId, ProfessionalRegistration};
use tracing::warn;

use crate::visibility_ports::{ProfessionalRegistrationCache, ProfessionalRegistrationRepository};

/// Read-through cache in front of a registration repository.
///
/// Cache failures degrade to a direct repository read. Empty results are not
/// cached so a newly registered clinician is never stuck without a scope for
/// a full ttl.
#[derive(Clone)]
pub struct CachedProfessionalRegistrationRepository {
    repository: Arc<dyn ProfessionalRegistrationRepository>,
    cache: Arc<dyn ProfessionalRegistrationCache>,
    ttl_seconds: u32,
}

impl CachedProfessionalRegistrationRepository {
    /// Wraps a repository with a cache and entry ttl.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProfessionalRegistrationRepository>,
        cache: Arc<dyn ProfessionalRegistrationCache>,
        ttl_seconds: u32,
    ) -> Self {
        Self {
            repository,
            cache,
            ttl_seconds,
        }
    }
}

#[async_trait]
impl ProfessionalRegistrationRepository for CachedProfessionalRegistrationRepository {
    async fn list_professional_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Vec<ProfessionalRegistration>> {
        if self.ttl_seconds > 0 {
            match self.cache.get_registrations(tenant_id, person_id).await {
                Ok(Some(registrations)) => return Ok(registrations),
                Ok(None) => {}
                Err(error) => {
                    warn!(%tenant_id, %person_id, %error, "registration cache read failed");
                }
            }
        }

        let registrations = self
            .repository
            .list_professional_registrations(tenant_id, person_id)
            .await?;

        if self.ttl_seconds > 0
            && !registrations.is_empty()
            && let Err(error) = self
                .cache
                .set_registrations(tenant_id, person_id, &registrations, self.ttl_seconds)
                .await
        {
            warn!(%tenant_id, %person_id, %error, "registration cache write failed");
        }

        Ok(registrations)
    }
}
