use async_trait::async_trait;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{PersonId, ProfessionalRegistration};

/// Optional cache port for professional registrations.
///
/// Only registrations may be cached. Supervision edges and delegation links
/// are time-dependent and always read from their repositories.
#[async_trait]
pub trait ProfessionalRegistrationCache: Send + Sync {
    /// Returns cached registrations for one person.
    async fn get_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Option<Vec<ProfessionalRegistration>>>;

    /// Stores registrations for one person with ttl.
    async fn set_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
        registrations: &[ProfessionalRegistration],
        ttl_seconds: u32,
    ) -> AppResult<()>;
}
