use async_trait::async_trait;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{PersonId, ProfessionalRegistration};

/// Repository port for professional registration lookups.
#[async_trait]
pub trait ProfessionalRegistrationRepository: Send + Sync {
    /// Lists the registrations a person currently holds in a tenant.
    async fn list_professional_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Vec<ProfessionalRegistration>>;
}
