use std::collections::BTreeSet;
use std::sync::Arc;

use carelink_core::TenantId;
use carelink_domain::{PersonId, RoleLevel, SupervisionEdge, VisibilityScope};
use tracing::{debug, warn};

use crate::VisibilityError;
use crate::visibility_ports::{
    ProfessionalRegistrationRepository, SupervisionEdgeFilter, SupervisionEdgeRepository,
};

mod access_level;
mod scope_resolution;

pub use access_level::max_role_level;

/// Application service resolving which therapists a caller may see.
///
/// Resolution is read-only and request-scoped. Resolve once per request and
/// reuse the returned scope for every record check in that request.
#[derive(Clone)]
pub struct VisibilityService {
    registration_repository: Arc<dyn ProfessionalRegistrationRepository>,
    supervision_repository: Arc<dyn SupervisionEdgeRepository>,
}

impl VisibilityService {
    /// Creates a visibility service from its lookup ports.
    #[must_use]
    pub fn new(
        registration_repository: Arc<dyn ProfessionalRegistrationRepository>,
        supervision_repository: Arc<dyn SupervisionEdgeRepository>,
    ) -> Self {
        Self {
            registration_repository,
            supervision_repository,
        }
    }

    /// Resolves the visibility scope of a caller.
    ///
    /// Fails with [`VisibilityError::NoProfessionalRegistration`] when the
    /// caller holds no registration, and with
    /// [`VisibilityError::ScopeResolutionFailed`] when any lookup fails.
    /// Errors never degrade into a permissive scope.
    pub async fn resolve_visibility_scope(
        &self,
        tenant_id: TenantId,
        caller_id: PersonId,
    ) -> Result<VisibilityScope, VisibilityError> {
        let level = self.resolve_access_level(tenant_id, caller_id).await?;
        let scope = self.resolve_scope_for_level(tenant_id, caller_id, level).await?;

        debug!(
            %tenant_id,
            %caller_id,
            %level,
            scope = scope.kind(),
            visible_therapists = scope.therapist_ids().map(|ids| ids.count()),
            "resolved visibility scope"
        );

        Ok(scope)
    }

    /// Resolves the highest role level a person holds.
    pub async fn resolve_access_level(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> Result<RoleLevel, VisibilityError> {
        let registrations = self
            .registration_repository
            .list_professional_registrations(tenant_id, person_id)
            .await
            .map_err(|error| {
                warn!(%tenant_id, %person_id, %error, "professional registration lookup failed");
                VisibilityError::lookup_failed(error)
            })?;

        max_role_level(person_id, registrations.as_slice())
    }

    async fn active_edges(
        &self,
        tenant_id: TenantId,
        filter: SupervisionEdgeFilter,
    ) -> Result<Vec<SupervisionEdge>, VisibilityError> {
        self.supervision_repository
            .list_active_supervision_edges(tenant_id, &filter)
            .await
            .map(|edges| edges.into_iter().filter(|edge| edge.is_active()).collect())
            .map_err(|error| {
                warn!(%tenant_id, ?filter, %error, "supervision edge lookup failed");
                VisibilityError::lookup_failed(error)
            })
    }

    async fn supervisors_of(
        &self,
        tenant_id: TenantId,
        clinician_id: PersonId,
    ) -> Result<BTreeSet<PersonId>, VisibilityError> {
        let edges = self
            .active_edges(tenant_id, SupervisionEdgeFilter::supervising(clinician_id))
            .await?;
        Ok(edges.into_iter().map(|edge| edge.supervisor_id).collect())
    }

    async fn supervised_by(
        &self,
        tenant_id: TenantId,
        filter: SupervisionEdgeFilter,
    ) -> Result<BTreeSet<PersonId>, VisibilityError> {
        let edges = self.active_edges(tenant_id, filter).await?;
        Ok(edges.into_iter().map(|edge| edge.clinician_id).collect())
    }
}
