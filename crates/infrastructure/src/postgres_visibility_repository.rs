use std::collections::BTreeSet;
use std::str::FromStr;

use async_trait::async_trait;
use carelink_application::{
    DelegationLinkRepository, ProfessionalRegistrationRepository, SupervisionEdgeFilter,
    SupervisionEdgeRepository,
};
use carelink_core::{AppError, AppResult, TenantId};
use carelink_domain::{
    DelegationLink, LinkStatus, PersonId, ProfessionalRegistration, SupervisionEdge,
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod delegation;
mod registrations;
mod supervision;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for the visibility engine lookups.
///
/// Supervision edges and delegation links are always read live; the temporal
/// predicate of delegation links is evaluated in SQL against the `now` bound
/// by the caller.
#[derive(Clone)]
pub struct PostgresVisibilityRepository {
    pool: PgPool,
}

impl PostgresVisibilityRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RegistrationRow {
    person_id: Uuid,
    role_title: String,
}

#[derive(Debug, FromRow)]
struct SupervisionEdgeRow {
    supervisor_id: Uuid,
    clinician_id: Uuid,
    status: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct DelegationLinkRow {
    therapist_id: Uuid,
    client_id: Uuid,
    status: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

fn decode_status(value: &str, tenant_id: TenantId, table: &str) -> AppResult<LinkStatus> {
    LinkStatus::from_str(value).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode status '{value}' from '{table}' for tenant '{tenant_id}': {error}"
        ))
    })
}

fn uuid_list(person_ids: &BTreeSet<PersonId>) -> Vec<Uuid> {
    person_ids.iter().map(PersonId::as_uuid).collect()
}

#[async_trait]
impl ProfessionalRegistrationRepository for PostgresVisibilityRepository {
    async fn list_professional_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Vec<ProfessionalRegistration>> {
        self.list_professional_registrations_impl(tenant_id, person_id)
            .await
    }
}

#[async_trait]
impl SupervisionEdgeRepository for PostgresVisibilityRepository {
    async fn list_active_supervision_edges(
        &self,
        tenant_id: TenantId,
        filter: &SupervisionEdgeFilter,
    ) -> AppResult<Vec<SupervisionEdge>> {
        self.list_active_supervision_edges_impl(tenant_id, filter)
            .await
    }
}

#[async_trait]
impl DelegationLinkRepository for PostgresVisibilityRepository {
    async fn find_valid_delegation_link(
        &self,
        tenant_id: TenantId,
        therapist_ids: &BTreeSet<PersonId>,
        client_id: PersonId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DelegationLink>> {
        self.find_valid_delegation_link_impl(tenant_id, therapist_ids, client_id, now)
            .await
    }

    async fn list_clients_with_valid_links(
        &self,
        tenant_id: TenantId,
        therapist_ids: Option<&BTreeSet<PersonId>>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PersonId>> {
        self.list_clients_with_valid_links_impl(tenant_id, therapist_ids, now)
            .await
    }
}
