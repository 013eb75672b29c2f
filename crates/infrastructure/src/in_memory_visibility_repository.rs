use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use carelink_application::{
    DelegationLinkRepository, ProfessionalRegistrationRepository, SupervisionEdgeFilter,
    SupervisionEdgeRepository,
};
use carelink_core::{AppResult, TenantId};
use carelink_domain::{DelegationLink, PersonId, ProfessionalRegistration, SupervisionEdge};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// In-memory implementation of the visibility lookup ports.
#[derive(Debug, Default)]
pub struct InMemoryVisibilityRepository {
    registrations: RwLock<HashMap<(TenantId, PersonId), Vec<ProfessionalRegistration>>>,
    supervision_edges: RwLock<HashMap<TenantId, Vec<SupervisionEdge>>>,
    delegation_links: RwLock<HashMap<TenantId, Vec<DelegationLink>>>,
}

impl InMemoryVisibilityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one professional registration.
    pub async fn insert_registration(
        &self,
        tenant_id: TenantId,
        registration: ProfessionalRegistration,
    ) {
        self.registrations
            .write()
            .await
            .entry((tenant_id, registration.person_id))
            .or_default()
            .push(registration);
    }

    /// Stores one supervision edge.
    pub async fn insert_supervision_edge(&self, tenant_id: TenantId, edge: SupervisionEdge) {
        self.supervision_edges
            .write()
            .await
            .entry(tenant_id)
            .or_default()
            .push(edge);
    }

    /// Stores one delegation link.
    pub async fn insert_delegation_link(&self, tenant_id: TenantId, link: DelegationLink) {
        self.delegation_links
            .write()
            .await
            .entry(tenant_id)
            .or_default()
            .push(link);
    }
}

#[async_trait]
impl ProfessionalRegistrationRepository for InMemoryVisibilityRepository {
    async fn list_professional_registrations(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Vec<ProfessionalRegistration>> {
        Ok(self
            .registrations
            .read()
            .await
            .get(&(tenant_id, person_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SupervisionEdgeRepository for InMemoryVisibilityRepository {
    async fn list_active_supervision_edges(
        &self,
        tenant_id: TenantId,
        filter: &SupervisionEdgeFilter,
    ) -> AppResult<Vec<SupervisionEdge>> {
        let edges = self.supervision_edges.read().await;

        Ok(edges
            .get(&tenant_id)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|edge| edge.is_active() && filter.matches(edge))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl DelegationLinkRepository for InMemoryVisibilityRepository {
    async fn find_valid_delegation_link(
        &self,
        tenant_id: TenantId,
        therapist_ids: &BTreeSet<PersonId>,
        client_id: PersonId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DelegationLink>> {
        let links = self.delegation_links.read().await;

        Ok(links.get(&tenant_id).and_then(|links| {
            links
                .iter()
                .find(|link| {
                    link.client_id == client_id
                        && therapist_ids.contains(&link.therapist_id)
                        && link.is_valid_at(now)
                })
                .cloned()
        }))
    }

    async fn list_clients_with_valid_links(
        &self,
        tenant_id: TenantId,
        therapist_ids: Option<&BTreeSet<PersonId>>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PersonId>> {
        let links = self.delegation_links.read().await;

        let client_ids: BTreeSet<PersonId> = links
            .get(&tenant_id)
            .into_iter()
            .flatten()
            .filter(|link| {
                therapist_ids.is_none_or(|ids| ids.contains(&link.therapist_id))
                    && link.is_valid_at(now)
            })
            .map(|link| link.client_id)
            .collect();

        Ok(client_ids.into_iter().collect())
    }
}
