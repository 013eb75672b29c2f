use std::collections::BTreeSet;

use async_trait::async_trait;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{PersonId, SupervisionEdge};

/// Filter for active supervision edge lookups.
///
/// Populated fields are combined with AND. An empty `supervisor_id_in` set
/// matches no edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisionEdgeFilter {
    /// Exact supervisor match.
    pub supervisor_id: Option<PersonId>,
    /// Exact supervised clinician match.
    pub clinician_id: Option<PersonId>,
    /// Supervisor membership match.
    pub supervisor_id_in: Option<BTreeSet<PersonId>>,
}

impl SupervisionEdgeFilter {
    /// Matches edges where the person is the supervisor.
    #[must_use]
    pub fn supervised_by(supervisor_id: PersonId) -> Self {
        Self {
            supervisor_id: Some(supervisor_id),
            ..Self::default()
        }
    }

    /// Matches edges where the person is the supervised clinician.
    #[must_use]
    pub fn supervising(clinician_id: PersonId) -> Self {
        Self {
            clinician_id: Some(clinician_id),
            ..Self::default()
        }
    }

    /// Matches edges whose supervisor belongs to the set.
    #[must_use]
    pub fn supervised_by_any(supervisor_ids: BTreeSet<PersonId>) -> Self {
        Self {
            supervisor_id_in: Some(supervisor_ids),
            ..Self::default()
        }
    }

    /// Returns whether an edge satisfies the filter, ignoring its status.
    #[must_use]
    pub fn matches(&self, edge: &SupervisionEdge) -> bool {
        self.supervisor_id
            .is_none_or(|supervisor_id| edge.supervisor_id == supervisor_id)
            && self
                .clinician_id
                .is_none_or(|clinician_id| edge.clinician_id == clinician_id)
            && self
                .supervisor_id_in
                .as_ref()
                .is_none_or(|supervisor_ids| supervisor_ids.contains(&edge.supervisor_id))
    }
}

/// Repository port for supervision graph lookups.
#[async_trait]
pub trait SupervisionEdgeRepository: Send + Sync {
    /// Lists active supervision edges matching the filter.
    async fn list_active_supervision_edges(
        &self,
        tenant_id: TenantId,
        filter: &SupervisionEdgeFilter,
    ) -> AppResult<Vec<SupervisionEdge>>;
}
