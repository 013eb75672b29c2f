use std::collections::BTreeSet;

use async_trait::async_trait;
use carelink_core::{AppResult, TenantId};
use carelink_domain::{DelegationLink, PersonId};
use chrono::{DateTime, Utc};

/// Repository port for therapist↔client delegation link lookups.
///
/// Implementations must evaluate validity against the supplied `now` on every
/// call and must not cache results.
#[async_trait]
pub trait DelegationLinkRepository: Send + Sync {
    /// Finds any link valid at `now` between one of the therapists and the
    /// client.
    async fn find_valid_delegation_link(
        &self,
        tenant_id: TenantId,
        therapist_ids: &BTreeSet<PersonId>,
        client_id: PersonId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DelegationLink>>;

    /// Lists distinct clients with at least one link valid at `now`,
    /// restricted to the therapists when a set is supplied.
    async fn list_clients_with_valid_links(
        &self,
        tenant_id: TenantId,
        therapist_ids: Option<&BTreeSet<PersonId>>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PersonId>>;
}
