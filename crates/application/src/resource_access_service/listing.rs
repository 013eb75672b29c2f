use super::*;

impl ResourceAccessService {
    /// Keeps the therapists visible under the scope, preserving input order.
    #[must_use]
    pub fn filter_visible_therapists(
        scope: &VisibilityScope,
        candidates: &[PersonId],
    ) -> Vec<PersonId> {
        candidates
            .iter()
            .copied()
            .filter(|therapist_id| scope.permits_therapist(therapist_id))
            .collect()
    }

    /// Lists clients reachable through currently valid delegation links.
    ///
    /// A full scope lists every client with any valid link; an empty scope
    /// lists nothing without querying.
    pub async fn list_visible_clients(
        &self,
        tenant_id: TenantId,
        scope: &VisibilityScope,
    ) -> Result<Vec<PersonId>, VisibilityError> {
        let therapist_ids = match scope {
            VisibilityScope::None => return Ok(Vec::new()),
            VisibilityScope::All => None,
            VisibilityScope::Partial { therapist_ids } => Some(therapist_ids.as_set()),
        };

        self.delegation_repository
            .list_clients_with_valid_links(tenant_id, therapist_ids, Utc::now())
            .await
            .map_err(|error| {
                warn!(%tenant_id, %error, "visible client listing failed");
                VisibilityError::lookup_failed(error)
            })
    }
}
