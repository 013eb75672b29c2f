use std::sync::Arc;

use carelink_core::{AppError, AppResult, TenantId};
use carelink_domain::{Ownership, PersonId, ProtectedFile, VisibilityScope};
use chrono::Utc;
use tracing::{debug, error, warn};

use crate::VisibilityError;
use crate::visibility_ports::DelegationLinkRepository;

mod decision;
mod listing;

pub use decision::{AccessBasis, AccessDecision, DenialReason};

/// Application service applying a resolved visibility scope to owned records.
///
/// Every check reads delegation links fresh; nothing is cached between calls.
#[derive(Clone)]
pub struct ResourceAccessService {
    delegation_repository: Arc<dyn DelegationLinkRepository>,
}

impl ResourceAccessService {
    /// Creates a resource access service from the delegation lookup port.
    #[must_use]
    pub fn new(delegation_repository: Arc<dyn DelegationLinkRepository>) -> Self {
        Self {
            delegation_repository,
        }
    }

    /// Returns whether the requester may access a record.
    pub async fn authorize(
        &self,
        tenant_id: TenantId,
        ownership: &Ownership,
        requester_id: PersonId,
        scope: &VisibilityScope,
    ) -> Result<bool, VisibilityError> {
        self.evaluate(tenant_id, ownership, requester_id, scope)
            .await
            .map(|decision| decision.is_granted())
    }

    /// Ensures the requester may access a record.
    ///
    /// Denials map to a generic forbidden error that does not reveal why.
    pub async fn require_access(
        &self,
        tenant_id: TenantId,
        ownership: &Ownership,
        requester_id: PersonId,
        scope: &VisibilityScope,
    ) -> AppResult<()> {
        match self
            .evaluate(tenant_id, ownership, requester_id, scope)
            .await?
        {
            AccessDecision::Granted(_) => Ok(()),
            AccessDecision::Denied(_) => Err(AppError::Forbidden(
                "you do not have access to this record".to_owned(),
            )),
        }
    }

    /// Returns whether the requester may download a stored file.
    pub async fn can_download_file(
        &self,
        tenant_id: TenantId,
        file: &ProtectedFile,
        requester_id: PersonId,
        scope: &VisibilityScope,
    ) -> Result<bool, VisibilityError> {
        let decision = self
            .evaluate(tenant_id, &file.ownership, requester_id, scope)
            .await?;

        if let AccessDecision::Denied(reason) = decision {
            debug!(
                %tenant_id,
                file_id = %file.file_id,
                %requester_id,
                reason = reason.as_str(),
                "file download denied"
            );
        }

        Ok(decision.is_granted())
    }

    /// Evaluates many records against one already-resolved scope.
    ///
    /// Decisions are returned in record order. The first lookup failure
    /// aborts the whole batch.
    pub async fn authorize_batch(
        &self,
        tenant_id: TenantId,
        requester_id: PersonId,
        scope: &VisibilityScope,
        ownerships: &[Ownership],
    ) -> Result<Vec<AccessDecision>, VisibilityError> {
        let mut decisions = Vec::with_capacity(ownerships.len());
        for ownership in ownerships {
            let decision = self
                .evaluate(tenant_id, ownership, requester_id, scope)
                .await?;
            decisions.push(decision);
        }

        Ok(decisions)
    }

    /// Evaluates one record and reports why access was granted or denied.
    ///
    /// A client reading their own record is granted before the scope is
    /// consulted. Unowned records are denied and logged as an integrity
    /// problem.
    pub async fn evaluate(
        &self,
        tenant_id: TenantId,
        ownership: &Ownership,
        requester_id: PersonId,
        scope: &VisibilityScope,
    ) -> Result<AccessDecision, VisibilityError> {
        let decision = match (ownership, scope) {
            (Ownership::ClientOwned { client_id }, _) if *client_id == requester_id => {
                AccessDecision::Granted(AccessBasis::SelfOwned)
            }
            (Ownership::Unowned, _) => {
                error!(
                    %tenant_id,
                    %requester_id,
                    "protected record has no owner; denying access"
                );
                AccessDecision::Denied(DenialReason::OwnershipMissing)
            }
            (_, VisibilityScope::None) => AccessDecision::Denied(DenialReason::NoCapability),
            (_, VisibilityScope::All) => AccessDecision::Granted(AccessBasis::FullVisibility),
            (
                Ownership::TherapistOwned { therapist_id },
                VisibilityScope::Partial { therapist_ids },
            ) => {
                if therapist_ids.contains(therapist_id) {
                    AccessDecision::Granted(AccessBasis::TherapistInScope)
                } else {
                    AccessDecision::Denied(DenialReason::OutOfScope)
                }
            }
            (
                Ownership::ClientOwned { client_id },
                VisibilityScope::Partial { therapist_ids },
            ) => {
                let now = Utc::now();
                let link = self
                    .delegation_repository
                    .find_valid_delegation_link(
                        tenant_id,
                        therapist_ids.as_set(),
                        *client_id,
                        now,
                    )
                    .await
                    .map_err(|error| {
                        warn!(%tenant_id, %client_id, %error, "delegation link lookup failed");
                        VisibilityError::lookup_failed(error)
                    })?;

                match link {
                    Some(link)
                        if link.client_id == *client_id
                            && therapist_ids.contains(&link.therapist_id)
                            && link.is_valid_at(now) =>
                    {
                        AccessDecision::Granted(AccessBasis::DelegatedThroughLink {
                            therapist_id: link.therapist_id,
                        })
                    }
                    _ => AccessDecision::Denied(DenialReason::NoValidDelegationLink),
                }
            }
        };

        Ok(decision)
    }
}
