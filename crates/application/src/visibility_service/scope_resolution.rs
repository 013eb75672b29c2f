use carelink_domain::{MANAGER_THRESHOLD, SUPERVISOR_THRESHOLD};

use super::*;

/// Traversal chosen for one role level.
///
/// | level | plan |
/// |---|---|
/// | no capability | [`ScopePlan::NoCapability`] |
/// | >= manager | [`ScopePlan::Everyone`] |
/// | entry clinician | [`ScopePlan::SelfAndSupervisors`] |
/// | clinician | [`ScopePlan::SelfOnly`] |
/// | coordinator | one hop down |
/// | senior supervisor | two hops down |
///
/// Senior supervisors are the only tier that reaches a second hop; a higher
/// level does not simply widen the same traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ScopePlan {
    NoCapability,
    Everyone,
    SelfAndSupervisors,
    SelfOnly,
    Downward { second_hop: bool },
}

impl ScopePlan {
    pub(super) fn for_level(level: RoleLevel) -> Self {
        if !level.has_directory_read_capability() {
            return Self::NoCapability;
        }
        if level >= MANAGER_THRESHOLD {
            return Self::Everyone;
        }
        if level >= SUPERVISOR_THRESHOLD {
            return Self::Downward {
                second_hop: level == RoleLevel::SENIOR_SUPERVISOR,
            };
        }
        if level == RoleLevel::ENTRY_CLINICIAN {
            return Self::SelfAndSupervisors;
        }

        Self::SelfOnly
    }
}

impl VisibilityService {
    pub(super) async fn resolve_scope_for_level(
        &self,
        tenant_id: TenantId,
        caller_id: PersonId,
        level: RoleLevel,
    ) -> Result<VisibilityScope, VisibilityError> {
        match ScopePlan::for_level(level) {
            ScopePlan::NoCapability => Ok(VisibilityScope::None),
            ScopePlan::Everyone => Ok(VisibilityScope::All),
            ScopePlan::SelfOnly => Ok(VisibilityScope::partial(caller_id, [])),
            ScopePlan::SelfAndSupervisors => {
                let supervisor_ids = self.supervisors_of(tenant_id, caller_id).await?;
                Ok(VisibilityScope::partial(caller_id, supervisor_ids))
            }
            ScopePlan::Downward { second_hop } => {
                let first_ids = self
                    .supervised_by(tenant_id, SupervisionEdgeFilter::supervised_by(caller_id))
                    .await?;

                // Bounded at two hops, so supervision cycles cannot loop.
                let second_ids = if second_hop && !first_ids.is_empty() {
                    self.supervised_by(
                        tenant_id,
                        SupervisionEdgeFilter::supervised_by_any(first_ids.clone()),
                    )
                    .await?
                } else {
                    BTreeSet::new()
                };

                Ok(VisibilityScope::partial(
                    caller_id,
                    first_ids.into_iter().chain(second_ids),
                ))
            }
        }
    }
}
