use carelink_domain::PersonId;

/// Why access to a record was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessBasis {
    /// Client reading their own record.
    SelfOwned,
    /// Scope covers every therapist.
    FullVisibility,
    /// Owning therapist is in the scope.
    TherapistInScope,
    /// A currently valid delegation link connects a visible therapist to the
    /// owning client.
    DelegatedThroughLink {
        /// Therapist holding the link.
        therapist_id: PersonId,
    },
}

/// Why access to a record was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Requester lacks the baseline read capability.
    NoCapability,
    /// Owning therapist is outside the scope.
    OutOfScope,
    /// No visible therapist holds a currently valid link to the client.
    NoValidDelegationLink,
    /// Record has no owner, which signals a data-integrity problem.
    OwnershipMissing,
}

impl DenialReason {
    /// Returns a stable label used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCapability => "no_capability",
            Self::OutOfScope => "out_of_scope",
            Self::NoValidDelegationLink => "no_valid_delegation_link",
            Self::OwnershipMissing => "data_integrity_ownership_missing",
        }
    }
}

/// Outcome of one resource authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access granted.
    Granted(AccessBasis),
    /// Access denied.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns whether access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}
