//! Visibility scope: the set of therapists a caller may see.

use std::collections::BTreeSet;

use crate::PersonId;

/// Non-empty set of therapist identifiers that always contains the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistIds(BTreeSet<PersonId>);

impl TherapistIds {
    /// Starts a set seeded with the caller.
    #[must_use]
    pub fn for_caller(caller_id: PersonId) -> Self {
        Self(BTreeSet::from([caller_id]))
    }

    /// Returns whether the set contains the therapist.
    #[must_use]
    pub fn contains(&self, therapist_id: &PersonId) -> bool {
        self.0.contains(therapist_id)
    }

    /// Iterates the therapist identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &PersonId> {
        self.0.iter()
    }

    /// Returns the underlying ordered set.
    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<PersonId> {
        &self.0
    }

    /// Returns the number of therapists in the set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.len()
    }
}

impl Extend<PersonId> for TherapistIds {
    fn extend<I: IntoIterator<Item = PersonId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Resolved visibility of one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Caller lacks the baseline read capability.
    None,
    /// Caller sees every therapist.
    All,
    /// Caller sees exactly the enumerated therapists.
    Partial {
        /// Visible therapists, including the caller.
        therapist_ids: TherapistIds,
    },
}

impl VisibilityScope {
    /// Builds a partial scope from the caller plus any reachable therapists.
    #[must_use]
    pub fn partial(caller_id: PersonId, reachable: impl IntoIterator<Item = PersonId>) -> Self {
        let mut therapist_ids = TherapistIds::for_caller(caller_id);
        therapist_ids.extend(reachable);
        Self::Partial { therapist_ids }
    }

    /// Returns whether the caller sees nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns whether the caller sees every therapist in the tenant.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns whether records owned by the therapist are visible.
    #[must_use]
    pub fn permits_therapist(&self, therapist_id: &PersonId) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Partial { therapist_ids } => therapist_ids.contains(therapist_id),
        }
    }

    /// Returns the enumerated therapists for a partial scope.
    #[must_use]
    pub fn therapist_ids(&self) -> Option<&TherapistIds> {
        match self {
            Self::Partial { therapist_ids } => Some(therapist_ids),
            Self::None | Self::All => None,
        }
    }

    /// Projects the scope into a listing filter.
    #[must_use]
    pub fn therapist_filter(&self) -> TherapistFilter {
        match self {
            Self::None => TherapistFilter::Nothing,
            Self::All => TherapistFilter::Unrestricted,
            Self::Partial { therapist_ids } => {
                TherapistFilter::Only(therapist_ids.iter().copied().collect())
            }
        }
    }

    /// Returns a stable label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::All => "all",
            Self::Partial { .. } => "partial",
        }
    }
}

/// Listing filter derived from a visibility scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TherapistFilter {
    /// No therapist restriction.
    Unrestricted,
    /// Restrict to these therapists.
    Only(Vec<PersonId>),
    /// Match nothing.
    Nothing,
}
