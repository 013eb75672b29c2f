use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PersonId;

/// Owner classification of a protected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ownership {
    /// Record belongs to a client.
    ClientOwned {
        /// Owning client.
        client_id: PersonId,
    },
    /// Record belongs to a therapist.
    TherapistOwned {
        /// Owning therapist.
        therapist_id: PersonId,
    },
    /// Record has no owner; always denied.
    Unowned,
}

impl Ownership {
    /// Classifies a record from its nullable owner columns.
    ///
    /// Client ownership wins when both columns are populated.
    #[must_use]
    pub fn from_owner_columns(
        client_id: Option<PersonId>,
        therapist_id: Option<PersonId>,
    ) -> Self {
        match (client_id, therapist_id) {
            (Some(client_id), _) => Self::ClientOwned { client_id },
            (None, Some(therapist_id)) => Self::TherapistOwned { therapist_id },
            (None, None) => Self::Unowned,
        }
    }

    /// Returns a stable label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientOwned { .. } => "client_owned",
            Self::TherapistOwned { .. } => "therapist_owned",
            Self::Unowned => "unowned",
        }
    }
}

/// Stored file guarded by the download check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedFile {
    /// Stable file identifier.
    pub file_id: Uuid,
    /// Owner classification of the file.
    pub ownership: Ownership,
}

#[cfg(test)]
mod tests {
    use super::Ownership;
    use crate::PersonId;

    #[test]
    fn owner_columns_prefer_client() {
        let client_id = PersonId::new();
        let therapist_id = PersonId::new();

        assert_eq!(
            Ownership::from_owner_columns(Some(client_id), Some(therapist_id)),
            Ownership::ClientOwned { client_id }
        );
        assert_eq!(
            Ownership::from_owner_columns(None, Some(therapist_id)),
            Ownership::TherapistOwned { therapist_id }
        );
        assert_eq!(Ownership::from_owner_columns(None, None), Ownership::Unowned);
    }

    #[test]
    fn ownership_serializes_with_kind_tag() {
        let encoded = serde_json::to_value(Ownership::Unowned);
        assert!(matches!(encoded, Ok(value) if value["kind"] == "unowned"));
    }
}
