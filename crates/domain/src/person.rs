use std::str::FromStr;

use carelink_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier shared by every person the engine reasons about: clinicians,
/// supervisors and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Creates a new random person identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a person identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid person id '{value}': {error}")))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::PersonId;

    #[test]
    fn person_id_parses_its_display_form() {
        let person_id = PersonId::new();
        let parsed = PersonId::from_str(person_id.to_string().as_str());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), person_id);
    }

    #[test]
    fn malformed_person_id_is_rejected() {
        assert!(PersonId::from_str("not-a-uuid").is_err());
    }
}
