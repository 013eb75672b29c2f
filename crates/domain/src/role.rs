//! Professional role hierarchy.
//!
//! Role titles are free text typed by clinic staff, so every title is
//! normalized (diacritics stripped, lower-cased, whitespace collapsed) before
//! it is looked up in the static level table. Titles missing from the table
//! resolve to [`RoleLevel::NONE`].

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::PersonId;

/// Position of a professional role in the clinic hierarchy.
///
/// Only the relative order and the two thresholds
/// ([`SUPERVISOR_THRESHOLD`], [`MANAGER_THRESHOLD`]) carry meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleLevel(u8);

/// Lowest level of the coordinator/senior-supervisor band.
pub const SUPERVISOR_THRESHOLD: RoleLevel = RoleLevel::COORDINATOR;

/// Lowest level granting visibility over every therapist.
pub const MANAGER_THRESHOLD: RoleLevel = RoleLevel::MANAGER;

impl RoleLevel {
    /// Unrecognized title or no role at all.
    pub const NONE: Self = Self(0);
    /// Entry-level field clinician (therapeutic companion, intern).
    pub const ENTRY_CLINICIAN: Self = Self(1);
    /// Standard clinical role (psychologist, therapist).
    pub const CLINICIAN: Self = Self(2);
    /// Program coordinator.
    pub const COORDINATOR: Self = Self(3);
    /// Senior supervisor.
    pub const SENIOR_SUPERVISOR: Self = Self(4);
    /// Full administrative role.
    pub const MANAGER: Self = Self(5);
    /// Executive.
    pub const EXECUTIVE: Self = Self(6);

    /// Resolves a free-text role title through the level table.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        level_for_normalized_title(normalize_role_title(title).as_str())
    }

    /// Returns the numeric level.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns whether this level holds the baseline directory read
    /// capability.
    ///
    /// This is the only capability gated at this layer; callers below it
    /// resolve to an empty visibility scope without any graph lookup.
    #[must_use]
    pub fn has_directory_read_capability(self) -> bool {
        self >= Self::ENTRY_CLINICIAN
    }
}

impl std::fmt::Display for RoleLevel {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Normalizes a role title for table lookup.
///
/// Strips combining marks after canonical decomposition, lower-cases, treats
/// `-` and `_` as spaces, and collapses runs of whitespace.
#[must_use]
pub fn normalize_role_title(title: &str) -> String {
    let folded: String = title
        .nfd()
        .filter(|character| !is_combining_mark(*character))
        .flat_map(char::to_lowercase)
        .map(|character| match character {
            '-' | '_' => ' ',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn level_for_normalized_title(title: &str) -> RoleLevel {
    match title {
        "acompanhante terapeutico" | "acompanhante terapeutica" | "at" | "estagiario"
        | "estagiaria" | "field clinician" | "therapeutic companion" | "intern" => {
            RoleLevel::ENTRY_CLINICIAN
        }
        "psicologo" | "psicologa" | "terapeuta" | "terapeuta ocupacional" | "fonoaudiologo"
        | "fonoaudiologa" | "psicopedagogo" | "psicopedagoga" | "fisioterapeuta"
        | "clinician" | "therapist" | "psychologist" => RoleLevel::CLINICIAN,
        "coordenador" | "coordenadora" | "coordenador de programa"
        | "coordenadora de programa" | "coordinator" | "program coordinator" => {
            RoleLevel::COORDINATOR
        }
        "supervisor" | "supervisora" | "supervisor senior" | "supervisora senior"
        | "senior supervisor" => RoleLevel::SENIOR_SUPERVISOR,
        "gestor" | "gestora" | "administrador" | "administradora" | "manager"
        | "administrator" => RoleLevel::MANAGER,
        "diretor" | "diretora" | "diretor executivo" | "diretora executiva" | "director"
        | "executive" => RoleLevel::EXECUTIVE,
        _ => RoleLevel::NONE,
    }
}

/// One professional role currently held by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalRegistration {
    /// Person holding the role.
    pub person_id: PersonId,
    /// Free-text role title as registered.
    pub role_title: String,
}

impl ProfessionalRegistration {
    /// Creates a registration row.
    #[must_use]
    pub fn new(person_id: PersonId, role_title: impl Into<String>) -> Self {
        Self {
            person_id,
            role_title: role_title.into(),
        }
    }

    /// Returns the level derived from the role title.
    #[must_use]
    pub fn role_level(&self) -> RoleLevel {
        RoleLevel::from_title(self.role_title.as_str())
    }
}
