//! Domain entities and invariants of the visibility engine.

#![forbid(unsafe_code)]

mod link;
mod ownership;
mod person;
mod role;
mod scope;

pub use link::{DelegationLink, LinkStatus, SupervisionEdge};
pub use ownership::{Ownership, ProtectedFile};
pub use person::PersonId;
pub use role::{
    MANAGER_THRESHOLD, ProfessionalRegistration, RoleLevel, SUPERVISOR_THRESHOLD,
    normalize_role_title,
};
pub use scope::{TherapistFilter, TherapistIds, VisibilityScope};
