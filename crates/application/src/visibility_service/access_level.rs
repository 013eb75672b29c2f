use carelink_domain::{PersonId, ProfessionalRegistration, RoleLevel};

use crate::VisibilityError;

/// Returns the highest level across a person's registrations.
///
/// An empty registration list is a precondition failure, not level zero.
pub fn max_role_level(
    person_id: PersonId,
    registrations: &[ProfessionalRegistration],
) -> Result<RoleLevel, VisibilityError> {
    registrations
        .iter()
        .map(ProfessionalRegistration::role_level)
        .max()
        .ok_or(VisibilityError::NoProfessionalRegistration { person_id })
}
