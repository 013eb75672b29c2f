use carelink_core::AppError;
use carelink_domain::PersonId;
use thiserror::Error;

/// Failures surfaced by visibility resolution and resource authorization.
///
/// Neither variant is ever recovered inside the engine: the caller aborts the
/// request and denies access.
#[derive(Debug, Error)]
pub enum VisibilityError {
    /// Caller holds no professional registration and cannot be scoped.
    #[error("person '{person_id}' has no professional registration")]
    NoProfessionalRegistration {
        /// Person that was looked up.
        person_id: PersonId,
    },

    /// An underlying lookup failed.
    #[error("visibility scope resolution failed: {source}")]
    ScopeResolutionFailed {
        /// Lookup error reported by the collaborator.
        #[source]
        source: AppError,
    },
}

impl VisibilityError {
    pub(crate) fn lookup_failed(source: AppError) -> Self {
        Self::ScopeResolutionFailed { source }
    }
}

impl From<VisibilityError> for AppError {
    fn from(value: VisibilityError) -> Self {
        match value {
            VisibilityError::NoProfessionalRegistration { .. } => AppError::Forbidden(
                "complete your professional profile first".to_owned(),
            ),
            VisibilityError::ScopeResolutionFailed { source } => {
                AppError::Internal(format!("access could not be verified: {source}"))
            }
        }
    }
}
