//! Application services and ports of the visibility engine.

#![forbid(unsafe_code)]

mod cached_registration_repository;
mod resource_access_service;
mod visibility_error;
mod visibility_ports;
mod visibility_service;

pub use cached_registration_repository::CachedProfessionalRegistrationRepository;
pub use resource_access_service::{
    AccessBasis, AccessDecision, DenialReason, ResourceAccessService,
};
pub use visibility_error::VisibilityError;
pub use visibility_ports::{
    DelegationLinkRepository, ProfessionalRegistrationCache, ProfessionalRegistrationRepository,
    SupervisionEdgeFilter, SupervisionEdgeRepository,
};
pub use visibility_service::{VisibilityService, max_role_level};
