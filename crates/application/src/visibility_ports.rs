mod cache;
mod delegation;
mod registrations;
mod supervision;

pub use cache::ProfessionalRegistrationCache;
pub use delegation::DelegationLinkRepository;
pub use registrations::ProfessionalRegistrationRepository;
pub use supervision::{SupervisionEdgeFilter, SupervisionEdgeRepository};
