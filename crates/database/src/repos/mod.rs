//! Database repository implementations

pub mod agent_repository;
pub mod notification_repository;
pub mod organization_repository;

pub use agent_repository::AgentRepository;
pub use notification_repository::NotificationRepository;
pub use organization_repository::OrganizationRepository;
