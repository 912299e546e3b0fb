//! Business logic for agents, usage, membership and notifications.
//!
//! Services own their repositories and, where remote state is involved, a
//! shared [`AgentProvider`](eckokit_provider::AgentProvider) handle.

pub mod agent_service;
pub mod membership_service;
pub mod notification_service;
pub mod usage_service;

pub use agent_service::AgentService;
pub use membership_service::MembershipService;
pub use notification_service::NotificationService;
pub use usage_service::{collect_conversations, UsageService};
