//! Domain entities for the database layer

pub mod agent;
pub mod notification;
pub mod organization;

pub use agent::{Agent, AgentDetailsUpdate, AgentLlm, AgentToolsUpdate, NewAgent};
pub use notification::{CreateNotificationRequest, Notification};
pub use organization::{Membership, Organization, Subscription, SubscriptionStatus};
