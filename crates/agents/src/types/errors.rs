//! Error types surfaced by the domain services.

use eckokit_database::DatabaseError;
use eckokit_provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Agent not found")]
    AgentNotFound,

    #[error("Agents not found")]
    AgentsNotFound,

    #[error("Organization not found")]
    OrganizationNotFound,

    #[error("Notification not found")]
    NotificationNotFound,

    #[error("Organization does not have an active subscription")]
    NoActiveSubscription,

    #[error("{0}")]
    Validation(String),

    #[error("Error updating agent tools")]
    ToolUpdateFailed(#[source] ProviderError),

    #[error("Voice provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
