//! Adapter for the hosted voice-agent platform.
//!
//! [`AgentProvider`] is the seam the domain services call through. The
//! production implementation is [`ElevenLabsClient`]; tests plug in the fake
//! from `test_support` (feature `test-support`).

use async_trait::async_trait;
use thiserror::Error;

mod client;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::ElevenLabsClient;
pub use types::{
    remote_agent_name, AgentBlueprint, AgentDocument, BuiltInTools, Conversation,
    ConversationPage, ConversationQuery, CreatedAgent, SystemToolType,
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("missing voice provider API key")]
    ApiKeyMissing,
    #[error("provider http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid provider response: {0}")]
    Response(#[from] serde_json::Error),
}

#[async_trait]
pub trait AgentProvider: Send + Sync {
    async fn create_agent(&self, document: &AgentDocument) -> Result<CreatedAgent, ProviderError>;

    async fn update_agent(
        &self,
        agent_id: &str,
        document: &AgentDocument,
    ) -> Result<(), ProviderError>;

    /// One page of an agent's conversations.
    async fn list_conversations(
        &self,
        query: &ConversationQuery,
    ) -> Result<ConversationPage, ProviderError>;
}
