//! Outputs produced by the domain services.

use eckokit_provider::Conversation;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total_minutes: f64,
    pub total_calls: usize,
}

impl UsageSummary {
    pub fn from_conversations(conversations: &[Conversation]) -> Self {
        let total_minutes = conversations
            .iter()
            .map(|conversation| conversation.call_duration_secs as f64 / 60.0)
            .sum();

        Self {
            total_minutes,
            total_calls: conversations.len(),
        }
    }
}
