//! In-memory [`AgentProvider`] that records every call.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::types::{AgentDocument, Conversation, ConversationPage, ConversationQuery, CreatedAgent};
use crate::{AgentProvider, ProviderError};

#[derive(Default)]
struct FakeState {
    next_agent: u32,
    failing: bool,
    created: Vec<AgentDocument>,
    updates: Vec<(String, AgentDocument)>,
    pages: HashMap<String, Vec<Vec<Conversation>>>,
    page_requests: Vec<ConversationQuery>,
}

/// Cursors handed out are the index of the next page as a string.
#[derive(Default)]
pub struct FakeAgentProvider {
    state: Mutex<FakeState>,
}

impl FakeAgentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with a 500 from the "provider".
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn set_conversation_pages(&self, agent_id: &str, pages: Vec<Vec<Conversation>>) {
        self.lock().pages.insert(agent_id.to_string(), pages);
    }

    pub fn created(&self) -> Vec<AgentDocument> {
        self.lock().created.clone()
    }

    pub fn updates(&self) -> Vec<(String, AgentDocument)> {
        self.lock().updates.clone()
    }

    pub fn page_requests(&self) -> Vec<ConversationQuery> {
        self.lock().page_requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn unavailable() -> ProviderError {
    ProviderError::Status {
        status: 500,
        body: "provider unavailable".to_string(),
    }
}

/// Conversation with the given duration, for usage fixtures.
pub fn conversation(id: &str, call_duration_secs: u64) -> Conversation {
    Conversation {
        conversation_id: id.to_string(),
        agent_id: None,
        transcript_summary: Some(format!("summary of {id}")),
        start_time_unix_secs: 1_700_000_000,
        call_duration_secs,
        status: Some("done".to_string()),
    }
}

#[async_trait]
impl AgentProvider for FakeAgentProvider {
    async fn create_agent(&self, document: &AgentDocument) -> Result<CreatedAgent, ProviderError> {
        let mut state = self.lock();
        if state.failing {
            return Err(unavailable());
        }
        state.next_agent += 1;
        state.created.push(document.clone());
        Ok(CreatedAgent {
            agent_id: format!("ext_{}", state.next_agent),
        })
    }

    async fn update_agent(
        &self,
        agent_id: &str,
        document: &AgentDocument,
    ) -> Result<(), ProviderError> {
        let mut state = self.lock();
        if state.failing {
            return Err(unavailable());
        }
        state.updates.push((agent_id.to_string(), document.clone()));
        Ok(())
    }

    async fn list_conversations(
        &self,
        query: &ConversationQuery,
    ) -> Result<ConversationPage, ProviderError> {
        let mut state = self.lock();
        if state.failing {
            return Err(unavailable());
        }
        state.page_requests.push(query.clone());

        let index = match query.cursor.as_deref() {
            Some(cursor) => cursor.parse::<usize>().map_err(|_| ProviderError::Status {
                status: 400,
                body: format!("invalid cursor {cursor}"),
            })?,
            None => 0,
        };

        let pages = state.pages.get(&query.agent_id).cloned().unwrap_or_default();
        let conversations = pages.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < pages.len();

        Ok(ConversationPage {
            conversations,
            next_cursor: has_more.then(|| (index + 1).to_string()),
            has_more,
        })
    }
}
