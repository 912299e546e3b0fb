//! Per-organization call usage, aggregated from the provider's
//! conversation history.

use std::sync::Arc;

use eckokit_database::{AgentRepository, OrganizationRepository};
use eckokit_provider::{AgentProvider, Conversation, ConversationQuery};
use sqlx::SqlitePool;
use tracing::debug;

use crate::types::{ServiceError, ServiceResult, UsageSummary};

#[derive(Clone)]
pub struct UsageService {
    agents: AgentRepository,
    organizations: OrganizationRepository,
    provider: Arc<dyn AgentProvider>,
}

impl UsageService {
    pub fn new(pool: SqlitePool, provider: Arc<dyn AgentProvider>) -> Self {
        Self {
            agents: AgentRepository::new(pool.clone()),
            organizations: OrganizationRepository::new(pool),
            provider,
        }
    }

    /// Total calls and minutes across every agent the organization ever had.
    /// Agents and their pages are walked one at a time.
    pub async fn usage_for_organization(&self, organization_id: &str) -> ServiceResult<UsageSummary> {
        if self.organizations.find_by_id(organization_id).await?.is_none() {
            return Err(ServiceError::OrganizationNotFound);
        }

        let agents = self.agents.list_by_organization(organization_id).await?;
        if agents.is_empty() {
            return Err(ServiceError::AgentsNotFound);
        }

        let mut conversations = Vec::new();
        for agent in &agents {
            let mut pages =
                collect_conversations(self.provider.as_ref(), &agent.external_id, false).await?;
            conversations.append(&mut pages);
        }

        let summary = UsageSummary::from_conversations(&conversations);
        debug!(
            organization_id,
            agents = agents.len(),
            total_calls = summary.total_calls,
            "usage aggregated"
        );
        Ok(summary)
    }
}

/// Follow the provider's cursor until it reports no more pages.
pub async fn collect_conversations(
    provider: &dyn AgentProvider,
    external_agent_id: &str,
    include_summary: bool,
) -> ServiceResult<Vec<Conversation>> {
    let mut conversations = Vec::new();
    let mut cursor = None;

    loop {
        let page = provider
            .list_conversations(&ConversationQuery {
                agent_id: external_agent_id.to_string(),
                cursor: cursor.take(),
                include_summary,
            })
            .await?;

        conversations.extend(page.conversations);

        // A provider claiming more pages without a cursor would loop forever.
        match page.next_cursor {
            Some(next) if page.has_more => cursor = Some(next),
            _ => break,
        }
    }

    Ok(conversations)
}
