//! Agent lifecycle: local records kept in step with the voice provider.
//!
//! Every mutation calls the provider first and writes the local row only
//! after the remote call succeeded. The two writes are not atomic: if the
//! local write fails after a successful remote call, the provider keeps the
//! change and no reconciliation runs. Closing that window needs an outbox or
//! a reconciliation job.

use std::sync::Arc;

use eckokit_config::AgentDefaultsConfig;
use eckokit_database::{
    Agent, AgentDetailsUpdate, AgentRepository, AgentToolsUpdate, NewAgent,
    OrganizationRepository,
};
use eckokit_provider::{
    AgentBlueprint, AgentDocument, AgentProvider, BuiltInTools, Conversation,
};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::services::usage_service::collect_conversations;
use crate::types::{
    CreateAgentRequest, ServiceError, ServiceResult, ToolSettings, UpdateAgentRequest,
};
use crate::utils::Validator;

#[derive(Clone)]
pub struct AgentService {
    agents: AgentRepository,
    organizations: OrganizationRepository,
    provider: Arc<dyn AgentProvider>,
    defaults: AgentDefaultsConfig,
}

impl AgentService {
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn AgentProvider>,
        defaults: AgentDefaultsConfig,
    ) -> Self {
        Self {
            agents: AgentRepository::new(pool.clone()),
            organizations: OrganizationRepository::new(pool),
            provider,
            defaults,
        }
    }

    /// Create an agent remotely, then record it locally.
    ///
    /// The organization's subscription is checked again here even though
    /// callers usually consult [`MembershipService`](crate::MembershipService)
    /// first. New agents start archived.
    pub async fn create_agent(
        &self,
        user_id: &str,
        request: &CreateAgentRequest,
    ) -> ServiceResult<Agent> {
        Validator::required("Agent name", &request.agent_name)?;
        Validator::required("First message", &request.agent_first_message)?;
        Validator::required("Prompt", &request.agent_prompt)?;

        let subscription = self
            .organizations
            .find_active_subscription(&request.organization_id)
            .await?;
        if subscription.is_none() {
            warn!(
                organization_id = %request.organization_id,
                "agent creation refused without an active subscription"
            );
            return Err(ServiceError::NoActiveSubscription);
        }

        let document = AgentDocument::for_new_agent(&AgentBlueprint {
            organization_id: &request.organization_id,
            user_id,
            name: &request.agent_name,
            first_message: Some(&request.agent_first_message),
            prompt: Some(&request.agent_prompt),
            llm: request.agent_llm.as_str(),
            product_tag: &self.defaults.product_tag,
            timezone: &self.defaults.timezone,
        });

        let created = self.provider.create_agent(&document).await.map_err(|e| {
            error!(organization_id = %request.organization_id, error = %e, "provider agent creation failed");
            e
        })?;

        let agent = self
            .agents
            .create(&NewAgent {
                external_id: created.agent_id,
                name: request.agent_name.clone(),
                first_message: Some(request.agent_first_message.clone()),
                prompt: Some(request.agent_prompt.clone()),
                llm: request.agent_llm,
                organization_id: request.organization_id.clone(),
                user_id: user_id.to_string(),
            })
            .await?;

        info!(
            agent_id = %agent.id,
            external_id = %agent.external_id,
            organization_id = %agent.organization_id,
            "agent created"
        );
        Ok(agent)
    }

    /// Push edited details to the provider, then store them.
    pub async fn update_agent(&self, request: &UpdateAgentRequest) -> ServiceResult<Agent> {
        Validator::required("Agent name", &request.agent_name)?;
        Validator::required("First message", &request.agent_first_message)?;
        Validator::required("Prompt", &request.agent_prompt)?;

        let agent = self.active_agent(&request.agent_id).await?;

        let document = AgentDocument::details(
            &request.organization_id,
            &request.agent_name,
            Some(&request.agent_first_message),
            Some(&request.agent_prompt),
            request.agent_llm.as_str(),
        );
        self.provider.update_agent(&agent.external_id, &document).await?;

        self.agents
            .update_details(
                &agent.id,
                &AgentDetailsUpdate {
                    name: request.agent_name.clone(),
                    first_message: Some(request.agent_first_message.clone()),
                    prompt: Some(request.agent_prompt.clone()),
                    llm: request.agent_llm,
                },
            )
            .await?;

        info!(agent_id = %agent.id, "agent details updated");
        self.active_agent(&agent.id).await
    }

    /// Publish an archived agent or unpublish a live one.
    pub async fn toggle_agent(&self, id: &str, organization_id: &str) -> ServiceResult<Agent> {
        let agent = self
            .agents
            .find_active_in_organization(id, organization_id)
            .await?
            .ok_or(ServiceError::AgentNotFound)?;

        let archived = !agent.archived;
        self.provider
            .update_agent(&agent.external_id, &AgentDocument::archived(archived))
            .await?;

        let updated = self
            .agents
            .set_archived(&agent.id, archived)
            .await?
            .ok_or(ServiceError::AgentNotFound)?;

        info!(agent_id = %updated.id, archived, "agent toggled");
        Ok(updated)
    }

    /// Soft delete. The remote agent is archived, never removed.
    pub async fn delete_agent(&self, id: &str) -> ServiceResult<Agent> {
        let agent = self
            .agents
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::AgentNotFound)?;

        self.provider
            .update_agent(&agent.external_id, &AgentDocument::archived(true))
            .await?;
        self.agents.mark_deleted(&agent.id).await?;
        info!(agent_id = %agent.id, "agent deleted");

        self.agents
            .find_by_id(&agent.id)
            .await?
            .ok_or(ServiceError::AgentNotFound)
    }

    /// Replace the agent's full built-in tool set.
    pub async fn update_tools(&self, id: &str, settings: &ToolSettings) -> ServiceResult<Agent> {
        let agent = self.active_agent(id).await?;

        let phone = Validator::transfer_phone(
            settings.transfer_to_human,
            settings.transfer_to_human_phone.as_deref(),
        )
        .map_err(|e| {
            warn!(agent_id = %agent.id, "tool update rejected: {e}");
            e
        })?;

        let tools = BuiltInTools::from_switches(
            settings.end_call,
            settings.skip_turn,
            phone.as_deref().filter(|_| settings.transfer_to_human),
        );
        self.provider
            .update_agent(&agent.external_id, &AgentDocument::built_in_tools(tools))
            .await
            .map_err(|e| {
                error!(agent_id = %agent.id, error = %e, "provider rejected tool update");
                ServiceError::ToolUpdateFailed(e)
            })?;

        self.agents
            .update_tools(
                &agent.id,
                &AgentToolsUpdate {
                    end_call: settings.end_call,
                    skip_turn: settings.skip_turn,
                    transfer_to_number: settings.transfer_to_human,
                    transfer_to_number_phone: phone,
                },
            )
            .await?;

        info!(agent_id = %agent.id, "agent tools updated");
        self.active_agent(&agent.id).await
    }

    pub async fn get_agent(&self, id: &str) -> ServiceResult<Agent> {
        self.active_agent(id).await
    }

    /// Every agent of the organization, archived and deleted included.
    /// An unknown organization simply has no agents.
    pub async fn list_agents(&self, organization_id: &str) -> ServiceResult<Vec<Agent>> {
        if self.organizations.find_by_id(organization_id).await?.is_none() {
            return Ok(Vec::new());
        }
        Ok(self.agents.list_by_organization(organization_id).await?)
    }

    /// All of the agent's conversations with summaries, across every page.
    pub async fn conversations(&self, agent_id: &str) -> ServiceResult<Vec<Conversation>> {
        let agent = self.active_agent(agent_id).await?;
        collect_conversations(self.provider.as_ref(), &agent.external_id, true).await
    }

    async fn active_agent(&self, id: &str) -> ServiceResult<Agent> {
        self.agents
            .find_active_by_id(id)
            .await?
            .ok_or(ServiceError::AgentNotFound)
    }
}
