//! Wire shapes for the procedure endpoints. Field names are camelCase on
//! the wire except `agentLLM` and the tool switches, which keep their
//! snake_case names in both the agent record and the tools input.

use eckokit_agents::{CreateAgentRequest, ToolSettings, UpdateAgentRequest, UsageSummary};
use eckokit_database::{Agent, AgentLlm, Notification};
use eckokit_provider::Conversation;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: String,
    pub agent_external_id: String,
    pub agent_name: String,
    pub agent_first_message: Option<String>,
    pub agent_prompt: Option<String>,
    #[serde(rename = "agentLLM")]
    pub agent_llm: String,
    pub organization_id: String,
    pub user_id: String,
    #[serde(rename = "end_call_tool")]
    pub end_call_tool: bool,
    #[serde(rename = "skip_turn_tool")]
    pub skip_turn_tool: bool,
    #[serde(rename = "transfer_to_number_tool")]
    pub transfer_to_number_tool: bool,
    #[serde(rename = "transfer_to_number_phone")]
    pub transfer_to_number_phone: Option<String>,
    pub archived: bool,
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Agent> for AgentRecord {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            agent_external_id: agent.external_id,
            agent_name: agent.name,
            agent_first_message: agent.first_message,
            agent_prompt: agent.prompt,
            agent_llm: agent.llm.as_str().to_string(),
            organization_id: agent.organization_id,
            user_id: agent.user_id,
            end_call_tool: agent.end_call_tool,
            skip_turn_tool: agent.skip_turn_tool,
            transfer_to_number_tool: agent.transfer_to_number_tool,
            transfer_to_number_phone: agent.transfer_to_number_phone,
            archived: agent.archived,
            deleted: agent.deleted,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub conversation_id: String,
    pub transcript_summary: Option<String>,
    pub start_time_unix_secs: i64,
    pub call_duration_secs: u64,
    pub status: Option<String>,
}

impl From<Conversation> for ConversationRecord {
    fn from(conversation: Conversation) -> Self {
        Self {
            conversation_id: conversation.conversation_id,
            transcript_summary: conversation.transcript_summary,
            start_time_unix_secs: conversation.start_time_unix_secs,
            call_duration_secs: conversation.call_duration_secs,
            status: conversation.status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Notification> for NotificationRecord {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            read: notification.is_read,
            user_id: notification.user_id,
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}

// Inputs

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentInput {
    pub organization_id: String,
    pub agent_name: String,
    pub agent_first_message: String,
    pub agent_prompt: String,
    #[serde(rename = "agentLLM")]
    #[schema(value_type = String, example = "gpt-4o-mini")]
    pub agent_llm: AgentLlm,
}

impl From<CreateAgentInput> for CreateAgentRequest {
    fn from(input: CreateAgentInput) -> Self {
        Self {
            organization_id: input.organization_id,
            agent_name: input.agent_name,
            agent_first_message: input.agent_first_message,
            agent_prompt: input.agent_prompt,
            agent_llm: input.agent_llm,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentInput {
    pub organization_id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub agent_first_message: String,
    pub agent_prompt: String,
    #[serde(rename = "agentLLM")]
    #[schema(value_type = String, example = "gpt-4o-mini")]
    pub agent_llm: AgentLlm,
}

impl From<UpdateAgentInput> for UpdateAgentRequest {
    fn from(input: UpdateAgentInput) -> Self {
        Self {
            organization_id: input.organization_id,
            agent_id: input.agent_id,
            agent_name: input.agent_name,
            agent_first_message: input.agent_first_message,
            agent_prompt: input.agent_prompt,
            agent_llm: input.agent_llm,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAgentInput {
    pub id: String,
    pub organization_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AgentIdInput {
    pub id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAgentToolsInput {
    pub id: String,
    pub end_call: bool,
    pub skip_turn: bool,
    pub transfer_to_human: bool,
    #[serde(default)]
    pub transfer_to_human_phone: Option<String>,
}

impl UpdateAgentToolsInput {
    pub fn settings(&self) -> ToolSettings {
        ToolSettings {
            end_call: self.end_call,
            skip_turn: self.skip_turn,
            transfer_to_human: self.transfer_to_human,
            transfer_to_human_phone: self.transfer_to_human_phone.clone(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AgentIdQuery {
    pub id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct ConversationsQuery {
    pub agent_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct OrganizationQuery {
    pub organization_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationInput {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationInput {
    pub notification_id: String,
}

// Outputs

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentResponse {
    pub agent_id: String,
    pub agent_external_id: String,
    pub organization_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentMutationResponse {
    pub success: bool,
    pub agent_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAgentResponse {
    pub organization_id: String,
    pub agent_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentResponse {
    pub agent: AgentRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentsResponse {
    pub agents: Vec<AgentRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub total_minutes: f64,
    pub total_calls: usize,
}

impl From<UsageSummary> for UsageResponse {
    fn from(summary: UsageSummary) -> Self {
        Self {
            total_minutes: summary.total_minutes,
            total_calls: summary.total_calls,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub notification: NotificationRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanCreateAgentResponse {
    pub can_create_agent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_input_reads_agent_llm_key() {
        let input: CreateAgentInput = serde_json::from_value(json!({
            "organizationId": "org_1",
            "agentName": "Reception",
            "agentFirstMessage": "Hello",
            "agentPrompt": "Be helpful",
            "agentLLM": "gemini-2.0-flash"
        }))
        .unwrap();

        assert_eq!(input.agent_llm, AgentLlm::Gemini20Flash);
    }

    #[test]
    fn unknown_llm_is_rejected() {
        let result = serde_json::from_value::<CreateAgentInput>(json!({
            "organizationId": "org_1",
            "agentName": "Reception",
            "agentFirstMessage": "Hello",
            "agentPrompt": "Be helpful",
            "agentLLM": "gpt-3"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn tool_input_keeps_snake_case_switches() {
        let input: UpdateAgentToolsInput = serde_json::from_value(json!({
            "id": "a1",
            "end_call": true,
            "skip_turn": false,
            "transfer_to_human": false
        }))
        .unwrap();

        let settings = input.settings();
        assert!(settings.end_call);
        assert!(settings.transfer_to_human_phone.is_none());
    }

    #[test]
    fn agent_record_uses_agent_llm_and_snake_case_tool_keys() {
        let agent = Agent {
            id: "a1".to_string(),
            external_id: "ext_1".to_string(),
            name: "org_1--Reception".to_string(),
            first_message: Some("Hello".to_string()),
            prompt: None,
            llm: AgentLlm::Gpt4o,
            organization_id: "org_1".to_string(),
            user_id: "u1".to_string(),
            end_call_tool: true,
            skip_turn_tool: false,
            transfer_to_number_tool: true,
            transfer_to_number_phone: Some("+61400000000".to_string()),
            archived: true,
            deleted: false,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        };

        let value = serde_json::to_value(AgentRecord::from(agent)).unwrap();

        assert_eq!(value["agentLLM"], "gpt-4o");
        assert_eq!(value["agentExternalId"], "ext_1");
        assert_eq!(value["end_call_tool"], true);
        assert_eq!(value["skip_turn_tool"], false);
        assert_eq!(value["transfer_to_number_tool"], true);
        assert_eq!(value["transfer_to_number_phone"], "+61400000000");
        assert!(value.get("agentLlm").is_none());
        assert!(value.get("endCallTool").is_none());
    }
}
