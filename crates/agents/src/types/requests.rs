//! Inputs accepted by the agent services.

use eckokit_database::AgentLlm;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgentRequest {
    pub organization_id: String,
    pub agent_name: String,
    pub agent_first_message: String,
    pub agent_prompt: String,
    pub agent_llm: AgentLlm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgentRequest {
    pub organization_id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub agent_first_message: String,
    pub agent_prompt: String,
    pub agent_llm: AgentLlm,
}

/// The three built-in tool switches plus the transfer destination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolSettings {
    pub end_call: bool,
    pub skip_turn: bool,
    pub transfer_to_human: bool,
    pub transfer_to_human_phone: Option<String>,
}
