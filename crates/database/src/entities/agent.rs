//! Voice agent entity definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language models an agent may be configured with on the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentLlm {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
}

impl AgentLlm {
    pub const ALL: [AgentLlm; 6] = [
        AgentLlm::Gpt4oMini,
        AgentLlm::Gpt4o,
        AgentLlm::Gpt41Mini,
        AgentLlm::Gpt41,
        AgentLlm::Gemini20Flash,
        AgentLlm::Gemini25Flash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentLlm::Gpt4oMini => "gpt-4o-mini",
            AgentLlm::Gpt4o => "gpt-4o",
            AgentLlm::Gpt41Mini => "gpt-4.1-mini",
            AgentLlm::Gpt41 => "gpt-4.1",
            AgentLlm::Gemini20Flash => "gemini-2.0-flash",
            AgentLlm::Gemini25Flash => "gemini-2.5-flash",
        }
    }
}

impl fmt::Display for AgentLlm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentLlm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentLlm::ALL
            .into_iter()
            .find(|llm| llm.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Local mirror of an agent hosted by the voice provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub first_message: Option<String>,
    pub prompt: Option<String>,
    pub llm: AgentLlm,
    pub organization_id: String,
    pub user_id: String,
    pub end_call_tool: bool,
    pub skip_turn_tool: bool,
    pub transfer_to_number_tool: bool,
    pub transfer_to_number_phone: Option<String>,
    pub archived: bool,
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewAgent {
    pub external_id: String,
    pub name: String,
    pub first_message: Option<String>,
    pub prompt: Option<String>,
    pub llm: AgentLlm,
    pub organization_id: String,
    pub user_id: String,
}

/// Fields rewritten by an agent update.
#[derive(Debug, Clone)]
pub struct AgentDetailsUpdate {
    pub name: String,
    pub first_message: Option<String>,
    pub prompt: Option<String>,
    pub llm: AgentLlm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentToolsUpdate {
    pub end_call: bool,
    pub skip_turn: bool,
    pub transfer_to_number: bool,
    pub transfer_to_number_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_round_trips_through_its_wire_name() {
        for llm in AgentLlm::ALL {
            assert_eq!(llm.as_str().parse::<AgentLlm>(), Ok(llm));
        }
    }

    #[test]
    fn llm_rejects_unknown_models() {
        assert_eq!("gpt-3.5".parse::<AgentLlm>(), Err("gpt-3.5".to_string()));
    }
}
