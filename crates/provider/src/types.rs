//! Wire documents exchanged with the voice-agent platform.
//!
//! Field names follow the provider's snake_case JSON. Every section is
//! optional so the same document doubles as a partial update.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const TURN_TIMEOUT_SECS: u32 = 10;
pub const SILENCE_END_CALL_TIMEOUT_SECS: u32 = 10;
pub const MAX_CONVERSATION_DURATION_SECS: u32 = 180;
pub const TTS_MODEL_ID: &str = "eleven_flash_v2";
pub const AGENT_CONCURRENCY_LIMIT: u32 = 1;
pub const DAILY_CALL_LIMIT: u32 = 20;
pub const RETENTION_DAYS: u32 = 7;
pub const TRANSFER_CONDITION: &str = "When the caller wants to talk to a human";

/// Name under which an agent is registered remotely.
pub fn remote_agent_name(organization_id: &str, name: &str) -> String {
    format!("{organization_id}--{name}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_config: Option<ConversationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_settings: Option<PlatformSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<TtsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnConfig {
    pub turn_timeout: u32,
    pub silence_end_call_timeout: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TtsConfig {
    pub model_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationLimits {
    pub max_duration_seconds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_first_message_interruptions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_in_tools: Option<BuiltInTools>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_limits: Option<CallLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacySettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallLimits {
    pub agent_concurrency_limit: u32,
    pub daily_limit: u32,
    pub bursting_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivacySettings {
    pub retention_days: u32,
    pub delete_audio: bool,
    pub delete_transcript_and_pii: bool,
    pub apply_to_existing_conversations: bool,
}

/// Everything needed to register a brand new agent.
#[derive(Debug, Clone)]
pub struct AgentBlueprint<'a> {
    pub organization_id: &'a str,
    pub user_id: &'a str,
    pub name: &'a str,
    pub first_message: Option<&'a str>,
    pub prompt: Option<&'a str>,
    pub llm: &'a str,
    pub product_tag: &'a str,
    pub timezone: &'a str,
}

impl AgentDocument {
    /// Full document for agent creation, carrying the platform defaults.
    /// New agents start archived so nothing answers calls until published.
    pub fn for_new_agent(blueprint: &AgentBlueprint<'_>) -> Self {
        Self {
            name: Some(remote_agent_name(blueprint.organization_id, blueprint.name)),
            tags: vec![
                blueprint.product_tag.to_string(),
                format!("user_{}", blueprint.user_id),
                format!("organization_{}", blueprint.organization_id),
            ],
            conversation_config: Some(ConversationConfig {
                turn: Some(TurnConfig {
                    turn_timeout: TURN_TIMEOUT_SECS,
                    silence_end_call_timeout: SILENCE_END_CALL_TIMEOUT_SECS,
                }),
                tts: Some(TtsConfig {
                    model_id: TTS_MODEL_ID.to_string(),
                }),
                conversation: Some(ConversationLimits {
                    max_duration_seconds: MAX_CONVERSATION_DURATION_SECS,
                }),
                agent: Some(AgentConfig {
                    first_message: blueprint.first_message.map(str::to_string),
                    disable_first_message_interruptions: Some(true),
                    prompt: Some(PromptConfig {
                        prompt: blueprint.prompt.map(str::to_string),
                        llm: Some(blueprint.llm.to_string()),
                        timezone: Some(blueprint.timezone.to_string()),
                        built_in_tools: None,
                    }),
                }),
            }),
            platform_settings: Some(PlatformSettings {
                archived: Some(true),
                call_limits: Some(CallLimits {
                    agent_concurrency_limit: AGENT_CONCURRENCY_LIMIT,
                    daily_limit: DAILY_CALL_LIMIT,
                    bursting_enabled: false,
                }),
                privacy: Some(PrivacySettings {
                    retention_days: RETENTION_DAYS,
                    delete_audio: true,
                    delete_transcript_and_pii: true,
                    apply_to_existing_conversations: true,
                }),
            }),
        }
    }

    /// Partial update for the user-editable fields.
    pub fn details(
        organization_id: &str,
        name: &str,
        first_message: Option<&str>,
        prompt: Option<&str>,
        llm: &str,
    ) -> Self {
        Self {
            name: Some(remote_agent_name(organization_id, name)),
            conversation_config: Some(ConversationConfig {
                agent: Some(AgentConfig {
                    first_message: first_message.map(str::to_string),
                    prompt: Some(PromptConfig {
                        prompt: prompt.map(str::to_string),
                        llm: Some(llm.to_string()),
                        ..PromptConfig::default()
                    }),
                    ..AgentConfig::default()
                }),
                ..ConversationConfig::default()
            }),
            ..Self::default()
        }
    }

    pub fn archived(archived: bool) -> Self {
        Self {
            platform_settings: Some(PlatformSettings {
                archived: Some(archived),
                ..PlatformSettings::default()
            }),
            ..Self::default()
        }
    }

    /// Replaces the agent's complete built-in tool set.
    pub fn built_in_tools(tools: BuiltInTools) -> Self {
        Self {
            conversation_config: Some(ConversationConfig {
                agent: Some(AgentConfig {
                    prompt: Some(PromptConfig {
                        built_in_tools: Some(tools),
                        ..PromptConfig::default()
                    }),
                    ..AgentConfig::default()
                }),
                ..ConversationConfig::default()
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemToolType {
    EndCall,
    SkipTurn,
    TransferToNumber,
}

impl SystemToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemToolType::EndCall => "end_call",
            SystemToolType::SkipTurn => "skip_turn",
            SystemToolType::TransferToNumber => "transfer_to_number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemTool {
    pub name: String,
    pub params: SystemToolParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemToolParams {
    pub system_tool_type: SystemToolType,
    /// Not part of the provider's published schema, but required by the live API.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<PhoneTransfer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneTransfer {
    pub condition: String,
    pub phone_number: String,
    pub transfer_destination: TransferDestination,
    pub transfer_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferDestination {
    Phone { phone_number: String },
}

/// The complete built-in tool map, keyed by tool type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BuiltInTools(BTreeMap<SystemToolType, SystemTool>);

impl BuiltInTools {
    /// Builds the map from the three tool switches. `transfer_phone` enables
    /// the transfer tool when present.
    pub fn from_switches(end_call: bool, skip_turn: bool, transfer_phone: Option<&str>) -> Self {
        let mut tools = BTreeMap::new();

        if end_call {
            tools.insert(SystemToolType::EndCall, system_tool(SystemToolType::EndCall, Vec::new()));
        }
        if skip_turn {
            tools.insert(SystemToolType::SkipTurn, system_tool(SystemToolType::SkipTurn, Vec::new()));
        }
        if let Some(phone) = transfer_phone {
            let transfer = PhoneTransfer {
                condition: TRANSFER_CONDITION.to_string(),
                phone_number: phone.to_string(),
                transfer_destination: TransferDestination::Phone {
                    phone_number: phone.to_string(),
                },
                transfer_type: "conference".to_string(),
            };
            tools.insert(
                SystemToolType::TransferToNumber,
                system_tool(SystemToolType::TransferToNumber, vec![transfer]),
            );
        }

        Self(tools)
    }

    pub fn contains(&self, tool: SystemToolType) -> bool {
        self.0.contains_key(&tool)
    }

    pub fn get(&self, tool: SystemToolType) -> Option<&SystemTool> {
        self.0.get(&tool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn system_tool(tool: SystemToolType, transfers: Vec<PhoneTransfer>) -> SystemTool {
    SystemTool {
        name: tool.as_str().to_string(),
        params: SystemToolParams {
            system_tool_type: tool,
            transfers,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedAgent {
    pub agent_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationQuery {
    pub agent_id: String,
    pub cursor: Option<String>,
    pub include_summary: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub transcript_summary: Option<String>,
    #[serde(default)]
    pub start_time_unix_secs: i64,
    #[serde(default)]
    pub call_duration_secs: u64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversationPage {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blueprint() -> AgentBlueprint<'static> {
        AgentBlueprint {
            organization_id: "org_1",
            user_id: "u1",
            name: "Reception",
            first_message: Some("Hi there"),
            prompt: Some("Be helpful"),
            llm: "gpt-4o-mini",
            product_tag: "eckokit",
            timezone: "Australia/Sydney",
        }
    }

    #[test]
    fn new_agent_document_carries_platform_defaults() {
        let value = serde_json::to_value(AgentDocument::for_new_agent(&blueprint())).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "org_1--Reception",
                "tags": ["eckokit", "user_u1", "organization_org_1"],
                "conversation_config": {
                    "turn": { "turn_timeout": 10, "silence_end_call_timeout": 10 },
                    "tts": { "model_id": "eleven_flash_v2" },
                    "conversation": { "max_duration_seconds": 180 },
                    "agent": {
                        "first_message": "Hi there",
                        "disable_first_message_interruptions": true,
                        "prompt": {
                            "prompt": "Be helpful",
                            "llm": "gpt-4o-mini",
                            "timezone": "Australia/Sydney"
                        }
                    }
                },
                "platform_settings": {
                    "archived": true,
                    "call_limits": {
                        "agent_concurrency_limit": 1,
                        "daily_limit": 20,
                        "bursting_enabled": false
                    },
                    "privacy": {
                        "retention_days": 7,
                        "delete_audio": true,
                        "delete_transcript_and_pii": true,
                        "apply_to_existing_conversations": true
                    }
                }
            })
        );
    }

    #[test]
    fn archive_patch_only_touches_platform_settings() {
        let value = serde_json::to_value(AgentDocument::archived(false)).unwrap();
        assert_eq!(value, json!({ "platform_settings": { "archived": false } }));
    }

    #[test]
    fn details_patch_prefixes_name_with_organization() {
        let value = serde_json::to_value(AgentDocument::details(
            "org_9",
            "Sales",
            None,
            Some("Sell"),
            "gpt-4.1",
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({
                "name": "org_9--Sales",
                "conversation_config": {
                    "agent": { "prompt": { "prompt": "Sell", "llm": "gpt-4.1" } }
                }
            })
        );
    }

    #[test]
    fn tool_map_contains_only_enabled_tools() {
        let tools = BuiltInTools::from_switches(true, false, None);
        assert_eq!(tools.len(), 1);
        assert!(tools.contains(SystemToolType::EndCall));
        assert!(!tools.contains(SystemToolType::SkipTurn));

        assert!(BuiltInTools::from_switches(false, false, None).is_empty());
    }

    #[test]
    fn transfer_tool_serializes_conference_transfer() {
        let tools = BuiltInTools::from_switches(false, true, Some("+61400000000"));
        let value = serde_json::to_value(&tools).unwrap();

        assert_eq!(
            value,
            json!({
                "skip_turn": {
                    "name": "skip_turn",
                    "params": { "system_tool_type": "skip_turn" }
                },
                "transfer_to_number": {
                    "name": "transfer_to_number",
                    "params": {
                        "system_tool_type": "transfer_to_number",
                        "transfers": [{
                            "condition": "When the caller wants to talk to a human",
                            "phone_number": "+61400000000",
                            "transfer_destination": { "type": "phone", "phone_number": "+61400000000" },
                            "transfer_type": "conference"
                        }]
                    }
                }
            })
        );
    }

    #[test]
    fn conversation_page_tolerates_missing_fields() {
        let page: ConversationPage = serde_json::from_value(json!({
            "conversations": [{ "conversation_id": "c1", "call_duration_secs": 42 }]
        }))
        .unwrap();

        assert!(!page.has_more);
        assert_eq!(page.next_cursor, None);
        assert_eq!(page.conversations[0].call_duration_secs, 42);
        assert_eq!(page.conversations[0].transcript_summary, None);
    }
}
