//! Wire-level tests for the ElevenLabs client.

use eckokit_config::VoiceProviderConfig;
use eckokit_provider::{
    AgentBlueprint, AgentDocument, AgentProvider, BuiltInTools, ConversationQuery,
    ElevenLabsClient, ProviderError,
};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

type TestResult<T = ()> = anyhow::Result<T>;

fn client_for(server: &MockServer) -> ElevenLabsClient {
    let config = VoiceProviderConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.base_url(),
        request_timeout_seconds: 5,
    };
    ElevenLabsClient::from_config(&config).expect("client builds")
}

fn blueprint() -> AgentBlueprint<'static> {
    AgentBlueprint {
        organization_id: "org_1",
        user_id: "u1",
        name: "Reception",
        first_message: Some("Hello"),
        prompt: Some("Answer the phone"),
        llm: "gpt-4o",
        product_tag: "eckokit",
        timezone: "Australia/Sydney",
    }
}

#[test]
fn from_config_requires_api_key() {
    let config = VoiceProviderConfig {
        api_key: Some("   ".to_string()),
        ..VoiceProviderConfig::default()
    };

    let error = ElevenLabsClient::from_config(&config).unwrap_err();
    assert!(matches!(error, ProviderError::ApiKeyMissing));
}

#[tokio::test]
async fn create_agent_posts_document_with_api_key() -> TestResult {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/convai/agents/create")
                .header("xi-api-key", "test-key")
                .json_body_partial(
                    json!({
                        "name": "org_1--Reception",
                        "tags": ["eckokit", "user_u1", "organization_org_1"],
                        "platform_settings": { "archived": true }
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({ "agent_id": "agent_123" }));
        })
        .await;

    let created = client_for(&server)
        .create_agent(&AgentDocument::for_new_agent(&blueprint()))
        .await?;

    mock.assert_async().await;
    assert_eq!(created.agent_id, "agent_123");
    Ok(())
}

#[tokio::test]
async fn update_agent_patches_agent_resource() -> TestResult {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/convai/agents/agent_123")
                .header("xi-api-key", "test-key")
                .json_body(json!({
                    "conversation_config": {
                        "agent": {
                            "prompt": {
                                "built_in_tools": {
                                    "end_call": {
                                        "name": "end_call",
                                        "params": { "system_tool_type": "end_call" }
                                    }
                                }
                            }
                        }
                    }
                }));
            then.status(200).json_body(json!({ "agent_id": "agent_123" }));
        })
        .await;

    client_for(&server)
        .update_agent(
            "agent_123",
            &AgentDocument::built_in_tools(BuiltInTools::from_switches(true, false, None)),
        )
        .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn list_conversations_sends_cursor_and_summary_mode() -> TestResult {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/convai/conversations")
                .query_param("agent_id", "agent_123")
                .query_param("cursor", "page-2")
                .query_param("summary_mode", "include");
            then.status(200).json_body(json!({
                "conversations": [
                    {
                        "agent_id": "agent_123",
                        "conversation_id": "conv_1",
                        "start_time_unix_secs": 1_700_000_000,
                        "call_duration_secs": 125,
                        "status": "done",
                        "transcript_summary": "Caller booked a table."
                    }
                ],
                "next_cursor": "page-3",
                "has_more": true
            }));
        })
        .await;

    let page = client_for(&server)
        .list_conversations(&ConversationQuery {
            agent_id: "agent_123".to_string(),
            cursor: Some("page-2".to_string()),
            include_summary: true,
        })
        .await?;

    mock.assert_async().await;
    assert!(page.has_more);
    assert_eq!(page.next_cursor.as_deref(), Some("page-3"));
    assert_eq!(page.conversations.len(), 1);
    assert_eq!(page.conversations[0].call_duration_secs, 125);
    assert_eq!(
        page.conversations[0].transcript_summary.as_deref(),
        Some("Caller booked a table.")
    );
    Ok(())
}

#[tokio::test]
async fn error_status_is_reported_with_body() -> TestResult {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path("/v1/convai/agents/missing");
            then.status(404).body(r#"{"detail":"agent not found"}"#);
        })
        .await;

    let error = client_for(&server)
        .update_agent("missing", &AgentDocument::archived(true))
        .await
        .unwrap_err();

    match error {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("agent not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn malformed_payload_is_a_response_error() -> TestResult {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/convai/agents/create");
            then.status(200).body("not json");
        })
        .await;

    let error = client_for(&server)
        .create_agent(&AgentDocument::for_new_agent(&blueprint()))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Response(_)));
    Ok(())
}
