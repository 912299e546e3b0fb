use std::time::Duration;

use async_trait::async_trait;
use eckokit_config::VoiceProviderConfig;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::types::{AgentDocument, ConversationPage, ConversationQuery, CreatedAgent};
use crate::{AgentProvider, ProviderError};

const API_KEY_HEADER: &str = "xi-api-key";

/// REST client for the ElevenLabs conversational AI endpoints.
#[derive(Clone)]
pub struct ElevenLabsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for ElevenLabsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ElevenLabsClient {
    pub fn from_config(config: &VoiceProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::ApiKeyMissing)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        debug!(base_url = %config.base_url, "initialising voice provider client");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ProviderError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "voice provider rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AgentProvider for ElevenLabsClient {
    async fn create_agent(&self, document: &AgentDocument) -> Result<CreatedAgent, ProviderError> {
        let request = self
            .http
            .post(self.url("/v1/convai/agents/create"))
            .json(document);
        let created: CreatedAgent = self.send_json(request).await?;
        debug!(agent_id = %created.agent_id, "provider agent created");
        Ok(created)
    }

    async fn update_agent(
        &self,
        agent_id: &str,
        document: &AgentDocument,
    ) -> Result<(), ProviderError> {
        let request = self
            .http
            .patch(self.url(&format!("/v1/convai/agents/{agent_id}")))
            .json(document);
        self.send(request).await?;
        debug!(agent_id, "provider agent updated");
        Ok(())
    }

    async fn list_conversations(
        &self,
        query: &ConversationQuery,
    ) -> Result<ConversationPage, ProviderError> {
        let mut params: Vec<(&str, &str)> = vec![("agent_id", query.agent_id.as_str())];
        if let Some(cursor) = query.cursor.as_deref() {
            params.push(("cursor", cursor));
        }
        if query.include_summary {
            params.push(("summary_mode", "include"));
        }

        let request = self
            .http
            .get(self.url("/v1/convai/conversations"))
            .query(&params);
        self.send_json(request).await
    }
}
