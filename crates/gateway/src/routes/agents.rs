//! Agent procedures under `/api/agents`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;

use crate::error::ErrorResponse;
use crate::middleware::CurrentUser;
use crate::routes::models::{
    AgentIdInput, AgentIdQuery, AgentMutationResponse, AgentRecord, AgentResponse,
    AgentsResponse, ConversationRecord, ConversationsQuery, ConversationsResponse,
    CreateAgentInput, CreateAgentResponse, DeleteAgentResponse, OrganizationQuery,
    ToggleAgentInput, UpdateAgentInput, UpdateAgentToolsInput, UsageResponse,
};
use crate::util::{json_body, query_params};
use crate::{ApiError, AppState};

#[utoipa::path(
    post,
    path = "/api/agents/createAgent",
    tag = "Agents",
    request_body = CreateAgentInput,
    responses(
        (status = 200, description = "Agent created on the provider and recorded", body = CreateAgentResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "No active subscription", body = ErrorResponse),
        (status = 502, description = "Voice provider failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_agent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateAgentInput>, JsonRejection>,
) -> Result<Json<CreateAgentResponse>, ApiError> {
    let input = json_body(payload)?;
    let agent = state.agents().create_agent(&user.id, &input.into()).await?;

    Ok(Json(CreateAgentResponse {
        agent_id: agent.id,
        agent_external_id: agent.external_id,
        organization_id: agent.organization_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/agents/updateAgentById",
    tag = "Agents",
    request_body = UpdateAgentInput,
    responses(
        (status = 200, description = "Agent details updated", body = AgentMutationResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_agent_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    payload: Result<Json<UpdateAgentInput>, JsonRejection>,
) -> Result<Json<AgentMutationResponse>, ApiError> {
    let input = json_body(payload)?;
    let agent = state.agents().update_agent(&input.into()).await?;

    Ok(Json(AgentMutationResponse {
        success: true,
        agent_id: agent.id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/agents/toggleAgentById",
    tag = "Agents",
    request_body = ToggleAgentInput,
    responses(
        (status = 200, description = "Archived flag flipped", body = AgentResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn toggle_agent_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    payload: Result<Json<ToggleAgentInput>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let input = json_body(payload)?;
    let agent = state
        .agents()
        .toggle_agent(&input.id, &input.organization_id)
        .await?;

    Ok(Json(AgentResponse {
        agent: agent.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/agents/deleteAgentById",
    tag = "Agents",
    request_body = AgentIdInput,
    responses(
        (status = 200, description = "Agent archived and soft-deleted", body = DeleteAgentResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_agent_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    payload: Result<Json<AgentIdInput>, JsonRejection>,
) -> Result<Json<DeleteAgentResponse>, ApiError> {
    let input = json_body(payload)?;
    let agent = state.agents().delete_agent(&input.id).await?;

    Ok(Json(DeleteAgentResponse {
        organization_id: agent.organization_id,
        agent_id: agent.id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/agents/updateAgentToolsById",
    tag = "Agents",
    request_body = UpdateAgentToolsInput,
    responses(
        (status = 200, description = "Built-in tools replaced", body = AgentMutationResponse),
        (status = 400, description = "Phone number missing for transfer", body = ErrorResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse),
        (status = 502, description = "Error updating agent tools", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_agent_tools_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    payload: Result<Json<UpdateAgentToolsInput>, JsonRejection>,
) -> Result<Json<AgentMutationResponse>, ApiError> {
    let input = json_body(payload)?;
    let agent = state
        .agents()
        .update_tools(&input.id, &input.settings())
        .await?;

    Ok(Json(AgentMutationResponse {
        success: true,
        agent_id: agent.id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/agents/getAgentById",
    tag = "Agents",
    params(AgentIdQuery),
    responses(
        (status = 200, description = "The agent", body = AgentResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_agent_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    query: Result<Query<AgentIdQuery>, QueryRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let query = query_params(query)?;
    let agent = state.agents().get_agent(&query.id).await?;

    Ok(Json(AgentResponse {
        agent: agent.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/agents/getAllAgentsByOrganizationId",
    tag = "Agents",
    params(OrganizationQuery),
    responses(
        (status = 200, description = "Agents of the organization, newest first", body = AgentsResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_all_agents_by_organization_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    query: Result<Query<OrganizationQuery>, QueryRejection>,
) -> Result<Json<AgentsResponse>, ApiError> {
    let query = query_params(query)?;
    let agents = state.agents().list_agents(&query.organization_id).await?;

    Ok(Json(AgentsResponse {
        agents: agents.into_iter().map(AgentRecord::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/agents/getConversationsByAgentId",
    tag = "Agents",
    params(ConversationsQuery),
    responses(
        (status = 200, description = "Every conversation of the agent", body = ConversationsResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_conversations_by_agent_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    query: Result<Query<ConversationsQuery>, QueryRejection>,
) -> Result<Json<ConversationsResponse>, ApiError> {
    let query = query_params(query)?;
    let conversations = state.agents().conversations(&query.agent_id).await?;

    Ok(Json(ConversationsResponse {
        conversations: conversations
            .into_iter()
            .map(ConversationRecord::from)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/agents/getUsageByOrganizationId",
    tag = "Agents",
    params(OrganizationQuery),
    responses(
        (status = 200, description = "Call count and minutes across all agents", body = UsageResponse),
        (status = 404, description = "Organization or agents not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_usage_by_organization_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    query: Result<Query<OrganizationQuery>, QueryRejection>,
) -> Result<Json<UsageResponse>, ApiError> {
    let query = query_params(query)?;
    let usage = state
        .usage()
        .usage_for_organization(&query.organization_id)
        .await?;

    Ok(Json(usage.into()))
}
