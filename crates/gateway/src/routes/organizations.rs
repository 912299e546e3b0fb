use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::middleware::CurrentUser;
use crate::routes::models::{CanCreateAgentResponse, OrganizationQuery};
use crate::util::query_params;
use crate::{ApiError, AppState};

#[utoipa::path(
    get,
    path = "/api/organizations/getOrganizationCanCreateAgent",
    tag = "Organizations",
    params(OrganizationQuery),
    responses(
        (status = 200, description = "Whether the caller may create agents here", body = CanCreateAgentResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_organization_can_create_agent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<OrganizationQuery>, QueryRejection>,
) -> Result<Json<CanCreateAgentResponse>, ApiError> {
    let query = query_params(query)?;
    let can_create_agent = state
        .membership()
        .can_create_agent(&query.organization_id, &user.id)
        .await?;

    Ok(Json(CanCreateAgentResponse { can_create_agent }))
}
