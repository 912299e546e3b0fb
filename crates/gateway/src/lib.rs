//! # Eckokit Gateway Crate
//!
//! JSON procedures over HTTP. Each procedure lives at
//! `/api/{agents|notifications|organizations}/{procedureName}`: mutations
//! are `POST` with a JSON body, queries are `GET` with query parameters.
//!
//! Every `/api` request passes through session resolution and the
//! [`RequestGuard`](protection::RequestGuard) before reaching its handler.

mod error;
mod state;
mod util;

pub mod docs;
pub mod middleware;
pub mod protection;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Agents
        .route("/api/agents/createAgent", post(routes::agents::create_agent))
        .route(
            "/api/agents/updateAgentById",
            post(routes::agents::update_agent_by_id),
        )
        .route(
            "/api/agents/toggleAgentById",
            post(routes::agents::toggle_agent_by_id),
        )
        .route(
            "/api/agents/deleteAgentById",
            post(routes::agents::delete_agent_by_id),
        )
        .route(
            "/api/agents/updateAgentToolsById",
            post(routes::agents::update_agent_tools_by_id),
        )
        .route("/api/agents/getAgentById", get(routes::agents::get_agent_by_id))
        .route(
            "/api/agents/getAllAgentsByOrganizationId",
            get(routes::agents::get_all_agents_by_organization_id),
        )
        .route(
            "/api/agents/getConversationsByAgentId",
            get(routes::agents::get_conversations_by_agent_id),
        )
        .route(
            "/api/agents/getUsageByOrganizationId",
            get(routes::agents::get_usage_by_organization_id),
        )
        // Notifications
        .route(
            "/api/notifications/createNotification",
            post(routes::notifications::create_notification),
        )
        .route(
            "/api/notifications/markAllNotificationsAsRead",
            post(routes::notifications::mark_all_notifications_as_read),
        )
        .route(
            "/api/notifications/markNotificationAsReadById",
            post(routes::notifications::mark_notification_as_read_by_id),
        )
        .route(
            "/api/notifications/getNotificationsByUserId",
            get(routes::notifications::get_notifications_by_user_id),
        )
        // Organizations
        .route(
            "/api/organizations/getOrganizationCanCreateAgent",
            get(routes::organizations::get_organization_can_create_agent),
        )
        // Outermost runs first: the session is resolved before protection keys on it.
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::protection_middleware,
        ))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(api);

    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;

        router = router.route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(docs::ApiDoc::openapi()) }),
        );
    }

    router
        .with_state(state)
        .layer(cors_layer())
        .layer(from_fn(middleware::logging_middleware))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
