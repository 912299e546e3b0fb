use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::agents::create_agent,
        crate::routes::agents::update_agent_by_id,
        crate::routes::agents::toggle_agent_by_id,
        crate::routes::agents::delete_agent_by_id,
        crate::routes::agents::update_agent_tools_by_id,
        crate::routes::agents::get_agent_by_id,
        crate::routes::agents::get_all_agents_by_organization_id,
        crate::routes::agents::get_conversations_by_agent_id,
        crate::routes::agents::get_usage_by_organization_id,
        crate::routes::notifications::create_notification,
        crate::routes::notifications::mark_all_notifications_as_read,
        crate::routes::notifications::mark_notification_as_read_by_id,
        crate::routes::notifications::get_notifications_by_user_id,
        crate::routes::organizations::get_organization_can_create_agent
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::AgentRecord,
            crate::routes::models::ConversationRecord,
            crate::routes::models::NotificationRecord,
            crate::routes::models::CreateAgentInput,
            crate::routes::models::UpdateAgentInput,
            crate::routes::models::ToggleAgentInput,
            crate::routes::models::AgentIdInput,
            crate::routes::models::UpdateAgentToolsInput,
            crate::routes::models::CreateNotificationInput,
            crate::routes::models::MarkNotificationInput,
            crate::routes::models::CreateAgentResponse,
            crate::routes::models::AgentMutationResponse,
            crate::routes::models::DeleteAgentResponse,
            crate::routes::models::AgentResponse,
            crate::routes::models::AgentsResponse,
            crate::routes::models::ConversationsResponse,
            crate::routes::models::UsageResponse,
            crate::routes::models::NotificationResponse,
            crate::routes::models::NotificationsResponse,
            crate::routes::models::SuccessResponse,
            crate::routes::models::CanCreateAgentResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Agents", description = "Voice agent lifecycle and usage"),
        (name = "Notifications", description = "User notifications"),
        (name = "Organizations", description = "Organization entitlements")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Session token".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_procedure_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert_eq!(paths.len(), 15);
        assert!(doc.paths.paths.contains_key("/api/agents/createAgent"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/organizations/getOrganizationCanCreateAgent"));
    }
}
