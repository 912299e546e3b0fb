use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eckokit_agents::ServiceError;
use eckokit_auth::AuthError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::AgentNotFound
            | ServiceError::AgentsNotFound
            | ServiceError::OrganizationNotFound
            | ServiceError::NotificationNotFound => Self::not_found(error.to_string()),
            ServiceError::Validation(message) => Self::bad_request(message),
            ServiceError::NoActiveSubscription => Self::forbidden(error.to_string()),
            ServiceError::ToolUpdateFailed(_) => {
                Self::new(StatusCode::BAD_GATEWAY, error.to_string())
            }
            ServiceError::Provider(ref source) => {
                error!(error = %source, "voice provider error");
                Self::new(StatusCode::BAD_GATEWAY, "Voice provider request failed")
            }
            ServiceError::Database(ref source) => {
                error!(error = ?source, "database error");
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession
            | AuthError::UserNotFound => {
                warn!(error = %error, "session rejected");
                Self::unauthorized("Unauthorized")
            }
            AuthError::Database(source) => {
                error!(error = ?source, "session lookup failed");
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eckokit_provider::ProviderError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::AgentNotFound, StatusCode::NOT_FOUND, "Agent not found"),
            (
                ServiceError::NoActiveSubscription,
                StatusCode::FORBIDDEN,
                "Organization does not have an active subscription",
            ),
            (
                ServiceError::Validation("Title cannot be empty".to_string()),
                StatusCode::BAD_REQUEST,
                "Title cannot be empty",
            ),
            (
                ServiceError::ToolUpdateFailed(ProviderError::ApiKeyMissing),
                StatusCode::BAD_GATEWAY,
                "Error updating agent tools",
            ),
        ];

        for (error, status, message) in cases {
            let api_error = ApiError::from(error);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.message, message);
        }
    }

    #[test]
    fn provider_details_are_not_leaked() {
        let api_error = ApiError::from(ServiceError::Provider(ProviderError::Status {
            status: 500,
            body: "secret upstream detail".to_string(),
        }));
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert!(!api_error.message.contains("secret"));
    }

    #[test]
    fn expired_session_is_unauthorized() {
        let api_error = ApiError::from(AuthError::SessionExpired);
        assert_eq!(api_error.status, StatusCode::UNAUTHORIZED);
    }
}
