//! Cross-cutting request handling: access logging, session resolution,
//! request protection and the authenticated-user extractor.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use eckokit_auth::User;
use tracing::{info, warn};

use crate::protection::{Decision, DenialReason};
use crate::util::{client_ip, session_token};
use crate::{ApiError, AppState};

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}

/// Attaches the session's [`User`] to the request when a valid token is
/// presented. Requests without one continue anonymously; handlers that need
/// a user reject them through [`CurrentUser`].
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = session_token(request.headers(), state.session_cookie()) {
        match state.authenticate(&token).await {
            Ok((user, _)) => {
                request.extensions_mut().insert(user);
            }
            // Store failures surface; a bad token just stays anonymous.
            Err(error) if error.status.is_server_error() => return Err(error),
            Err(_) => {}
        }
    }

    Ok(next.run(request).await)
}

pub async fn protection_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(guard) = state.guard() else {
        return next.run(request).await;
    };

    let key = match request.extensions().get::<User>() {
        Some(user) => user.id.clone(),
        None => client_ip(request.headers()),
    };

    match guard.check(&key).await {
        Decision::Allow => next.run(request).await,
        Decision::Deny(reason) => {
            warn!(key = %key, ?reason, "request denied");
            match reason {
                DenialReason::RateLimited => {
                    ApiError::too_many_requests("Rate limit exceeded").into_response()
                }
                DenialReason::Bot | DenialReason::Forbidden => {
                    ApiError::forbidden("Unknown error occurred").into_response()
                }
            }
        }
    }
}

/// The signed-in user, or a 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}
