//! Notification procedures under `/api/notifications`. Every procedure acts
//! on the caller's own notifications.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::ErrorResponse;
use crate::middleware::CurrentUser;
use crate::routes::models::{
    CreateNotificationInput, MarkNotificationInput, NotificationRecord, NotificationResponse,
    NotificationsResponse, SuccessResponse,
};
use crate::util::json_body;
use crate::{ApiError, AppState};

#[utoipa::path(
    post,
    path = "/api/notifications/createNotification",
    tag = "Notifications",
    request_body = CreateNotificationInput,
    responses(
        (status = 200, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Title or message out of bounds", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_notification(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateNotificationInput>, JsonRejection>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let input = json_body(payload)?;
    let notification = state
        .notifications()
        .create(&user.id, &input.title, &input.message)
        .await?;

    Ok(Json(NotificationResponse {
        notification: notification.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/notifications/markAllNotificationsAsRead",
    tag = "Notifications",
    responses(
        (status = 200, description = "Latest unread notifications marked read", body = SuccessResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn mark_all_notifications_as_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.notifications().mark_all_read(&user.id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/notifications/markNotificationAsReadById",
    tag = "Notifications",
    request_body = MarkNotificationInput,
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn mark_notification_as_read_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<MarkNotificationInput>, JsonRejection>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let input = json_body(payload)?;
    let notification = state
        .notifications()
        .mark_read(&user.id, &input.notification_id)
        .await?;

    Ok(Json(NotificationResponse {
        notification: notification.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/getNotificationsByUserId",
    tag = "Notifications",
    responses(
        (status = 200, description = "Up to ten unread notifications, newest first", body = NotificationsResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_notifications_by_user_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let notifications = state.notifications().unread(&user.id).await?;

    Ok(Json(NotificationsResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationRecord::from)
            .collect(),
    }))
}
