use eckokit_database::{CreateNotificationRequest, Notification, NotificationRepository};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::types::{ServiceError, ServiceResult};
use crate::utils::validation::{Validator, NOTIFICATION_FIELD_MAX_CHARS};

/// Unread notifications are only ever served in pages of this size.
pub const UNREAD_PAGE_SIZE: u32 = 10;

/// In-app notifications addressed to a single user.
#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
}

impl NotificationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            notifications: NotificationRepository::new(pool),
        }
    }

    pub async fn create(&self, user_id: &str, title: &str, message: &str) -> ServiceResult<Notification> {
        Validator::bounded("Title", title, NOTIFICATION_FIELD_MAX_CHARS)?;
        Validator::bounded("Message", message, NOTIFICATION_FIELD_MAX_CHARS)?;

        let notification = self
            .notifications
            .create(&CreateNotificationRequest {
                user_id: user_id.to_string(),
                title: title.to_string(),
                message: message.to_string(),
            })
            .await?;

        info!(notification_id = %notification.id, user_id, "notification created");
        Ok(notification)
    }

    /// Newest unread notifications, at most [`UNREAD_PAGE_SIZE`].
    pub async fn unread(&self, user_id: &str) -> ServiceResult<Vec<Notification>> {
        Ok(self
            .notifications
            .find_unread_by_user_id(user_id, UNREAD_PAGE_SIZE)
            .await?)
    }

    /// Marks the visible page of unread notifications as read. Older unread
    /// notifications beyond the page stay unread.
    pub async fn mark_all_read(&self, user_id: &str) -> ServiceResult<u64> {
        let ids: Vec<String> = self
            .unread(user_id)
            .await?
            .into_iter()
            .map(|notification| notification.id)
            .collect();

        let updated = self.notifications.mark_many_as_read(&ids).await?;
        debug!(user_id, updated, "notifications marked as read");
        Ok(updated)
    }

    pub async fn mark_read(&self, user_id: &str, notification_id: &str) -> ServiceResult<Notification> {
        self.notifications
            .mark_as_read(notification_id, user_id)
            .await?
            .ok_or(ServiceError::NotificationNotFound)
    }
}
