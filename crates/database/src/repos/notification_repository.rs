//! Notification repository for database operations.

use crate::entities::{CreateNotificationRequest, Notification};
use crate::types::{DatabaseError, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateNotificationRequest) -> DatabaseResult<Notification> {
        let id = cuid2::create_id();
        let now = crate::timestamp();

        sqlx::query(
            "INSERT INTO notifications (id, title, message, is_read, user_id, created_at, updated_at)
             VALUES (?, ?, ?, FALSE, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.message)
        .bind(&request.user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_for_user(&id, &request.user_id)
            .await?
            .ok_or_else(|| DatabaseError::QueryError(sqlx::Error::RowNotFound))
    }

    pub async fn find_for_user(&self, id: &str, user_id: &str) -> DatabaseResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, message, is_read, created_at, updated_at
             FROM notifications WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(notification_from_row).transpose()
    }

    /// Most recent unread notifications for a user, newest first.
    pub async fn find_unread_by_user_id(
        &self,
        user_id: &str,
        limit: u32,
    ) -> DatabaseResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, message, is_read, created_at, updated_at
             FROM notifications WHERE user_id = ? AND is_read = FALSE
             ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(notification_from_row).collect()
    }

    /// Mark one notification as read, returning it when it belongs to the user.
    pub async fn mark_as_read(&self, id: &str, user_id: &str) -> DatabaseResult<Option<Notification>> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(crate::timestamp())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_for_user(id, user_id).await
    }

    /// Flip the read flag of the given notifications in a single statement.
    pub async fn mark_many_as_read(&self, ids: &[String]) -> DatabaseResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE notifications SET is_read = TRUE, updated_at = ");
        builder.push_bind(crate::timestamp());
        builder.push(" WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn notification_from_row(row: &SqliteRow) -> DatabaseResult<Notification> {
    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        message: row.try_get("message")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{migrated_pool, seed_user};

    fn request(user_id: &str, title: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: format!("{title} body"),
        }
    }

    async fn repository() -> (NotificationRepository, tempfile::TempDir) {
        let (pool, temp_dir) = migrated_pool().await;
        seed_user(&pool, "u1").await;
        seed_user(&pool, "u2").await;
        (NotificationRepository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn create_and_list_unread() {
        let (repo, _temp_dir) = repository().await;

        let created = repo.create(&request("u1", "Hi")).await.unwrap();
        assert!(!created.is_read);
        assert_eq!(created.id.len(), 24);
        assert!(created
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let unread = repo.find_unread_by_user_id("u1", 10).await.unwrap();
        assert_eq!(unread, vec![created]);
        assert!(repo.find_unread_by_user_id("u2", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unread_listing_is_newest_first_and_limited() {
        let (repo, _temp_dir) = repository().await;
        for index in 0..5 {
            repo.create(&request("u1", &format!("n{index}"))).await.unwrap();
        }

        let unread = repo.find_unread_by_user_id("u1", 3).await.unwrap();
        let titles: Vec<&str> = unread.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["n4", "n3", "n2"]);
    }

    #[tokio::test]
    async fn mark_as_read_is_scoped_to_owner() {
        let (repo, _temp_dir) = repository().await;
        let notification = repo.create(&request("u1", "Hi")).await.unwrap();

        assert!(repo.mark_as_read(&notification.id, "u2").await.unwrap().is_none());

        let updated = repo.mark_as_read(&notification.id, "u1").await.unwrap().unwrap();
        assert!(updated.is_read);
        assert!(repo.find_unread_by_user_id("u1", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mark_many_as_read_updates_only_listed_ids() {
        let (repo, _temp_dir) = repository().await;
        let a = repo.create(&request("u1", "a")).await.unwrap();
        let b = repo.create(&request("u1", "b")).await.unwrap();
        let c = repo.create(&request("u1", "c")).await.unwrap();

        let affected = repo
            .mark_many_as_read(&[a.id.clone(), c.id.clone()])
            .await
            .unwrap();
        assert_eq!(affected, 2);
        assert_eq!(repo.mark_many_as_read(&[]).await.unwrap(), 0);

        let unread = repo.find_unread_by_user_id("u1", 10).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, b.id);
    }
}
