//! Read-only access to organizations, memberships and subscriptions.

use crate::entities::{Membership, Organization, Subscription, SubscriptionStatus};
use crate::types::{DatabaseError, DatabaseResult};
use sqlx::{Row, SqlitePool};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: SqlitePool,
}

impl OrganizationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Organization>> {
        let row = sqlx::query("SELECT id, name, slug, created_at FROM organizations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Organization {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get("created_at")?,
        }))
    }

    pub async fn find_membership(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> DatabaseResult<Option<Membership>> {
        let row = sqlx::query(
            "SELECT id, organization_id, user_id, role FROM members
             WHERE organization_id = ? AND user_id = ? LIMIT 1",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Membership {
            id: row.try_get("id")?,
            organization_id: row.try_get("organization_id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
        }))
    }

    /// Latest active subscription held by the organization, if any.
    pub async fn find_active_subscription(
        &self,
        organization_id: &str,
    ) -> DatabaseResult<Option<Subscription>> {
        let row = sqlx::query(
            "SELECT id, plan, reference_id, status, period_end FROM subscriptions
             WHERE reference_id = ? AND status = ?
             ORDER BY period_end DESC LIMIT 1",
        )
        .bind(organization_id)
        .bind(SubscriptionStatus::Active.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<SubscriptionStatus>()
            .map_err(|value| DatabaseError::InvalidValue {
                column: "status",
                value,
            })?;

        Ok(Some(Subscription {
            id: row.try_get("id")?,
            plan: row.try_get("plan")?,
            reference_id: row.try_get("reference_id")?,
            status,
            period_end: row.try_get("period_end")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{migrated_pool, seed_organization, seed_user};

    async fn insert_subscription(pool: &SqlitePool, id: &str, org: &str, status: &str, period_end: &str) {
        sqlx::query(
            "INSERT INTO subscriptions (id, plan, reference_id, status, period_end) VALUES (?, 'starter', ?, ?, ?)",
        )
        .bind(id)
        .bind(org)
        .bind(status)
        .bind(period_end)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn membership_lookup_matches_both_ids() {
        let (pool, _temp_dir) = migrated_pool().await;
        seed_user(&pool, "u1").await;
        seed_organization(&pool, "org_1").await;
        seed_organization(&pool, "org_2").await;
        sqlx::query(
            "INSERT INTO members (id, organization_id, user_id, role, created_at) VALUES ('m1', 'org_1', 'u1', 'owner', '2024-01-01T00:00:00.000000Z')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let repo = OrganizationRepository::new(pool);
        let membership = repo.find_membership("org_1", "u1").await.unwrap().unwrap();
        assert_eq!(membership.role, "owner");
        assert!(repo.find_membership("org_2", "u1").await.unwrap().is_none());
        assert!(repo.find_by_id("org_2").await.unwrap().is_some());
        assert!(repo.find_by_id("org_3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn active_subscription_prefers_latest_period() {
        let (pool, _temp_dir) = migrated_pool().await;
        insert_subscription(&pool, "s1", "org_1", "canceled", "2030-01-01T00:00:00Z").await;
        insert_subscription(&pool, "s2", "org_1", "active", "2025-01-01T00:00:00Z").await;
        insert_subscription(&pool, "s3", "org_1", "active", "2026-01-01T00:00:00Z").await;
        insert_subscription(&pool, "s4", "org_2", "past_due", "2026-01-01T00:00:00Z").await;

        let repo = OrganizationRepository::new(pool);
        let subscription = repo.find_active_subscription("org_1").await.unwrap().unwrap();
        assert_eq!(subscription.id, "s3");
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert!(repo.find_active_subscription("org_2").await.unwrap().is_none());
    }
}
