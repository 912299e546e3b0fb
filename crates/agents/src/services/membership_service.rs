use eckokit_database::OrganizationRepository;
use sqlx::SqlitePool;
use tracing::debug;

use crate::types::ServiceResult;

/// Decides whether a user may create agents for an organization.
#[derive(Clone)]
pub struct MembershipService {
    organizations: OrganizationRepository,
}

impl MembershipService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            organizations: OrganizationRepository::new(pool),
        }
    }

    /// True when the user is a member, the organization exists and it holds
    /// an active subscription. Only store failures are errors.
    pub async fn can_create_agent(&self, organization_id: &str, user_id: &str) -> ServiceResult<bool> {
        if self
            .organizations
            .find_membership(organization_id, user_id)
            .await?
            .is_none()
        {
            debug!(organization_id, user_id, "not a member of organization");
            return Ok(false);
        }

        if self.organizations.find_by_id(organization_id).await?.is_none() {
            debug!(organization_id, "organization does not exist");
            return Ok(false);
        }

        let subscription = self
            .organizations
            .find_active_subscription(organization_id)
            .await?;
        Ok(subscription.is_some())
    }
}
