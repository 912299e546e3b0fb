use std::sync::Arc;

use eckokit_agents::{AgentService, MembershipService, NotificationService, UsageService};
use eckokit_auth::{AuthSession, Authenticator, User};
use eckokit_config::AppConfig;
use eckokit_provider::AgentProvider;

use crate::protection::{RequestGuard, KeyedRateLimiter};
use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    agents: AgentService,
    usage: UsageService,
    membership: MembershipService,
    notifications: NotificationService,
    guard: Option<Arc<dyn RequestGuard>>,
    session_cookie: String,
}

impl AppState {
    /// Wires every service onto the authenticator's pool. Protection follows
    /// `config.protection`.
    pub fn new(
        authenticator: Authenticator,
        provider: Arc<dyn AgentProvider>,
        config: &AppConfig,
    ) -> Self {
        let guard: Option<Arc<dyn RequestGuard>> = config
            .protection
            .enabled
            .then(|| {
                Arc::new(KeyedRateLimiter::from_config(&config.protection))
                    as Arc<dyn RequestGuard>
            });

        Self::with_guard(authenticator, provider, config, guard)
    }

    pub fn with_guard(
        authenticator: Authenticator,
        provider: Arc<dyn AgentProvider>,
        config: &AppConfig,
        guard: Option<Arc<dyn RequestGuard>>,
    ) -> Self {
        let pool = authenticator.pool();

        Self {
            agents: AgentService::new(pool.clone(), provider.clone(), config.agents.clone()),
            usage: UsageService::new(pool.clone(), provider),
            membership: MembershipService::new(pool.clone()),
            notifications: NotificationService::new(pool),
            authenticator,
            guard,
            session_cookie: config.auth.session_cookie.clone(),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn agents(&self) -> &AgentService {
        &self.agents
    }

    pub fn usage(&self) -> &UsageService {
        &self.usage
    }

    pub fn membership(&self) -> &MembershipService {
        &self.membership
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn guard(&self) -> Option<&dyn RequestGuard> {
        self.guard.as_deref()
    }

    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }
}
