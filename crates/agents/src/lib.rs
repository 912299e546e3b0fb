//! # Eckokit Agents Crate
//!
//! Business logic for voice agents and the things around them:
//!
//! - **Agents**: lifecycle of locally recorded agents mirrored on the voice
//!   provider (create, update, publish toggle, soft delete, tools)
//! - **Usage**: call counts and minutes per organization
//! - **Membership**: whether a user may create agents for an organization
//! - **Notifications**: per-user in-app notifications
//!
//! ```rust,ignore
//! use eckokit_agents::AgentService;
//!
//! let service = AgentService::new(pool, provider, config.agents.clone());
//! let agent = service.create_agent(&user.id, &request).await?;
//! ```

pub mod services;
pub mod types;
pub mod utils;

pub use services::{
    collect_conversations, AgentService, MembershipService, NotificationService, UsageService,
};
pub use types::{
    CreateAgentRequest, ServiceError, ServiceResult, ToolSettings, UpdateAgentRequest,
    UsageSummary,
};
