//! Request, response and error types for the domain services.

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::ServiceError;
pub use requests::{CreateAgentRequest, ToolSettings, UpdateAgentRequest};
pub use responses::UsageSummary;

pub type ServiceResult<T> = Result<T, ServiceError>;
