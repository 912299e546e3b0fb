pub mod agents;
pub mod health;
pub mod models;
pub mod notifications;
pub mod organizations;
