//! HTTP inbound adapter exposing the notification endpoint and health probes.

pub mod error;
pub mod health;
pub mod notifications;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, form_config};
