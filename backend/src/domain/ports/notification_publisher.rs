//! Driven port for handing encoded notifications to a message broker.
//!
//! Adapters implement this over a real broker client; tests substitute a mock
//! or the in-memory publisher so use-cases run without a cluster.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the broker adapter.
    pub enum NotificationPublishError {
        /// The broker cannot be reached or the local queue cannot accept the record.
        Unavailable { message: String } => "notification broker is unavailable: {message}",
        /// The broker refused or failed to acknowledge the record.
        Rejected { message: String } => "notification was rejected by the broker: {message}",
    }
}

/// Broker acknowledgement for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Partition the record landed on.
    pub partition: i32,
    /// Offset assigned within that partition.
    pub offset: i64,
}

/// Port for publishing keyed records.
///
/// `publish` resolves only once the broker has acknowledged the record; one
/// call produces at most one record and implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish `payload` to `topic`, routed by `key`.
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, NotificationPublishError>;
}
