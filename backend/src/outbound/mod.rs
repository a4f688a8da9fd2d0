//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **kafka**: rdkafka-backed `NotificationPublisher`
//! - **memory**: in-memory `NotificationPublisher` for tests (`test-support`)
//!
//! Adapters translate between domain types and client-library types and
//! contain no business logic.

pub mod kafka;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
