//! Kafka adapter for the notification publisher port.

mod config;
mod producer;

pub use config::KafkaSettings;
pub use producer::{KafkaConnectError, KafkaNotificationPublisher};
