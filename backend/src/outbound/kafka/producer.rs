//! rdkafka-backed implementation of [`NotificationPublisher`].
//!
//! Startup verifies the brokers answer a metadata request so an unreachable
//! cluster aborts the process before the HTTP listener binds. Each publish is
//! a single `send` awaited until the delivery report arrives; librdkafka's
//! `message.timeout.ms` bounds how long that can take.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, error, info};

use super::KafkaSettings;
use crate::domain::ports::{NotificationPublishError, NotificationPublisher, PublishReceipt};

/// Startup failures for the Kafka producer. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum KafkaConnectError {
    /// The configured `acks` value would not yield acknowledgements.
    #[error("invalid producer acks '{value}': expected 1, all, -1 or a replica count")]
    InvalidAcks {
        /// Rejected setting.
        value: String,
    },
    /// librdkafka rejected the client configuration.
    #[error("failed to create Kafka producer: {0}")]
    Create(#[source] KafkaError),
    /// No broker answered the metadata probe in time.
    #[error("Kafka brokers {brokers} are unreachable: {source}")]
    Unreachable {
        /// Bootstrap servers that were probed.
        brokers: String,
        /// Underlying client error.
        #[source]
        source: KafkaError,
    },
    /// The blocking probe task panicked or was cancelled.
    #[error("Kafka reachability probe did not complete: {message}")]
    Probe {
        /// Join error description.
        message: String,
    },
}

/// Notification publisher over a shared [`FutureProducer`].
///
/// Cloning shares the underlying client; every clone publishes through the
/// same connection pool.
#[derive(Clone)]
pub struct KafkaNotificationPublisher {
    producer: FutureProducer,
}

impl KafkaNotificationPublisher {
    /// Create the producer and confirm the cluster is reachable.
    ///
    /// # Errors
    /// Returns [`KafkaConnectError`] when the settings are invalid, the
    /// client cannot be created, or no broker answers within
    /// `settings.connect_timeout`.
    pub async fn connect(settings: &KafkaSettings) -> Result<Self, KafkaConnectError> {
        info!(brokers = %settings.brokers, "initialising Kafka producer");
        let producer: FutureProducer = settings
            .client_config()?
            .create()
            .map_err(KafkaConnectError::Create)?;

        let probe = producer.clone();
        let timeout = settings.connect_timeout;
        tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(None, timeout)
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .map_err(|err| KafkaConnectError::Probe {
            message: err.to_string(),
        })?
        .map(|broker_count| {
            info!(
                brokers = %settings.brokers,
                broker_count,
                acks = %settings.acks,
                "Kafka producer connected"
            );
        })
        .map_err(|source| KafkaConnectError::Unreachable {
            brokers: settings.brokers.clone(),
            source,
        })?;

        Ok(Self { producer })
    }

    /// Flush in-flight records before shutdown.
    ///
    /// Blocks the calling thread for at most `timeout`.
    ///
    /// # Errors
    /// Returns the client error when records remain undelivered at the
    /// deadline.
    pub fn close(&self, timeout: Duration) -> Result<(), KafkaError> {
        info!(timeout_ms = timeout.as_millis(), "flushing Kafka producer");
        self.producer.flush(Timeout::After(timeout))?;
        info!("Kafka producer flushed");
        Ok(())
    }
}

/// Classify a delivery failure.
///
/// Transport and local-queue conditions are reported as unavailability;
/// everything else is a broker-side rejection.
fn map_send_error(err: &KafkaError) -> NotificationPublishError {
    match err {
        KafkaError::MessageProduction(
            RDKafkaErrorCode::QueueFull
            | RDKafkaErrorCode::AllBrokersDown
            | RDKafkaErrorCode::BrokerTransportFailure
            | RDKafkaErrorCode::MessageTimedOut,
        ) => NotificationPublishError::unavailable(err.to_string()),
        _ => NotificationPublishError::rejected(err.to_string()),
    }
}

#[async_trait]
impl NotificationPublisher for KafkaNotificationPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, NotificationPublishError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        let started = Instant::now();

        match self.producer.send(record, Timeout::Never).await {
            Ok((partition, offset)) => {
                debug!(
                    topic,
                    partition,
                    offset,
                    latency_ms = started.elapsed().as_millis(),
                    "Kafka acknowledged record"
                );
                Ok(PublishReceipt { partition, offset })
            }
            Err((kafka_err, _)) => {
                error!(
                    error = %kafka_err,
                    topic,
                    latency_ms = started.elapsed().as_millis(),
                    "Kafka delivery failed"
                );
                Err(map_send_error(&kafka_err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RDKafkaErrorCode::QueueFull)]
    #[case(RDKafkaErrorCode::AllBrokersDown)]
    #[case(RDKafkaErrorCode::BrokerTransportFailure)]
    #[case(RDKafkaErrorCode::MessageTimedOut)]
    fn transport_failures_are_unavailable(#[case] code: RDKafkaErrorCode) {
        let err = map_send_error(&KafkaError::MessageProduction(code));
        assert!(matches!(err, NotificationPublishError::Unavailable { .. }));
    }

    #[rstest]
    #[case(RDKafkaErrorCode::MessageSizeTooLarge)]
    #[case(RDKafkaErrorCode::NotLeaderForPartition)]
    #[case(RDKafkaErrorCode::TopicAuthorizationFailed)]
    fn broker_refusals_are_rejections(#[case] code: RDKafkaErrorCode) {
        let err = map_send_error(&KafkaError::MessageProduction(code));
        assert!(matches!(err, NotificationPublishError::Rejected { .. }));
    }

    #[rstest]
    fn invalid_acks_fail_before_creating_a_client() {
        let settings = KafkaSettings {
            brokers: "localhost:9092".to_owned(),
            client_id: "test".to_owned(),
            acks: "0".to_owned(),
            connect_timeout: Duration::from_millis(10),
        };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let result = runtime.block_on(KafkaNotificationPublisher::connect(&settings));
        assert!(matches!(result, Err(KafkaConnectError::InvalidAcks { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn closed_port_is_reported_unreachable() {
        let settings = KafkaSettings {
            brokers: "127.0.0.1:1".to_owned(),
            client_id: "test".to_owned(),
            acks: "1".to_owned(),
            connect_timeout: Duration::from_millis(1_500),
        };

        let result = KafkaNotificationPublisher::connect(&settings).await;

        assert!(matches!(
            result,
            Err(KafkaConnectError::Unreachable { ref brokers, .. }) if brokers == "127.0.0.1:1"
        ));
    }
}
