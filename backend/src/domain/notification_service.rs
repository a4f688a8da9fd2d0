//! Send-notification use-case.
//!
//! Resolves sender and recipient against the injected [`Directory`], encodes
//! the [`Notification`], and hands it to the [`NotificationPublisher`] keyed
//! by recipient. Each call makes exactly one publish attempt.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    NotificationCommand, NotificationPublisher, PublishReceipt, SendNotificationRequest,
};
use crate::domain::{Directory, Error, Notification, User, UserId};

/// Message returned for an unknown sender or recipient.
///
/// The same text is used for both sides; which identity failed is only logged.
pub const USER_NOT_FOUND_MESSAGE: &str = "User Not Found";

/// Directory-backed notification sender.
#[derive(Clone)]
pub struct NotificationService {
    directory: Arc<Directory>,
    publisher: Arc<dyn NotificationPublisher>,
    topic: String,
}

impl NotificationService {
    /// Build the service over an injected directory and publisher.
    pub fn new(
        directory: Arc<Directory>,
        publisher: Arc<dyn NotificationPublisher>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            publisher,
            topic: topic.into(),
        }
    }

    /// Topic notifications are published to.
    #[must_use]
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    fn resolve(&self, id: UserId, role: &'static str) -> Result<&User, Error> {
        self.directory.resolve(id).map_err(|err| {
            debug!(user_id = %err.id, role, "notification party not in directory");
            Error::not_found(USER_NOT_FOUND_MESSAGE)
        })
    }
}

#[async_trait]
impl NotificationCommand for NotificationService {
    async fn send(&self, request: SendNotificationRequest) -> Result<PublishReceipt, Error> {
        let SendNotificationRequest { from, to, message } = request;
        let sender = self.resolve(from, "sender")?;
        let recipient = self.resolve(to, "recipient")?;

        let notification = Notification::new(sender.clone(), recipient.clone(), message);
        let payload = notification
            .to_payload()
            .map_err(|err| Error::internal(format!("failed to marshal notification: {err}")))?;
        let key = notification.partition_key();

        let started = Instant::now();
        let receipt = self
            .publisher
            .publish(&self.topic, &key, &payload)
            .await
            .map_err(|err| {
                warn!(
                    error = %err,
                    topic = %self.topic,
                    key = %key,
                    "failed to publish notification"
                );
                Error::internal(err.to_string())
            })?;

        info!(
            topic = %self.topic,
            key = %key,
            partition = receipt.partition,
            offset = receipt.offset,
            latency_ms = started.elapsed().as_millis(),
            "notification published"
        );
        Ok(receipt)
    }
}
