//! In-memory [`NotificationPublisher`] that records every publish.
//!
//! Used by integration tests to observe the broker wire contract without a
//! cluster. Available under `cfg(test)` and the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{NotificationPublishError, NotificationPublisher, PublishReceipt};

/// A record captured by [`InMemoryNotificationPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRecord {
    /// Destination topic.
    pub topic: String,
    /// Routing key.
    pub key: String,
    /// Encoded value.
    pub payload: Vec<u8>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<PublishedRecord>,
    failure: Option<NotificationPublishError>,
}

/// Publisher backed by a shared vector.
///
/// Clones share state, so a test can keep one handle while the service owns
/// another. Offsets count up from zero on a single partition.
///
/// # Examples
/// ```
/// use notification_producer::domain::ports::NotificationPublisher;
/// use notification_producer::outbound::memory::InMemoryNotificationPublisher;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let publisher = InMemoryNotificationPublisher::new();
/// let receipt = publisher.publish("notifications", "2", b"{}").await.expect("recorded");
/// assert_eq!(receipt.offset, 0);
/// assert_eq!(publisher.records().len(), 1);
/// # });
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationPublisher {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryNotificationPublisher {
    /// Create an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail with `error`.
    pub fn fail_with(&self, error: NotificationPublishError) {
        self.lock().failure = Some(error);
    }

    /// Snapshot of the records published so far.
    #[must_use]
    pub fn records(&self) -> Vec<PublishedRecord> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryNotificationPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<PublishReceipt, NotificationPublishError> {
        let mut inner = self.lock();
        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }
        let offset = i64::try_from(inner.records.len())
            .map_err(|_| NotificationPublishError::rejected("in-memory log is full"))?;
        inner.records.push(PublishedRecord {
            topic: topic.to_owned(),
            key: key.to_owned(),
            payload: payload.to_vec(),
        });
        Ok(PublishReceipt {
            partition: 0,
            offset,
        })
    }
}
