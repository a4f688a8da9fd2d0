//! Notification record published to the broker.

use serde::{Deserialize, Serialize};

use super::User;

/// A message from one directory user to another.
///
/// Instances live for a single request: they are built, encoded with
/// [`Notification::to_payload`], and dropped once the broker acknowledges.
///
/// Wire shape: `{"from": User, "to": User, "message": String}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    from: User,
    to: User,
    message: String,
}

impl Notification {
    /// Build a notification.
    pub fn new(from: User, to: User, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            message: message.into(),
        }
    }

    /// Sender.
    #[must_use]
    pub fn from(&self) -> &User {
        &self.from
    }

    /// Recipient.
    #[must_use]
    pub fn to(&self) -> &User {
        &self.to
    }

    /// Free-text body.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Broker routing key: the recipient identity in decimal.
    ///
    /// Keying by recipient keeps each recipient's notifications on a single
    /// partition.
    #[must_use]
    pub fn partition_key(&self) -> String {
        self.to.id().to_string()
    }

    /// Encode the notification as JSON bytes.
    ///
    /// # Errors
    /// Propagates [`serde_json::Error`] from the encoder.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
