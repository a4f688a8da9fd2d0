//! Driving port for the send-notification use-case.
//!
//! Inbound adapters parse transport input into a [`SendNotificationRequest`]
//! and call this port; they never see the directory or the broker.

use async_trait::async_trait;

use super::PublishReceipt;
use crate::domain::{Error, UserId};

/// Parsed request to notify `to` on behalf of `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendNotificationRequest {
    /// Sender identity.
    pub from: UserId,
    /// Recipient identity; also the routing key.
    pub to: UserId,
    /// Free-text body, possibly empty.
    pub message: String,
}

/// Domain use-case port for sending notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Resolve both parties and publish one notification.
    ///
    /// Unknown identities yield [`crate::domain::ErrorCode::NotFound`];
    /// encoding and broker failures yield
    /// [`crate::domain::ErrorCode::InternalError`].
    async fn send(&self, request: SendNotificationRequest) -> Result<PublishReceipt, Error>;
}
