//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod notification_command;
mod notification_publisher;

#[cfg(test)]
pub use notification_command::MockNotificationCommand;
pub use notification_command::{NotificationCommand, SendNotificationRequest};
#[cfg(test)]
pub use notification_publisher::MockNotificationPublisher;
pub use notification_publisher::{
    NotificationPublishError, NotificationPublisher, PublishReceipt,
};
