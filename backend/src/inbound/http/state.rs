//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving port, so they can be tested with a mock use-case.

use std::sync::Arc;

use crate::domain::ports::NotificationCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Send-notification use-case.
    pub notifications: Arc<dyn NotificationCommand>,
}

impl HttpState {
    /// Construct state around the send-notification port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use notification_producer::domain::{Directory, NotificationService};
    /// use notification_producer::inbound::http::state::HttpState;
    /// use notification_producer::outbound::memory::InMemoryNotificationPublisher;
    ///
    /// let service = NotificationService::new(
    ///     Arc::new(Directory::default()),
    ///     Arc::new(InMemoryNotificationPublisher::new()),
    ///     "notifications",
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _notifications = state.notifications.clone();
    /// ```
    pub fn new(notifications: Arc<dyn NotificationCommand>) -> Self {
        Self { notifications }
    }
}
