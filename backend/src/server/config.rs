//! HTTP server configuration object.

/// Listener settings for [`super::create_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
}

impl ServerConfig {
    /// Construct a server configuration from a host and port.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self { bind_addr }
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}
