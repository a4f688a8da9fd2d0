//! Application configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `NOTIFY_*` environment variables over the
//! defaults below. Only the directory file is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::Directory;
use crate::outbound::kafka::KafkaSettings;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BROKERS: &str = "localhost:9092";
const DEFAULT_TOPIC: &str = "notifications";
const DEFAULT_ACKS: &str = "1";
const DEFAULT_CLIENT_ID: &str = "notification-producer";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SHUTDOWN_FLUSH_MS: u64 = 5_000;

/// Failure to load a user directory file.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryLoadError {
    /// The file could not be read.
    #[error("failed to read user directory {path}: {source}")]
    Read {
        /// Offending path.
        path: String,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON array of `{id, name}` records.
    #[error("failed to parse user directory {path}: {source}")]
    Parse {
        /// Offending path.
        path: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for the notification producer process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTIFY")]
pub struct AppConfig {
    /// Interface the HTTP server binds to.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// HTTP listen port.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Kafka bootstrap servers.
    #[ortho_config(default = DEFAULT_BROKERS.to_owned())]
    pub kafka_brokers: String,
    /// Topic notifications are published to.
    #[ortho_config(default = DEFAULT_TOPIC.to_owned())]
    pub kafka_topic: String,
    /// Producer `acks` setting.
    #[ortho_config(default = DEFAULT_ACKS.to_owned())]
    pub kafka_acks: String,
    /// Client identifier reported to the brokers.
    #[ortho_config(default = DEFAULT_CLIENT_ID.to_owned())]
    pub kafka_client_id: String,
    /// Startup reachability timeout in milliseconds.
    #[ortho_config(default = DEFAULT_CONNECT_TIMEOUT_MS)]
    pub kafka_connect_timeout_ms: u64,
    /// Shutdown flush timeout in milliseconds.
    #[ortho_config(default = DEFAULT_SHUTDOWN_FLUSH_MS)]
    pub kafka_shutdown_flush_ms: u64,
    /// JSON file replacing the built-in user directory.
    pub directory_path: Option<PathBuf>,
}

impl AppConfig {
    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Producer connection settings.
    #[must_use]
    pub fn kafka_settings(&self) -> KafkaSettings {
        KafkaSettings {
            brokers: self.kafka_brokers.clone(),
            client_id: self.kafka_client_id.clone(),
            acks: self.kafka_acks.clone(),
            connect_timeout: Duration::from_millis(self.kafka_connect_timeout_ms),
        }
    }

    /// Upper bound on the shutdown flush.
    #[must_use]
    pub fn shutdown_flush_timeout(&self) -> Duration {
        Duration::from_millis(self.kafka_shutdown_flush_ms)
    }

    /// Load the user directory: the configured file, or the built-in users.
    ///
    /// # Errors
    /// Returns [`DirectoryLoadError`] when the configured file cannot be read
    /// or parsed.
    pub fn load_directory(&self) -> Result<Directory, DirectoryLoadError> {
        match &self.directory_path {
            Some(path) => read_directory(path),
            None => Ok(Directory::default()),
        }
    }
}

fn read_directory(path: &Path) -> Result<Directory, DirectoryLoadError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| DirectoryLoadError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| DirectoryLoadError::Parse {
        path: display,
        source,
    })
}
