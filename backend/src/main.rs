//! Notification producer entry-point: loads configuration, connects to Kafka,
//! then serves `POST /send` until signalled.

mod server;

use std::fmt::Display;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notification_producer::config::AppConfig;
use notification_producer::domain::NotificationService;
use notification_producer::inbound::http::health::HealthState;
use notification_producer::inbound::http::state::HttpState;
use notification_producer::outbound::kafka::KafkaNotificationPublisher;
use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .map_err(|err| startup_failure("load configuration", err))?;
    let directory = config
        .load_directory()
        .map_err(|err| startup_failure("load user directory", err))?;
    info!(users = directory.len(), "user directory loaded");

    let publisher = KafkaNotificationPublisher::connect(&config.kafka_settings())
        .await
        .map_err(|err| startup_failure("connect to Kafka", err))?;

    let service = NotificationService::new(
        Arc::new(directory),
        Arc::new(publisher.clone()),
        config.kafka_topic.clone(),
    );
    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::new(Arc::new(service)));
    let server_config = ServerConfig::new(config.bind_addr());
    let (host, port) = server_config.bind_addr();
    info!(host, port, topic = %config.kafka_topic, "notification producer listening");

    let server = create_server(health_state.clone(), http_state, server_config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), server.handle(), health_state));
    let outcome = server.await;

    if let Err(err) = publisher.close(config.shutdown_flush_timeout()) {
        warn!(error = %err, "Kafka producer flush incomplete at shutdown");
    }
    outcome
}

fn startup_failure(stage: &'static str, err: impl Display) -> std::io::Error {
    error!(stage, error = %err, "startup failed");
    std::io::Error::other(format!("failed to {stage}: {err}"))
}
