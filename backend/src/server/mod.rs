//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use notification_producer::Trace;
#[cfg(debug_assertions)]
use notification_producer::doc::ApiDoc;
use notification_producer::inbound::http::form_config;
use notification_producer::inbound::http::health::{HealthState, live, ready};
use notification_producer::inbound::http::notifications::send_notification;
use notification_producer::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(form_config())
        .wrap(Trace)
        .service(send_notification)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server around the notification use-case.
///
/// # Parameters
/// - `health_state`: probe state, marked ready once the listener is bound.
/// - `http_state`: handler dependencies.
/// - `config`: listener settings.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
///
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on`] so probes report draining before workers stop.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .disable_signals()
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `signal`, flip the probes to draining, then stop the server
/// gracefully. In-flight requests finish before the returned future resolves.
pub async fn drain_on<F>(signal: F, server: ServerHandle, health_state: web::Data<HealthState>)
where
    F: Future<Output = ()>,
{
    signal.await;
    health_state.mark_draining();
    info!("draining HTTP server");
    server.stop(true).await;
}

/// Resolves on SIGTERM or Ctrl-C.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("SIGTERM received"),
                    _ = tokio::signal::ctrl_c() => info!("SIGINT received"),
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C"),
        }
    }
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("SIGINT received");
}

#[cfg(test)]
mod tests {
    //! Tests for server bootstrap and readiness signalling.

    use super::*;
    use std::sync::Arc;

    use notification_producer::domain::{Directory, NotificationService};
    use notification_producer::outbound::memory::InMemoryNotificationPublisher;
    use rstest::{fixture, rstest};

    #[fixture]
    fn http_state() -> web::Data<HttpState> {
        let service = NotificationService::new(
            Arc::new(Directory::default()),
            Arc::new(InMemoryNotificationPublisher::new()),
            "notifications",
        );
        web::Data::new(HttpState::new(Arc::new(service)))
    }

    #[rstest]
    #[actix_rt::test]
    async fn binding_marks_the_server_ready(http_state: web::Data<HttpState>) {
        let health_state = web::Data::new(HealthState::new());
        assert!(!health_state.is_ready());

        let server = create_server(
            health_state.clone(),
            http_state,
            ServerConfig::new(("127.0.0.1".to_owned(), 0)),
        )
        .expect("server binds to an ephemeral port");

        assert!(health_state.is_ready());
        drop(server);
    }

    #[rstest]
    #[actix_rt::test]
    async fn bind_failure_leaves_the_server_not_ready(http_state: web::Data<HttpState>) {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve a port");
        let port = occupied.local_addr().expect("local addr").port();
        let health_state = web::Data::new(HealthState::new());

        let result = create_server(
            health_state.clone(),
            http_state,
            ServerConfig::new(("127.0.0.1".to_owned(), port)),
        );

        assert!(result.is_err());
        assert!(!health_state.is_ready());
    }

    #[rstest]
    #[actix_rt::test]
    async fn drain_reports_not_ready_and_stops_the_server(http_state: web::Data<HttpState>) {
        let health_state = web::Data::new(HealthState::new());
        let server = create_server(
            health_state.clone(),
            http_state,
            ServerConfig::new(("127.0.0.1".to_owned(), 0)),
        )
        .expect("server binds to an ephemeral port");
        let handle = server.handle();
        let running = actix_rt::spawn(server);

        drain_on(std::future::ready(()), handle, health_state.clone()).await;

        assert!(!health_state.is_ready());
        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
