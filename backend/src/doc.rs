//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the notification endpoint, the health probes, and the
//! form and message schemas. Debug builds serve it through Swagger UI.

use crate::inbound::http::notifications::SendNotificationForm;
use crate::inbound::http::schemas::MessageResponse;
use utoipa::OpenApi;

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notification producer API",
        description = "Publishes user-to-user notifications to Kafka."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::notifications::send_notification,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SendNotificationForm, MessageResponse)),
    tags(
        (name = "notifications", description = "Notification publishing"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
