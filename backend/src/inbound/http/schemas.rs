//! Response bodies shared by HTTP handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body carried by every `/send` response, success or failure.
///
/// Example JSON: `{"message":"Notification sent successfully!"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Notification sent successfully!")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
