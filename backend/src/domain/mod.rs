//! Domain primitives, use-cases, and ports.
//!
//! Purpose: hold the notification model and the send use-case free of HTTP and
//! broker details. Adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - User / UserId — directory entries and their identities.
//! - Directory — read-only user lookup.
//! - Notification — the record published to the broker.
//! - NotificationService — implementation of the send use-case.
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - TraceId — request-scoped correlation identifier.

pub mod directory;
pub mod error;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::directory::{Directory, UserNotFound};
pub use self::error::{Error, ErrorCode};
pub use self::notification::Notification;
pub use self::notification_service::{NotificationService, USER_NOT_FOUND_MESSAGE};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId};

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
