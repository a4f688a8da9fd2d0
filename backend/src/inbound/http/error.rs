//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`Error`] free of Actix types while turning failures into
//! `{"message": ...}` JSON bodies with a matching status code.

use actix_web::error::UrlencodedError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use tracing::{debug, error};

use super::schemas::MessageResponse;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, trace_id = ?self.trace_id(), "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(MessageResponse::new(self.message()))
    }
}

fn reject_form(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid form body: {err}")).into()
}

/// Form extractor configuration that reports undecodable bodies as
/// `400 {"message": ...}` instead of Actix's plain-text default.
#[must_use]
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(reject_form)
}
