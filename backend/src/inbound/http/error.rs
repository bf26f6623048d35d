//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers return it directly. Every failure is a client error carrying the
//! `{"error": message}` envelope; the code is only logged.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::warn;

use crate::domain::{Error, ErrorCode, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::InvalidEmail
        | ErrorCode::AlreadyExists
        | ErrorCode::NotFound
        | ErrorCode::Store => StatusCode::BAD_REQUEST,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        warn!(
            trace_id = trace_id.as_deref().unwrap_or("-"),
            code = self.code().as_str(),
            message = self.message(),
            "request failed"
        );
        HttpResponse::build(self.status_code()).json(self)
    }
}
