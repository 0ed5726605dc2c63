//! HTTP surface of the admin panel.
//!
//! Public visitors read content through `/api/content`; everything under
//! `/api/admin` needs a bearer token from `/api/auth/sign-in` and runs
//! against that session's dashboard.

mod handlers;
mod routes;
mod state;

use crate::core::AdminError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use routes::build_router;
pub use state::{AdminSession, AppState, SessionRegistry};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    Admin(AdminError),
    Unauthorized(String),
}

impl From<AdminError> for WebError {
    fn from(err: AdminError) -> Self {
        WebError::Admin(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            WebError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "unauthorized"),
            WebError::Admin(err) => {
                let (status, code) = match &err {
                    AdminError::UnknownSection(_) => (StatusCode::NOT_FOUND, "unknown_section"),
                    AdminError::InvalidContent(..) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "invalid_content")
                    }
                    AdminError::DraftPath(_) => (StatusCode::BAD_REQUEST, "invalid_draft"),
                    AdminError::Auth(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
                    AdminError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
                    AdminError::AuditLog(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "audit_log_error")
                    }
                    AdminError::LockError(_)
                    | AdminError::IoError(_)
                    | AdminError::Serialization(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                (status, err.to_string(), code)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
