use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::errors::DevopsError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Jenkins answered with an error status; relayed as-is
    Remote { status: StatusCode, message: String },
    BadGateway(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Remote { status, .. } => *status,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_kind = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Remote { .. } => "remote_service_error",
            ApiError::BadGateway(_) => "bad_gateway",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        };

        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Remote { message: msg, .. }
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error: error_kind, message })).into_response()
    }
}

impl From<DevopsError> for ApiError {
    fn from(err: DevopsError) -> Self {
        match err {
            DevopsError::Config { message, .. } => ApiError::BadRequest(message),
            err @ DevopsError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DevopsError::RemoteService { code, message } => match StatusCode::from_u16(code) {
                Ok(status) => ApiError::Remote { status, message },
                Err(_) => ApiError::BadGateway(message),
            },
            DevopsError::Transport { message, .. } | DevopsError::TokenIssuance { message, .. } => {
                ApiError::BadGateway(message)
            }
            err @ (DevopsError::Serialization { .. }
            | DevopsError::Io { .. }
            | DevopsError::Internal { .. }) => ApiError::Internal(err.to_string()),
        }
    }
}

impl ApiError {
    pub fn service_unavailable<S: Into<String>>(msg: S) -> Self {
        ApiError::ServiceUnavailable(msg.into())
    }

    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        ApiError::Unauthorized(msg.into())
    }
}
