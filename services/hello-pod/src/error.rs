//! Error taxonomy and the JSON error envelope.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors a handler can end in
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route matched the request
    #[error("Not found")]
    NotFound,

    /// The route exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A query parameter could not be used
    #[error("Invalid parameter: {name} ({reason})")]
    InvalidParameter { name: &'static str, reason: String },

    /// Anything else that went wrong while serving the request
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
    pub pod_name: String,
}

/// An [`ApiError`] tagged with the pod that produced it, ready to render.
#[derive(Debug)]
pub struct ApiRejection {
    pub error: ApiError,
    pub pod_name: String,
}

impl ApiRejection {
    pub fn new(error: ApiError, pod_name: impl Into<String>) -> Self {
        Self {
            error,
            pod_name: pod_name.into(),
        }
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let status = self.error.status();

        if let ApiError::Internal(cause) = &self.error {
            error!("Internal error on pod {}: {:?}", self.pod_name, cause);
        }

        let body = ErrorBody {
            error: self.error.to_string(),
            status: status.as_u16(),
            pod_name: self.pod_name,
        };

        (status, Json(body)).into_response()
    }
}

/// Render a caught handler panic as the 500 envelope.
pub fn panic_response(pod_name: &str, panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiRejection::new(
        ApiError::Internal(anyhow::anyhow!("handler panicked: {}", detail)),
        pod_name,
    )
    .into_response()
}
