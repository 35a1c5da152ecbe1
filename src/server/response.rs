//! Error translation for the HTTP API
//!
//! Every failure leaves the server as `{"error": true, "message": ...}`.
//! Upstream details are logged, never returned.

use crate::geo::UpstreamError;
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// API error returned by route handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required query parameter was absent or empty
    #[error("{0}")]
    MissingParameter(&'static str),

    /// A parameter was present but could not be used
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    MethodNotAllowed(&'static str),

    /// An upstream provider call failed; `message` is the public text
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("{0}")]
    Internal(String),
}

/// JSON body for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ApiError {
    /// Wrap an upstream failure under a fixed public message
    pub fn upstream(message: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { message, source }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream { message, source } => error!("{}: {}", message, source),
            Self::Internal(message) => error!("Internal error: {}", message),
            other => warn!("Request rejected: {}", other),
        }

        let body = ErrorBody {
            error: true,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidParameter(rejection.body_text())
    }
}
