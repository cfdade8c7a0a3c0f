//! HTTP error responses
//!
//! Body shape: `{status:"error", error, details?, correlationId}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use contracts::{DispatchFailure, FailureKind};
use dispatcher::DispatcherError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Single-event body could not be decoded
    #[error("invalid request body")]
    InvalidBody { details: String, correlation_id: String },

    /// Batch body could not be decoded
    #[error("invalid batch body")]
    InvalidBatchBody { details: String, correlation_id: String },

    #[error("schema validation failed")]
    SchemaValidation { details: String, correlation_id: String },

    #[error("internal serialization error")]
    Serialization { correlation_id: String },

    #[error("failed sending to Pulsar")]
    Send { details: String, correlation_id: String },

    #[error("broker unavailable")]
    BrokerUnavailable { details: String, correlation_id: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status: &'static str,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
    correlation_id: &'a str,
}

impl ApiError {
    /// Map a dispatch failure to its HTTP error
    pub fn from_failure(failure: DispatchFailure, correlation_id: impl Into<String>) -> Self {
        let correlation_id = correlation_id.into();
        let details = failure.detail;
        match failure.kind {
            FailureKind::Validation => Self::SchemaValidation {
                details,
                correlation_id,
            },
            FailureKind::Serialization => Self::Serialization { correlation_id },
            FailureKind::Send => Self::Send {
                details,
                correlation_id,
            },
            FailureKind::Unavailable => Self::BrokerUnavailable {
                details,
                correlation_id,
            },
        }
    }

    pub fn from_dispatcher(err: DispatcherError, correlation_id: impl Into<String>) -> Self {
        let details = match err {
            DispatcherError::BrokerUnavailable { message } => message,
            other => other.to_string(),
        };
        Self::BrokerUnavailable {
            details,
            correlation_id: correlation_id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody { .. }
            | Self::InvalidBatchBody { .. }
            | Self::SchemaValidation { .. } => StatusCode::BAD_REQUEST,
            Self::Serialization { .. } | Self::Send { .. } | Self::BrokerUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::InvalidBody { details, .. }
            | Self::InvalidBatchBody { details, .. }
            | Self::SchemaValidation { details, .. }
            | Self::Send { details, .. }
            | Self::BrokerUnavailable { details, .. } => Some(details),
            Self::Serialization { .. } => None,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::InvalidBody { correlation_id, .. }
            | Self::InvalidBatchBody { correlation_id, .. }
            | Self::SchemaValidation { correlation_id, .. }
            | Self::Serialization { correlation_id }
            | Self::Send { correlation_id, .. }
            | Self::BrokerUnavailable { correlation_id, .. } => correlation_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            error: self.to_string(),
            details: self.details(),
            correlation_id: self.correlation_id(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
