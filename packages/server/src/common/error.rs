//! Request-level error taxonomy and its HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brightdata_client::BrightDataError;
use openai_client::OpenAIError;
use serde_json::json;
use specter_client::SpecterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    /// Names the missing variable, never a value
    #[error("Server configuration error: {0} is not configured")]
    ConfigurationMissing(&'static str),

    #[error("{provider} is unreachable")]
    UpstreamUnreachable {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned HTTP {status}")]
    UpstreamRejected {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unusable response")]
    UpstreamMalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("{0} did not return a job handle")]
    MissingHandle(&'static str),

    #[error("{provider} job failed: {reason}")]
    JobFailed {
        provider: &'static str,
        reason: String,
    },

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Found")]
    NotFound,

    /// Detail is logged, never returned
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamUnreachable { .. }
            | AppError::UpstreamRejected { .. }
            | AppError::UpstreamMalformedResponse { .. }
            | AppError::MissingHandle(_)
            | AppError::JobFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ConfigurationMissing(var) => {
                tracing::error!(variable = var, "CRITICAL: required configuration missing");
            }
            AppError::UpstreamUnreachable { provider, detail }
            | AppError::UpstreamMalformedResponse { provider, detail } => {
                tracing::warn!(provider, detail = %detail, "{}", self);
            }
            AppError::UpstreamRejected {
                provider,
                status,
                body,
            } => {
                tracing::warn!(provider, status, body = %body, "Upstream request rejected");
            }
            AppError::MissingHandle(_) | AppError::JobFailed { .. } | AppError::Timeout(_) => {
                tracing::warn!("{}", self);
            }
            AppError::InvalidInput(_) | AppError::MethodNotAllowed | AppError::NotFound => {
                tracing::debug!("{}", self);
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "Unhandled middleware error");
            }
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(format!("Invalid query string: {}", rejection.body_text()))
    }
}

const BRIGHTDATA: &str = "Bright Data";
const SPECTER: &str = "Specter";
const OPENAI: &str = "OpenAI";

impl From<BrightDataError> for AppError {
    fn from(err: BrightDataError) -> Self {
        match err {
            BrightDataError::InvalidInput(msg) => AppError::InvalidInput(msg),
            BrightDataError::Unreachable(e) => AppError::UpstreamUnreachable {
                provider: BRIGHTDATA,
                detail: e.to_string(),
            },
            BrightDataError::Rejected { status, body } => AppError::UpstreamRejected {
                provider: BRIGHTDATA,
                status,
                body,
            },
            BrightDataError::MalformedResponse(detail) => AppError::UpstreamMalformedResponse {
                provider: BRIGHTDATA,
                detail,
            },
            BrightDataError::MissingHandle => AppError::MissingHandle(BRIGHTDATA),
            BrightDataError::JobFailed(reason) => AppError::JobFailed {
                provider: BRIGHTDATA,
                reason,
            },
            BrightDataError::Timeout { .. } => AppError::Timeout("LinkedIn data from Bright Data"),
        }
    }
}

impl From<SpecterError> for AppError {
    fn from(err: SpecterError) -> Self {
        match err {
            SpecterError::InvalidInput(msg) => AppError::InvalidInput(msg),
            SpecterError::Unreachable(e) => AppError::UpstreamUnreachable {
                provider: SPECTER,
                detail: e.to_string(),
            },
            SpecterError::Rejected { status, body } => AppError::UpstreamRejected {
                provider: SPECTER,
                status,
                body,
            },
            SpecterError::MalformedResponse(detail) => AppError::UpstreamMalformedResponse {
                provider: SPECTER,
                detail,
            },
        }
    }
}

impl From<OpenAIError> for AppError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Network(detail) => AppError::UpstreamUnreachable {
                provider: OPENAI,
                detail,
            },
            OpenAIError::Api { status, message } => AppError::UpstreamRejected {
                provider: OPENAI,
                status,
                body: message,
            },
            OpenAIError::Parse(detail) => AppError::UpstreamMalformedResponse {
                provider: OPENAI,
                detail,
            },
        }
    }
}
