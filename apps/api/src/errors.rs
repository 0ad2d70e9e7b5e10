use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::randomuser::UpstreamError;
use crate::validation::ValidationFailure;

/// Which `/random-*` endpoint failed; named in the generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Person,
    Address,
    Login,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Person => "person",
            Resource::Address => "address",
            Resource::Login => "login",
        })
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Invalid response from RandomUser API: {0}")]
    InvalidUpstream(ValidationFailure),

    #[error("Failed to fetch random {resource}: {source}")]
    Fetch {
        resource: Resource,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Upstream shape violations keep their field detail; everything else
    /// collapses into the generic per-resource failure.
    pub fn upstream(resource: Resource, err: UpstreamError) -> Self {
        match err {
            UpstreamError::Invalid(failure) => AppError::InvalidUpstream(failure),
            other => AppError::Fetch {
                resource,
                source: other.into(),
            },
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(failure)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(failure) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "details": failure.errors,
                }),
            ),
            AppError::InvalidUpstream(failure) => {
                tracing::warn!(
                    "RandomUser API response failed validation: {:?}",
                    failure.fields().collect::<Vec<_>>()
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Invalid response from RandomUser API",
                        "details": failure.errors,
                    }),
                )
            }
            AppError::Fetch { resource, source } => {
                tracing::error!("Error fetching random {resource}: {source:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("Failed to fetch random {resource}") }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
