// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the HTTP layer.

use crate::config::Action;
use crate::store::StoreError;
use crate::validator::ValidationError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{field}: {source}")]
    InvalidInput {
        field: &'static str,
        source: ValidationError,
    },

    #[error("Invalid JSON body")]
    InvalidBody(String),

    #[error("ID required")]
    MissingId,

    #[error("Invalid ID")]
    InvalidId(String),

    #[error("Too many {} attempts. Please try again later.", .action.description())]
    RateLimited { action: Action, retry_after: Duration },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Attach a field name to a validation failure.
    pub fn invalid(field: &'static str) -> impl FnOnce(ValidationError) -> Self {
        move |source| AppError::InvalidInput { field, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. }
            | AppError::InvalidBody(_)
            | AppError::MissingId
            | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Duplicate { .. }) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message returned to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::Store(StoreError::NotFound { entity, .. }) => {
                format!("{} not found", capitalize(entity))
            }
            AppError::Store(StoreError::Duplicate { field: "email", .. }) => {
                "Email already registered".to_string()
            }
            AppError::Store(StoreError::Duplicate { entity, field }) => {
                format!("{} {} already exists", capitalize(entity), field)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.public_message(),
        };

        match &self {
            AppError::InvalidBody(detail) | AppError::InvalidId(detail) => {
                info!(error = %self, detail = %detail, "Rejected request")
            }
            AppError::RateLimited { action, .. } => {
                warn!(action = %action, "Request rate limited")
            }
            AppError::InvalidCredentials => warn!("Admin login failed"),
            _ => info!(error = %self, status = status.as_u16(), "Request failed"),
        }

        if let AppError::RateLimited { retry_after, .. } = &self {
            let secs = retry_after_secs(*retry_after);
            return (status, [(header::RETRY_AFTER, secs.to_string())], Json(body)).into_response();
        }
        (status, Json(body)).into_response()
    }
}

/// Whole seconds for `Retry-After`, rounded up so a limited client never sees 0.
fn retry_after_secs(retry_after: Duration) -> u64 {
    retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
