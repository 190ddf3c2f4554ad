//! Error handling module
//!
//! Centralized error types and HTTP response conversion. Domain errors map
//! to precise 4xx responses; infrastructure errors are logged in full and
//! surfaced as a generic 500 with no internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::TransferError;
use crate::ledger::LedgerStoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing required header: {0}")]
    MissingHeader(String),

    #[error("Cannot find '{0}' route on this server")]
    RouteNotFound(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] TransferError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<LedgerStoreError> for AppError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::DuplicateIdempotencyKey(key) => {
                AppError::Domain(TransferError::IdempotencyConflict { key })
            }
            LedgerStoreError::Database(e) => AppError::Database(e),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }
            AppError::MissingHeader(header) => {
                (StatusCode::BAD_REQUEST, "missing_header", Some(header.clone()))
            }

            // 404 Not Found
            AppError::RouteNotFound(path) => {
                (StatusCode::NOT_FOUND, "route_not_found", Some(path.clone()))
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(ref domain_err) => match domain_err {
                TransferError::UnknownSourceWallet(_)
                | TransferError::UnknownDestinationWallet(_)
                | TransferError::SameWalletTransfer
                | TransferError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "validation_error", Some(domain_err.to_string()))
                }
                TransferError::InvalidAmount(e) => {
                    (StatusCode::BAD_REQUEST, "invalid_amount", Some(e.to_string()))
                }
                TransferError::InsufficientFunds { .. } => {
                    (StatusCode::BAD_REQUEST, "insufficient_funds", Some(domain_err.to_string()))
                }
                TransferError::IdempotencyConflict { key } => {
                    (StatusCode::CONFLICT, "idempotency_conflict", Some(key.clone()))
                }
            },

            // 500 Internal Server Error - detail is logged, never leaked
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let error = if status.is_server_error() {
            "Something went wrong. Please try again after a while.".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_errors_map_to_400() {
        let response =
            AppError::Domain(TransferError::UnknownSourceWallet("X".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Domain(TransferError::SameWalletTransfer).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_insufficient_funds_maps_to_400() {
        let err = AppError::Domain(TransferError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_idempotency_conflict_maps_to_409() {
        let err = AppError::Domain(TransferError::IdempotencyConflict { key: "k".into() });
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_errors_map_to_500_without_detail() {
        let response = AppError::Internal("connection pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_duplicate_key_store_error_becomes_conflict() {
        let err: AppError = LedgerStoreError::DuplicateIdempotencyKey("k1".into()).into();
        assert!(matches!(
            err,
            AppError::Domain(TransferError::IdempotencyConflict { .. })
        ));
    }
}
