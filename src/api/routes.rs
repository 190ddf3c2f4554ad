//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, State},
    http::{StatusCode, Uri},
    middleware,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{TransferCommand, TransferHandler, TransferStatus};

use super::middleware::{require_idempotency_key, IdempotencyKey};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TransferRequest {
    /// Structural checks performed before the transfer engine runs:
    /// both account names present, amount at least 1.
    fn validate(&self) -> Result<(), AppError> {
        if self.from_account.trim().is_empty()
            || self.to_account.trim().is_empty()
            || self.amount < Decimal::ONE
        {
            return Err(AppError::InvalidRequest(
                "Missing required transfer data: 'fromAccount', 'toAccount', and 'amount' (Minimum 1)."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub status: TransferStatus,
    pub message: String,
    pub ledger_entry_id: Uuid,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/", get(index))
        .route(
            "/transfer",
            post(transfer).route_layer(middleware::from_fn(require_idempotency_key)),
        )
        .fallback(route_not_found)
}

/// Liveness banner
async fn index() -> &'static str {
    "wallet-ledger API is running."
}

// =========================================================================
// POST /transfer
// =========================================================================

/// Move funds between two named wallets
async fn transfer(
    State(pool): State<PgPool>,
    Extension(IdempotencyKey(idempotency_key)): Extension<IdempotencyKey>,
    Json(request): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), AppError> {
    request.validate()?;

    let command = TransferCommand::new(
        request.from_account,
        request.to_account,
        request.amount.to_string(),
        idempotency_key,
    );
    let command = if let Some(comment) = request.comment {
        command.with_comment(comment)
    } else {
        command
    };

    let handler = TransferHandler::new(pool);
    let outcome = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(TransferResponse {
            status: outcome.status,
            message: outcome.message,
            ledger_entry_id: outcome.ledger_entry_id,
        }),
    ))
}

/// Structured 404 for unknown routes
async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_request_deserialize() {
        let json = r#"{
            "fromAccount": "WALLET_1",
            "toAccount": "WALLET_2",
            "amount": 300.00,
            "comment": "Rent"
        }"#;

        let request: TransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.from_account, "WALLET_1");
        assert_eq!(request.amount, dec!(300.00));
        assert_eq!(request.comment, Some("Rent".to_string()));
    }

    #[test]
    fn test_transfer_request_comment_optional() {
        let json = r#"{"fromAccount": "A", "toAccount": "B", "amount": "5"}"#;
        let request: TransferRequest = serde_json::from_str(json).unwrap();
        assert!(request.comment.is_none());
    }

    #[test]
    fn test_transfer_request_validation() {
        let ok = TransferRequest {
            from_account: "WALLET_1".into(),
            to_account: "WALLET_2".into(),
            amount: dec!(10),
            comment: None,
        };
        assert!(ok.validate().is_ok());

        let empty_name = TransferRequest {
            from_account: "  ".into(),
            to_account: "WALLET_2".into(),
            amount: dec!(10),
            comment: None,
        };
        assert!(empty_name.validate().is_err());

        let below_minimum = TransferRequest {
            from_account: "WALLET_1".into(),
            to_account: "WALLET_2".into(),
            amount: dec!(0.50),
            comment: None,
        };
        assert!(below_minimum.validate().is_err());
    }
}
