//! API Middleware
//!
//! Syntactic verification of the `Idempotency-Key` header. The transfer
//! engine treats the key as an opaque unique string; presence and format
//! are checked here, before the engine is ever invoked.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Validated idempotency key, injected as a request extension
#[derive(Debug, Clone)]
pub struct IdempotencyKey(pub String);

/// Reject requests without a well-formed `Idempotency-Key` header.
/// Keys must be UUID v4, matching what clients are documented to send.
pub async fn require_idempotency_key(
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let value = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .ok_or_else(|| AppError::MissingHeader(IDEMPOTENCY_KEY_HEADER.to_string()))?;

    let key = value.to_str().map_err(|_| {
        AppError::InvalidRequest("Idempotency-Key must be a valid string.".to_string())
    })?;

    let parsed = Uuid::parse_str(key).map_err(|_| {
        AppError::InvalidRequest("Idempotency-Key must be a valid UUID v4.".to_string())
    })?;

    if parsed.get_version_num() != 4 {
        return Err(AppError::InvalidRequest(
            "Idempotency-Key must be a valid UUID v4.".to_string(),
        ));
    }

    request
        .extensions_mut()
        .insert(IdempotencyKey(key.to_string()));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_v4_accepted() {
        let key = Uuid::new_v4();
        assert_eq!(key.get_version_num(), 4);
    }

    #[test]
    fn test_non_v4_uuid_detected() {
        // Nil UUID is version 0
        let nil = Uuid::nil();
        assert_ne!(nil.get_version_num(), 4);
    }
}
