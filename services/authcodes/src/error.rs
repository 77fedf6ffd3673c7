use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth code service error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthCodeServiceError {
    #[error("invalid player id")]
    InvalidPlayerId,
    #[error("authcode not found")]
    AuthcodeNotFound,
    /// Unique constraint hit on insert. Recovered inside issuance.
    #[error("authcode already exists")]
    DuplicateAuthcode,
    #[error("could not allocate a unique authcode")]
    IssuanceFailed,
    #[error("storage unavailable")]
    Storage(#[from] anyhow::Error),
}

impl AuthCodeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::AuthcodeNotFound => "AUTHCODE_NOT_FOUND",
            Self::DuplicateAuthcode => "DUPLICATE_AUTHCODE",
            Self::IssuanceFailed => "ISSUANCE_FAILED",
            Self::Storage(_) => "STORAGE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for AuthCodeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidPlayerId => StatusCode::BAD_REQUEST,
            Self::AuthcodeNotFound => StatusCode::NOT_FOUND,
            // Issuance always recovers from conflicts; reaching a handler is a bug.
            Self::DuplicateAuthcode | Self::IssuanceFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        // TraceLayer already records every response status; only server-side
        // failures carry a cause worth logging here.
        match &self {
            Self::Storage(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "storage error")
            }
            Self::DuplicateAuthcode | Self::IssuanceFailed => {
                tracing::error!(kind = self.kind(), "authcode issuance failed")
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
