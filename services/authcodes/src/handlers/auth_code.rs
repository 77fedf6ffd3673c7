use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::AuthCode;
use crate::error::AuthCodeServiceError;
use crate::state::AppState;
use crate::usecase::authorization::Issuance;

#[derive(Deserialize)]
pub struct IssueAuthcodeRequest {
    pub player_id: String,
}

#[derive(Serialize)]
pub struct AuthcodeResponse {
    pub code: String,
}

#[derive(Serialize)]
pub struct PlayerResponse {
    pub player_id: String,
}

/// Redemption outcome. A rejected code is a normal answer, not an error.
#[derive(Serialize)]
pub struct AuthorizeResponse {
    pub player_id: String,
    pub ok: bool,
}

// ── POST /auth/codes ─────────────────────────────────────────────────────────

/// 201 when a new code was stored, 200 when the pending one is returned.
pub async fn issue_authcode(
    State(state): State<AppState>,
    Json(body): Json<IssueAuthcodeRequest>,
) -> Result<(StatusCode, Json<AuthcodeResponse>), AuthCodeServiceError> {
    let resp = match state.authorization().issue(&body.player_id).await? {
        Issuance::Created(code) => (StatusCode::CREATED, Json(AuthcodeResponse { code })),
        Issuance::Existing(code) => (StatusCode::OK, Json(AuthcodeResponse { code })),
    };
    Ok(resp)
}

// ── GET /auth/codes ──────────────────────────────────────────────────────────

pub async fn list_authcodes(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthCode>>, AuthCodeServiceError> {
    let codes = state.authorization().list_pending().await?;
    Ok(Json(codes))
}

// ── GET /auth/players/{player_id}/code ───────────────────────────────────────

pub async fn get_player_authcode(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<AuthcodeResponse>, AuthCodeServiceError> {
    let code = state
        .authorization()
        .get_auth_code(&player_id)
        .await?
        .ok_or(AuthCodeServiceError::AuthcodeNotFound)?;
    Ok(Json(AuthcodeResponse { code }))
}

// ── GET /auth/codes/{code} ───────────────────────────────────────────────────

pub async fn get_authcode_player(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PlayerResponse>, AuthCodeServiceError> {
    let player_id = state
        .authorization()
        .get_player_id(&code)
        .await?
        .ok_or(AuthCodeServiceError::AuthcodeNotFound)?;
    Ok(Json(PlayerResponse { player_id }))
}

// ── POST /auth/codes/{code}/authorize ────────────────────────────────────────

pub async fn authorize_authcode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AuthorizeResponse>, AuthCodeServiceError> {
    let resp = match state.authorization().authorize(&code).await? {
        Some(player_id) => AuthorizeResponse {
            player_id,
            ok: true,
        },
        None => AuthorizeResponse {
            player_id: String::new(),
            ok: false,
        },
    };
    Ok(Json(resp))
}

// ── DELETE /auth/codes/{code} ────────────────────────────────────────────────

pub async fn remove_authcode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AuthCodeServiceError> {
    state.authorization().remove_code(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
