use axum::{
    Router,
    routing::{get, post},
};

use linkcode_core::health::healthz;
use linkcode_core::middleware::with_request_tracing;

use crate::handlers::{
    auth_code::{
        authorize_authcode, get_authcode_player, get_player_authcode, issue_authcode,
        list_authcodes, remove_authcode,
    },
    health::readyz,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth codes
        .route("/auth/codes", post(issue_authcode).get(list_authcodes))
        .route(
            "/auth/codes/{code}",
            get(get_authcode_player).delete(remove_authcode),
        )
        .route("/auth/codes/{code}/authorize", post(authorize_authcode))
        .route("/auth/players/{player_id}/code", get(get_player_authcode))
        .with_state(state);
    with_request_tracing(router)
}
