use serde::Serialize;

/// Pending authentication code bound to a game player.
///
/// A record lives from issuance until it is redeemed or removed; it is never
/// updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCode {
    pub code: String,
    pub player_id: String,
}

/// Auth code length in characters.
pub const AUTHCODE_LEN: usize = 8;

/// Insert attempts per issuance before giving up on token collisions.
pub const MAX_ISSUE_ATTEMPTS: usize = 3;
