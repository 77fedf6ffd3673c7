use tracing::{debug, info, warn};

use crate::domain::generator::CodeGenerator;
use crate::domain::repository::AuthCodeRepository;
use crate::domain::types::{AuthCode, MAX_ISSUE_ATTEMPTS};
use crate::error::AuthCodeServiceError;

/// Outcome of an issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuance {
    /// This call stored a new pending code.
    Created(String),
    /// The player already had a pending code, possibly from a concurrent call.
    Existing(String),
}

impl Issuance {
    pub fn into_code(self) -> String {
        match self {
            Self::Created(code) | Self::Existing(code) => code,
        }
    }
}

/// Issues and redeems player auth codes.
///
/// Holds no locks of its own. Concurrent callers are serialized by the
/// repository's uniqueness constraints.
pub struct AuthorizationService<A, G>
where
    A: AuthCodeRepository,
    G: CodeGenerator,
{
    pub auth_codes: A,
    pub generator: G,
}

impl<A, G> AuthorizationService<A, G>
where
    A: AuthCodeRepository,
    G: CodeGenerator,
{
    /// Return the pending code for `player_id`, issuing one if none exists.
    ///
    /// Repeated calls without an intervening redemption return the same code,
    /// including when several calls race on a player's first issuance.
    pub async fn issue_code(&self, player_id: &str) -> Result<String, AuthCodeServiceError> {
        Ok(self.issue(player_id).await?.into_code())
    }

    /// Like [`Self::issue_code`], but reports whether this call stored the code.
    pub async fn issue(&self, player_id: &str) -> Result<Issuance, AuthCodeServiceError> {
        if player_id.trim().is_empty() {
            return Err(AuthCodeServiceError::InvalidPlayerId);
        }

        if let Some(existing) = self.auth_codes.find_by_player(player_id).await? {
            return Ok(Issuance::Existing(existing.code));
        }

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let auth_code = AuthCode {
                code: self.generator.generate(),
                player_id: player_id.to_owned(),
            };

            match self.auth_codes.insert(&auth_code).await {
                Ok(()) => {
                    info!(player_id, "authcode issued");
                    return Ok(Issuance::Created(auth_code.code));
                }
                Err(AuthCodeServiceError::DuplicateAuthcode) => {
                    // Either another issuance for this player got in first,
                    // or the token collided with some other player's code.
                    if let Some(winner) = self.auth_codes.find_by_player(player_id).await? {
                        debug!(player_id, "lost issuance race, returning pending authcode");
                        return Ok(Issuance::Existing(winner.code));
                    }
                    warn!(player_id, attempt, "authcode collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AuthCodeServiceError::IssuanceFailed)
    }

    /// Redeem `code`, returning the bound player.
    ///
    /// The record is removed as part of the lookup, so a code redeems at
    /// most once even under concurrent calls. Unknown codes yield `None`.
    pub async fn authorize(&self, code: &str) -> Result<Option<String>, AuthCodeServiceError> {
        match self.auth_codes.take_by_code(code).await? {
            Some(redeemed) => {
                info!(player_id = %redeemed.player_id, "authcode redeemed");
                Ok(Some(redeemed.player_id))
            }
            None => {
                debug!("authcode redemption rejected");
                Ok(None)
            }
        }
    }

    /// Remove a pending code. Removing an unknown code is not an error.
    pub async fn remove_code(&self, code: &str) -> Result<(), AuthCodeServiceError> {
        let removed = self.auth_codes.delete_by_code(code).await?;
        debug!(removed, "authcode removal");
        Ok(())
    }

    pub async fn list_pending(&self) -> Result<Vec<AuthCode>, AuthCodeServiceError> {
        self.auth_codes.list_all().await
    }

    /// Pending code of `player_id`, if any.
    pub async fn get_auth_code(
        &self,
        player_id: &str,
    ) -> Result<Option<String>, AuthCodeServiceError> {
        Ok(self
            .auth_codes
            .find_by_player(player_id)
            .await?
            .map(|c| c.code))
    }

    /// Player bound to `code`, if the code is pending. Does not redeem.
    pub async fn get_player_id(&self, code: &str) -> Result<Option<String>, AuthCodeServiceError> {
        Ok(self
            .auth_codes
            .find_by_code(code)
            .await?
            .map(|c| c.player_id))
    }
}
