#![allow(async_fn_in_trait)]

use crate::domain::types::AuthCode;
use crate::error::AuthCodeServiceError;

/// Storage for pending auth codes.
///
/// Implementations enforce uniqueness of both `code` and `player_id`
/// themselves; callers never lock around check-then-insert.
pub trait AuthCodeRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<AuthCode>, AuthCodeServiceError>;

    async fn find_by_player(
        &self,
        player_id: &str,
    ) -> Result<Option<AuthCode>, AuthCodeServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<AuthCode>, AuthCodeServiceError>;

    /// Insert a new pending code.
    ///
    /// Fails with [`AuthCodeServiceError::DuplicateAuthcode`] when either the
    /// code or the player already has a pending record.
    async fn insert(&self, code: &AuthCode) -> Result<(), AuthCodeServiceError>;

    /// Delete by code. Returns the number of removed records (0 or 1).
    async fn delete_by_code(&self, code: &str) -> Result<u64, AuthCodeServiceError>;

    /// Remove and return the record for `code`.
    ///
    /// Only the caller whose delete actually removed the row gets `Some`;
    /// concurrent callers racing on the same code get `None`.
    async fn take_by_code(&self, code: &str) -> Result<Option<AuthCode>, AuthCodeServiceError>;
}
