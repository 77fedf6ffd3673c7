use sea_orm::DatabaseConnection;

use crate::domain::generator::RandomCodeGenerator;
use crate::infra::db::DbAuthCodeRepository;
use crate::usecase::authorization::AuthorizationService;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn auth_code_repo(&self) -> DbAuthCodeRepository {
        DbAuthCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn authorization(&self) -> AuthorizationService<DbAuthCodeRepository, RandomCodeGenerator> {
        AuthorizationService {
            auth_codes: self.auth_code_repo(),
            generator: RandomCodeGenerator,
        }
    }
}
