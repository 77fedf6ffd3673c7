use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use linkcode_authcodes_schema::auth_codes;

use crate::domain::repository::AuthCodeRepository;
use crate::domain::types::AuthCode;
use crate::error::AuthCodeServiceError;

#[derive(Clone)]
pub struct DbAuthCodeRepository {
    pub db: DatabaseConnection,
}

impl AuthCodeRepository for DbAuthCodeRepository {
    async fn list_all(&self) -> Result<Vec<AuthCode>, AuthCodeServiceError> {
        let models = auth_codes::Entity::find()
            .order_by_asc(auth_codes::Column::PlayerId)
            .all(&self.db)
            .await
            .context("list authcodes")?;
        Ok(models.into_iter().map(authcode_from_model).collect())
    }

    async fn find_by_player(
        &self,
        player_id: &str,
    ) -> Result<Option<AuthCode>, AuthCodeServiceError> {
        let model = auth_codes::Entity::find()
            .filter(auth_codes::Column::PlayerId.eq(player_id))
            .one(&self.db)
            .await
            .context("find authcode by player")?;
        Ok(model.map(authcode_from_model))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<AuthCode>, AuthCodeServiceError> {
        let model = auth_codes::Entity::find_by_id(code.to_owned())
            .one(&self.db)
            .await
            .context("find authcode by code")?;
        Ok(model.map(authcode_from_model))
    }

    async fn insert(&self, code: &AuthCode) -> Result<(), AuthCodeServiceError> {
        let model = auth_codes::ActiveModel {
            auth_code: Set(code.code.clone()),
            player_id: Set(code.player_id.clone()),
        };
        match auth_codes::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AuthCodeServiceError::DuplicateAuthcode),
            Err(e) => Err(anyhow::Error::new(e).context("insert authcode").into()),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<u64, AuthCodeServiceError> {
        let result = auth_codes::Entity::delete_many()
            .filter(auth_codes::Column::AuthCode.eq(code))
            .exec(&self.db)
            .await
            .context("delete authcode")?;
        Ok(result.rows_affected)
    }

    async fn take_by_code(&self, code: &str) -> Result<Option<AuthCode>, AuthCodeServiceError> {
        let Some(found) = self.find_by_code(code).await? else {
            return Ok(None);
        };
        // The delete is the arbiter: a concurrent redeemer that read the same
        // row sees zero affected rows and loses.
        if self.delete_by_code(code).await? == 0 {
            return Ok(None);
        }
        Ok(Some(found))
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn authcode_from_model(model: auth_codes::Model) -> AuthCode {
    AuthCode {
        code: model.auth_code,
        player_id: model.player_id,
    }
}
