use sea_orm::entity::prelude::*;

/// Pending authentication code bound to a game player.
/// Both columns are unique: one code per player, one player per code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub auth_code: String,
    #[sea_orm(unique, column_type = "Text")]
    pub player_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
