use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded craft asset. Rows are immutable once created and removed
/// only by an instance reset; the blob itself lives in the content store
/// keyed by `content_hash`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// User-supplied label.
    pub name: String,

    /// SHA-256 of the blob, 64-char lowercase hex. Two uploads with
    /// identical bytes share one blob but each gets its own row.
    pub content_hash: String,

    pub user_id: i32,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
