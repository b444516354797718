use sea_orm::entity::prelude::*;

/// Backing row for the tower-sessions store.
///
/// `data` holds the MessagePack-encoded session record; this crate only
/// ever reads it back through [`crate::session::SeaOrmSessionStore`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    pub data: Vec<u8>,

    pub expiry_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
