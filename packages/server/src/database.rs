use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entity::{asset, guest, session, user};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    setup_schema(&db).await?;
    Ok(db)
}

/// Create the application tables if they do not exist.
///
/// Table order matters: `asset` carries a foreign key to `user`.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(user::Entity);
    db.execute(backend.build(stmt.if_not_exists())).await?;

    let mut stmt = schema.create_table_from_entity(asset::Entity);
    db.execute(backend.build(stmt.if_not_exists())).await?;

    let mut stmt = schema.create_table_from_entity(guest::Entity);
    db.execute(backend.build(stmt.if_not_exists())).await?;

    let mut stmt = schema.create_table_from_entity(session::Entity);
    db.execute(backend.build(stmt.if_not_exists())).await?;

    Ok(())
}
