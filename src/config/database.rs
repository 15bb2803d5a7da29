//! Database configuration module for the package desk.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Creation is idempotent and runs on every
//! start-up against the same database file.

use crate::entities::{ClientCode, Log, LogColumn, Operator, Session};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::debug;

/// Default location of the desk database, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/package_desk.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url).and_then(|path| path.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    (!path.is_empty() && !path.starts_with(':')).then(|| Path::new(path))
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Besides the entity tables this creates the unique index on
/// `(client_name, business_day, assigned_number)` that backs per-client daily numbering.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, ClientCode).await?;
    create_table(db, &schema, Log).await?;
    create_table(db, &schema, Operator).await?;
    create_table(db, &schema, Session).await?;

    let numbering_index = Index::create()
        .name("idx_logs_client_day_number")
        .table(Log)
        .col(LogColumn::ClientName)
        .col(LogColumn::BusinessDay)
        .col(LogColumn::AssignedNumber)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&numbering_index)).await?;

    let created_at_index = Index::create()
        .name("idx_logs_created_at")
        .table(Log)
        .col(LogColumn::CreatedAt)
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&created_at_index)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}
