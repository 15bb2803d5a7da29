//! Client code catalog business logic.
//!
//! Seeds the `client_codes` table from the configured catalog and looks codes up at
//! registration time. Seeding is idempotent: existing codes are updated in place and
//! codes are never deleted, so logs keep pointing at a known client.

use crate::{
    config::catalog::Catalog,
    entities::{ClientCode, client_code},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Counts of what a seeding pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Codes that did not exist before
    pub inserted: usize,
    /// Existing codes whose client or active flag changed
    pub updated: usize,
    /// Existing codes left as they were
    pub unchanged: usize,
}

/// Finds an active code, trimming the input first.
pub async fn find_active_code<C>(db: &C, code: &str) -> Result<Option<client_code::Model>>
where
    C: ConnectionTrait,
{
    ClientCode::find()
        .filter(client_code::Column::Code.eq(code.trim()))
        .filter(client_code::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every code, ordered by code.
pub async fn get_all_codes(db: &DatabaseConnection) -> Result<Vec<client_code::Model>> {
    ClientCode::find()
        .order_by_asc(client_code::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts or updates every code listed in the catalog.
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &Catalog) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for client in &catalog.clients {
        let client_name = client.name.trim();
        for raw_code in &client.codes {
            let code = raw_code.trim();
            if code.is_empty() {
                continue;
            }

            let existing = ClientCode::find()
                .filter(client_code::Column::Code.eq(code))
                .one(db)
                .await?;

            match existing {
                Some(entry) if entry.client_name == client_name && entry.is_active == client.active => {
                    report.unchanged += 1;
                }
                Some(entry) => {
                    let mut active_model: client_code::ActiveModel = entry.into();
                    active_model.client_name = Set(client_name.to_string());
                    active_model.is_active = Set(client.active);
                    active_model.update(db).await?;
                    report.updated += 1;
                }
                None => {
                    client_code::ActiveModel {
                        code: Set(code.to_string()),
                        client_name: Set(client_name.to_string()),
                        is_active: Set(client.active),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?;
                    report.inserted += 1;
                }
            }
        }
    }

    info!(
        "Catalog seeded: {} inserted, {} updated, {} unchanged",
        report.inserted, report.updated, report.unchanged
    );
    Ok(report)
}
