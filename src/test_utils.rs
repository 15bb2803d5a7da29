//! Shared test utilities for the package desk.
//!
//! This module provides common helper functions for setting up test databases
//! and seeding a small catalog and operator with sensible defaults.

use crate::{
    config::catalog::{Catalog, ClientConfig},
    core::{
        auth::{self, NewOperator},
        catalog,
        day::DayWindow,
        registration::{self, RegistrationOutcome},
    },
    entities::{Log, operator},
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Client owning codes `1001` and `1002`.
pub const ACME: &str = "ACME";
/// Client owning code `2001`.
pub const GLOBEX: &str = "Globex";
/// Code present in the catalog but deactivated.
pub const INACTIVE_CODE: &str = "3001";

/// Email of the operator created by `create_test_operator`.
pub const TEST_EMAIL: &str = "desk@example.com";
/// Password of the operator created by `create_test_operator`.
pub const TEST_PASSWORD: &str = "correct horse";
/// Discord ID linked to the operator created by `create_test_operator`.
pub const TEST_DISCORD_ID: &str = "123456789";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Seeds ACME (`1001`, `1002`), Globex (`2001`) and an inactive Initech code.
pub async fn seed_test_catalog(db: &DatabaseConnection) -> Result<()> {
    let catalog = Catalog {
        clients: vec![
            ClientConfig {
                name: ACME.to_string(),
                codes: vec!["1001".to_string(), "1002".to_string()],
                active: true,
            },
            ClientConfig {
                name: GLOBEX.to_string(),
                codes: vec!["2001".to_string()],
                active: true,
            },
            ClientConfig {
                name: "Initech".to_string(),
                codes: vec![INACTIVE_CODE.to_string()],
                active: false,
            },
        ],
    };
    catalog::seed_catalog(db, &catalog).await?;
    Ok(())
}

/// Test database with the test catalog already seeded.
pub async fn setup_with_catalog() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_test_catalog(&db).await?;
    Ok(db)
}

/// Fixed instant used by tests: 2026-03-14 10:00:00 UTC.
#[must_use]
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Registers a code at `at` on UTC days as `test_user`.
pub async fn register_test_package(
    db: &DatabaseConnection,
    code: &str,
    at: DateTime<Utc>,
) -> Result<RegistrationOutcome> {
    registration::register_package_at(db, &DayWindow::utc(), code, Some("test_user"), at).await
}

/// Number of stored logs, voided ones included.
pub async fn count_logs(db: &DatabaseConnection) -> Result<u64> {
    Ok(Log::find().count(db).await?)
}

/// Creates an active operator using `TEST_EMAIL`, `TEST_PASSWORD` and `TEST_DISCORD_ID`.
pub async fn create_test_operator(db: &DatabaseConnection) -> Result<operator::Model> {
    auth::create_operator(
        db,
        NewOperator {
            email: TEST_EMAIL.to_string(),
            display_name: "Front Desk".to_string(),
            password: TEST_PASSWORD.to_string(),
            discord_user_id: Some(TEST_DISCORD_ID.to_string()),
        },
    )
    .await
}
