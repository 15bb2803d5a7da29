//! Log entity - One package registration event.
//!
//! Each log records the registered `code`, the client it belongs to, the
//! `assigned_number` handed out for that client on its `business_day`, and the
//! operator that registered it. Logs are never deleted: `is_void` marks a log as
//! excluded from totals while keeping it for audit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    /// Unique identifier for the log
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the package was registered
    pub created_at: DateTimeUtc,
    /// Local calendar date the registration counts towards
    pub business_day: Date,
    /// The pre-issued code that was registered
    pub code: String,
    /// Client the code belongs to, copied at registration time
    pub client_name: String,
    /// Sequence number for this client on `business_day`, starting at 1
    pub assigned_number: i32,
    /// Operator ID that registered the package, if known
    pub user_id: Option<String>,
    /// Void flag - voided logs do not count towards any total
    pub is_void: bool,
    /// When the log was voided
    pub voided_at: Option<DateTimeUtc>,
    /// Operator ID that voided the log
    pub voided_by: Option<String>,
}

/// Logs keep a denormalized `client_name` and have no foreign keys
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
