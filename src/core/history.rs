//! Daily history business logic.
//!
//! Fetches every log of a local day (voided ones included, newest first) and
//! aggregates it in memory: the day total and the per-client totals only count
//! non-void logs, while the table itself shows everything for audit.

use crate::{
    core::day::{DayRange, DayWindow},
    entities::{Log, log},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;
use std::collections::HashMap;

/// Non-void registrations of one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientTotal {
    /// Client name
    pub client_name: String,
    /// Non-void registrations for the day
    pub total: u64,
}

/// Everything shown for one day of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHistory {
    /// The local day
    pub date: NaiveDate,
    /// All logs of the day, newest first, voided ones included
    pub logs: Vec<log::Model>,
    /// Number of non-void logs
    pub total_day: u64,
    /// Per-client non-void totals, largest first
    pub totals_by_client: Vec<ClientTotal>,
    /// Newest log of the day
    pub last_log: Option<log::Model>,
}

impl DayHistory {
    /// Aggregates logs that are already ordered newest first.
    #[must_use]
    pub fn from_logs(date: NaiveDate, logs: Vec<log::Model>) -> Self {
        let total_day = count_active(&logs);
        let totals_by_client = totals_by_client(&logs);
        let last_log = logs.first().cloned();

        Self {
            date,
            logs,
            total_day,
            totals_by_client,
            last_log,
        }
    }
}

/// Logs created inside `range`, newest first.
///
/// # Arguments
/// * `db` - Database connection
/// * `range` - Half-open creation-time range
/// * `include_void` - Whether voided logs are returned
pub async fn logs_in_range<C>(db: &C, range: &DayRange, include_void: bool) -> Result<Vec<log::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Log::find()
        .filter(log::Column::CreatedAt.gte(range.start))
        .filter(log::Column::CreatedAt.lt(range.end));

    if !include_void {
        query = query.filter(log::Column::IsVoid.eq(false));
    }

    query
        .order_by_desc(log::Column::CreatedAt)
        .order_by_desc(log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads and aggregates the history of one local day.
pub async fn day_history(
    db: &DatabaseConnection,
    window: &DayWindow,
    date: NaiveDate,
) -> Result<DayHistory> {
    let logs = logs_in_range(db, &window.range(date)?, true).await?;
    Ok(DayHistory::from_logs(date, logs))
}

/// Number of non-void logs.
#[must_use]
pub fn count_active(logs: &[log::Model]) -> u64 {
    logs.iter().filter(|entry| !entry.is_void).count() as u64
}

/// Per-client non-void totals, sorted by total descending then client name.
#[must_use]
pub fn totals_by_client(logs: &[log::Model]) -> Vec<ClientTotal> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for entry in logs.iter().filter(|entry| !entry.is_void) {
        *totals.entry(entry.client_name.as_str()).or_insert(0) += 1;
    }

    let mut totals: Vec<ClientTotal> = totals
        .into_iter()
        .map(|(client_name, total)| ClientTotal {
            client_name: client_name.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    totals
}
