//! Daily summary business logic.
//!
//! Counts the non-void registrations of a local day per code, ordered by code. The
//! summary is what gets shared at the end of the day, so voided logs never appear.

use crate::{
    core::{day::DayWindow, history::logs_in_range},
    entities::log,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Packages registered for one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeTotal {
    /// The code
    pub code: String,
    /// Non-void registrations of the code on the day
    pub total: u64,
}

/// Per-code totals of one local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    /// The local day
    pub date: NaiveDate,
    /// Per-code totals, ordered by code
    pub rows: Vec<CodeTotal>,
    /// Sum of all rows
    pub total_day: u64,
}

impl DailySummary {
    /// Aggregates logs into per-code totals, skipping voided logs.
    #[must_use]
    pub fn from_logs(date: NaiveDate, logs: &[log::Model]) -> Self {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for entry in logs.iter().filter(|entry| !entry.is_void) {
            *totals.entry(entry.code.as_str()).or_insert(0) += 1;
        }

        let rows: Vec<CodeTotal> = totals
            .into_iter()
            .map(|(code, total)| CodeTotal {
                code: code.to_string(),
                total,
            })
            .collect();
        let total_day = rows.iter().map(|row| row.total).sum();

        Self {
            date,
            rows,
            total_day,
        }
    }
}

/// Loads the summary of one local day.
pub async fn daily_summary(
    db: &DatabaseConnection,
    window: &DayWindow,
    date: NaiveDate,
) -> Result<DailySummary> {
    let logs = logs_in_range(db, &window.range(date)?, false).await?;
    Ok(DailySummary::from_logs(date, &logs))
}
