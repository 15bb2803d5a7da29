//! Register-page dashboard: today's total and the most recent registration.

use crate::{
    core::day::DayWindow,
    entities::{Log, log},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, prelude::*};
use serde::Serialize;

/// Figures shown next to the registration input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// The local day the figures belong to
    pub date: NaiveDate,
    /// Non-void registrations today
    pub total_today: u64,
    /// Newest registration today
    pub last_log: Option<log::Model>,
}

/// Dashboard for the current local day.
pub async fn today_dashboard(db: &DatabaseConnection, window: &DayWindow) -> Result<Dashboard> {
    today_dashboard_at(db, window, Utc::now()).await
}

/// Dashboard for the local day containing `now`.
pub async fn today_dashboard_at(
    db: &DatabaseConnection,
    window: &DayWindow,
    now: DateTime<Utc>,
) -> Result<Dashboard> {
    let date = window.business_day(now);
    let range = window.range(date)?;

    let total_today = Log::find()
        .filter(log::Column::CreatedAt.gte(range.start))
        .filter(log::Column::CreatedAt.lt(range.end))
        .filter(log::Column::IsVoid.eq(false))
        .count(db)
        .await?;

    let last_log = Log::find()
        .filter(log::Column::CreatedAt.gte(range.start))
        .filter(log::Column::CreatedAt.lt(range.end))
        .order_by_desc(log::Column::CreatedAt)
        .order_by_desc(log::Column::Id)
        .one(db)
        .await?;

    Ok(Dashboard {
        date,
        total_today,
        last_log,
    })
}
