//! History, void and summary routes.

use crate::{
    core::{
        history::{self, DayHistory},
        summary::{self, DailySummary},
        void,
    },
    entities::log,
    errors::Result,
    http::{auth::CurrentOperator, state::AppState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

/// `?date=YYYY-MM-DD`; today when absent or blank.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Requested local day
    pub date: Option<String>,
}

/// `GET /api/history`
pub async fn history(
    State(state): State<Arc<AppState>>,
    _current: CurrentOperator,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayHistory>> {
    let date = state.window.resolve_date(query.date.as_deref())?;
    Ok(Json(
        history::day_history(&state.database, &state.window, date).await?,
    ))
}

/// `POST /api/logs/:id/void`
pub async fn void_log(
    State(state): State<Arc<AppState>>,
    current: CurrentOperator,
    Path(log_id): Path<i64>,
) -> Result<Json<log::Model>> {
    let voided_by = current.user_id();
    Ok(Json(
        void::void_log(&state.database, log_id, Some(&voided_by)).await?,
    ))
}

/// `GET /api/summary`
pub async fn summary(
    State(state): State<Arc<AppState>>,
    _current: CurrentOperator,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailySummary>> {
    let date = state.window.resolve_date(query.date.as_deref())?;
    Ok(Json(
        summary::daily_summary(&state.database, &state.window, date).await?,
    ))
}
