//! Register page routes: dashboard and registration.

use crate::{
    core::{
        dashboard::{self, Dashboard},
        guard::SubmitDecision,
        registration::{self, RegistrationOutcome},
    },
    errors::Result,
    http::{auth::CurrentOperator, state::AppState},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Message sent back for an ignored repeat.
pub const DUPLICATE_MESSAGE: &str = "Duplicate submission ignored.";

/// Body of `POST /api/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Code as typed or scanned
    pub code: String,
}

/// Reply for a submission the guard ignored.
#[derive(Debug, Serialize)]
pub struct IgnoredSubmission {
    /// Always `false`
    pub ok: bool,
    /// Always `true`
    pub ignored: bool,
    /// Human-readable explanation
    pub message: &'static str,
}

/// `GET /api/dashboard`
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    _current: CurrentOperator,
) -> Result<Json<Dashboard>> {
    Ok(Json(
        dashboard::today_dashboard(&state.database, &state.window).await?,
    ))
}

/// `POST /api/register`
///
/// Rejected codes still answer 200 with `ok: false`; only repeats inside the guard
/// window answer 409.
pub async fn register(
    State(state): State<Arc<AppState>>,
    current: CurrentOperator,
    Json(request): Json<RegisterRequest>,
) -> Result<Response> {
    let user_id = current.user_id();
    let code = request.code.trim();

    if !code.is_empty() && state.guard.check(&user_id, code).await == SubmitDecision::Duplicate {
        debug!("Operator {user_id} repeated code '{code}'");
        let body = IgnoredSubmission {
            ok: false,
            ignored: true,
            message: DUPLICATE_MESSAGE,
        };
        return Ok((StatusCode::CONFLICT, Json(body)).into_response());
    }

    let outcome: RegistrationOutcome =
        registration::register_package(&state.database, &state.window, code, Some(&user_id))
            .await?;
    Ok(Json(outcome).into_response())
}
