//! Sign-in routes and the bearer-token extractor.

use crate::{
    core::auth,
    entities::operator,
    errors::{Error, Result},
    http::state::AppState,
};
use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The signed-in operator behind a request.
///
/// Resolved from `Authorization: Bearer <token>`; a missing, unknown or expired
/// token rejects the request with 401.
#[derive(Debug, Clone)]
pub struct CurrentOperator {
    /// The operator
    pub operator: operator::Model,
    /// The session token used
    pub token: String,
}

impl CurrentOperator {
    /// Identifier stored on logs this operator registers or voids.
    #[must_use]
    pub fn user_id(&self) -> String {
        self.operator.id.to_string()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentOperator {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
        let token = bearer_token(parts).ok_or(Error::Unauthorized)?.to_string();
        let operator = auth::lookup_session(&state.database, &token)
            .await?
            .ok_or(Error::Unauthorized)?;
        Ok(Self { operator, token })
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Sign-in email
    pub email: String,
    /// Password
    pub password: String,
}

/// A fresh session.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for later requests
    pub token: String,
    /// When the token stops working
    pub expires_at: DateTime<Utc>,
    /// The signed-in operator
    pub operator: operator::Model,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (operator, session) = auth::sign_in(
        &state.database,
        &request.email,
        &request.password,
        state.session_ttl,
    )
    .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        operator,
    }))
}

/// Result of `POST /api/auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Whether a session was removed
    pub signed_out: bool,
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(state): State<Arc<AppState>>,
    current: CurrentOperator,
) -> Result<Json<LogoutResponse>> {
    let signed_out = auth::sign_out(&state.database, &current.token).await?;
    Ok(Json(LogoutResponse { signed_out }))
}

/// `GET /api/auth/session`
pub async fn session(current: CurrentOperator) -> Json<operator::Model> {
    Json(current.operator)
}
