//! Package registration business logic.
//!
//! `register_package` validates a code against the catalog, hands out the next
//! sequence number for the code's client on the current local day, and records the
//! log. The lookup, numbering and insert run in one database transaction, and the
//! unique index on `(client_name, business_day, assigned_number)` guarantees that two
//! concurrent registrations can never share a number.
//!
//! Numbers are never reused: voided logs keep their number and the next registration
//! continues after the highest number of the day.

use crate::{
    core::{catalog, day::DayWindow},
    entities::{ClientCode, Log, client_code, log},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Serialize;
use tracing::{info, warn};

/// Message returned when the submitted code is blank.
pub const EMPTY_CODE_MESSAGE: &str = "Enter a code before registering.";
/// Message returned when the code is unknown or inactive.
pub const UNKNOWN_CODE_MESSAGE: &str = "Code not registered. Please verify.";

/// Result of a registration attempt.
///
/// Rejected attempts have `ok == false`, a human-readable `message`, and no number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    /// Whether a log was recorded
    pub ok: bool,
    /// Human-readable result
    pub message: String,
    /// The code as registered (trimmed)
    pub code: Option<String>,
    /// Client the code belongs to
    pub client_name: Option<String>,
    /// Sequence number assigned for the client today
    pub assigned_number: Option<i32>,
    /// Non-void registrations for the client today, including this one
    pub total: Option<u64>,
    /// ID of the recorded log
    pub log_id: Option<i64>,
}

impl RegistrationOutcome {
    fn rejected(code: &str, message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
            code: (!code.is_empty()).then(|| code.to_string()),
            client_name: None,
            assigned_number: None,
            total: None,
            log_id: None,
        }
    }

    /// One-line text for the operator, e.g. `Registered for ACME. Number: 3. Total: 3.`
    #[must_use]
    pub fn display_message(&self) -> String {
        match (self.ok, self.assigned_number, self.total) {
            (true, Some(number), Some(total)) => {
                format!("{} Number: {number}. Total: {total}.", self.message)
            }
            _ => self.message.clone(),
        }
    }
}

/// Registers a package code now.
///
/// # Arguments
/// * `db` - Database connection
/// * `window` - Day boundaries used for numbering
/// * `code` - Code as typed or scanned; surrounding whitespace is ignored
/// * `user_id` - Operator that performs the registration
pub async fn register_package(
    db: &DatabaseConnection,
    window: &DayWindow,
    code: &str,
    user_id: Option<&str>,
) -> Result<RegistrationOutcome> {
    register_package_at(db, window, code, user_id, Utc::now()).await
}

/// Registers a package code as if it happened at `now`.
pub async fn register_package_at(
    db: &DatabaseConnection,
    window: &DayWindow,
    code: &str,
    user_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<RegistrationOutcome> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(RegistrationOutcome::rejected(code, EMPTY_CODE_MESSAGE));
    }

    let txn = db.begin().await?;

    // Open with a write so SQLite takes the write lock before the number is read;
    // concurrent registrations then queue on the busy timeout.
    ClientCode::update_many()
        .col_expr(client_code::Column::IsActive, Expr::value(true))
        .filter(client_code::Column::Code.eq(code))
        .filter(client_code::Column::IsActive.eq(true))
        .exec(&txn)
        .await?;

    let Some(entry) = catalog::find_active_code(&txn, code).await? else {
        txn.rollback().await?;
        warn!("Rejected registration of unknown code '{code}'");
        return Ok(RegistrationOutcome::rejected(code, UNKNOWN_CODE_MESSAGE));
    };

    let business_day = window.business_day(now);
    let assigned_number = next_number(&txn, &entry.client_name, business_day).await?;

    let created = log::ActiveModel {
        created_at: Set(now),
        business_day: Set(business_day),
        code: Set(entry.code.clone()),
        client_name: Set(entry.client_name.clone()),
        assigned_number: Set(assigned_number),
        user_id: Set(user_id.map(str::to_string)),
        is_void: Set(false),
        voided_at: Set(None),
        voided_by: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let total = Log::find()
        .filter(log::Column::ClientName.eq(entry.client_name.as_str()))
        .filter(log::Column::BusinessDay.eq(business_day))
        .filter(log::Column::IsVoid.eq(false))
        .count(&txn)
        .await?;

    txn.commit().await?;

    info!(
        "Registered code {} for {} as number {} on {} (log {})",
        created.code, created.client_name, assigned_number, business_day, created.id
    );

    Ok(RegistrationOutcome {
        ok: true,
        message: format!("Registered for {}.", created.client_name),
        code: Some(created.code),
        client_name: Some(created.client_name),
        assigned_number: Some(assigned_number),
        total: Some(total),
        log_id: Some(created.id),
    })
}

/// Next sequence number for `client_name` on `business_day`, counting voided logs.
async fn next_number<C>(db: &C, client_name: &str, business_day: NaiveDate) -> Result<i32>
where
    C: ConnectionTrait,
{
    let last = Log::find()
        .filter(log::Column::ClientName.eq(client_name))
        .filter(log::Column::BusinessDay.eq(business_day))
        .order_by_desc(log::Column::AssignedNumber)
        .one(db)
        .await?;

    Ok(last.map_or(1, |entry| entry.assigned_number + 1))
}
