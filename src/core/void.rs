//! Void business logic.
//!
//! Voiding marks a log so it stops counting towards totals while keeping the row,
//! its number and its audit fields. The update is a single conditional statement
//! (`WHERE id = ? AND is_void = false`), so voiding twice leaves the first
//! `voided_at`/`voided_by` in place.

use crate::{
    entities::{Log, log},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{prelude::*, sea_query::Expr};
use tracing::{debug, info};

/// Voids a log now. Voiding an already-void log returns it unchanged.
///
/// # Errors
/// Returns `Error::LogNotFound` if no log has this ID.
pub async fn void_log(
    db: &DatabaseConnection,
    log_id: i64,
    voided_by: Option<&str>,
) -> Result<log::Model> {
    void_log_at(db, log_id, voided_by, Utc::now()).await
}

/// Voids a log as if it happened at `now`.
pub async fn void_log_at(
    db: &DatabaseConnection,
    log_id: i64,
    voided_by: Option<&str>,
    now: DateTime<Utc>,
) -> Result<log::Model> {
    let result = Log::update_many()
        .col_expr(log::Column::IsVoid, Expr::value(true))
        .col_expr(log::Column::VoidedAt, Expr::value(Some(now)))
        .col_expr(
            log::Column::VoidedBy,
            Expr::value(voided_by.map(str::to_string)),
        )
        .filter(log::Column::Id.eq(log_id))
        .filter(log::Column::IsVoid.eq(false))
        .exec(db)
        .await?;

    let entry = Log::find_by_id(log_id)
        .one(db)
        .await?
        .ok_or(Error::LogNotFound { id: log_id })?;

    if result.rows_affected > 0 {
        info!(
            "Voided log {} ({} #{} for {})",
            entry.id, entry.code, entry.assigned_number, entry.client_name
        );
    } else {
        debug!("Log {log_id} was already void");
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_void_log_sets_audit_fields() -> Result<()> {
        let db = setup_with_catalog().await?;
        let at = test_instant();
        let outcome = register_test_package(&db, "1001", at).await?;

        let voided_at = at + Duration::minutes(5);
        let voided = void_log_at(&db, outcome.log_id.unwrap(), Some("7"), voided_at).await?;

        assert!(voided.is_void);
        assert_eq!(voided.voided_at, Some(voided_at));
        assert_eq!(voided.voided_by.as_deref(), Some("7"));
        // Everything else is preserved for audit
        assert_eq!(voided.code, "1001");
        assert_eq!(voided.assigned_number, 1);
        assert_eq!(voided.created_at, at);
        Ok(())
    }

    #[tokio::test]
    async fn test_void_log_is_idempotent() -> Result<()> {
        let db = setup_with_catalog().await?;
        let at = test_instant();
        let outcome = register_test_package(&db, "1001", at).await?;
        let id = outcome.log_id.unwrap();

        let first = void_log_at(&db, id, Some("7"), at + Duration::minutes(1)).await?;
        let second = void_log_at(&db, id, Some("8"), at + Duration::minutes(2)).await?;

        assert_eq!(first, second);
        assert_eq!(second.voided_by.as_deref(), Some("7"));
        assert_eq!(count_logs(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_void_unknown_log() -> Result<()> {
        let db = setup_with_catalog().await?;

        let result = void_log(&db, 42, None).await;
        assert!(matches!(result, Err(Error::LogNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_void_only_touches_target_log() -> Result<()> {
        let db = setup_with_catalog().await?;
        let at = test_instant();
        let kept = register_test_package(&db, "1001", at).await?;
        let voided = register_test_package(&db, "1002", at + Duration::seconds(1)).await?;

        void_log(&db, voided.log_id.unwrap(), None).await?;

        let kept = Log::find_by_id(kept.log_id.unwrap()).one(&db).await?.unwrap();
        assert!(!kept.is_void);
        assert!(kept.voided_at.is_none());
        Ok(())
    }
}
