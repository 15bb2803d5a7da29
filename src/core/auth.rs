//! Operator authentication business logic.
//!
//! Operators sign in with email and password and receive a bearer session token.
//! Passwords are stored as Argon2id PHC strings, so the salt and cost parameters
//! travel with the hash. Discord users are mapped to operators through
//! `discord_user_id` instead of sessions.

use crate::{
    config::operators::OperatorSeed,
    entities::{Operator, Session, operator, session},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Input for creating an operator.
#[derive(Debug, Clone)]
pub struct NewOperator {
    /// Sign-in email
    pub email: String,
    /// Name shown in the desk
    pub display_name: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Discord user ID to link
    pub discord_user_id: Option<String>,
}

impl From<&OperatorSeed> for NewOperator {
    fn from(seed: &OperatorSeed) -> Self {
        Self {
            email: seed.email.clone(),
            display_name: seed.display_name.clone(),
            password: seed.password.clone(),
            discord_user_id: seed.discord_user_id.clone(),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(not(test))]
fn hasher() -> Argon2<'static> {
    Argon2::default()
}

// Minimum cost keeps the test suite fast; verification reads the cost from the hash.
#[cfg(test)]
fn hasher() -> Argon2<'static> {
    argon2::Params::new(argon2::Params::MIN_M_COST, 1, 1, None).map_or_else(
        |_| Argon2::default(),
        |params| Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
    )
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(|e| Error::Config {
        message: format!("Failed to generate password salt: {e}"),
    })?;
    let hash = hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Config {
            message: format!("Failed to hash password: {e}"),
        })?;
    Ok(hash.to_string())
}

fn verify_password(operator: &operator::Model, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(&operator.password_hash) else {
        warn!("Operator {} has a malformed password hash", operator.id);
        return false;
    };
    hasher()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Creates an operator with a freshly salted password.
///
/// # Errors
/// Returns `Error::Validation` for a blank email, display name or password, or an
/// email without `@`.
pub async fn create_operator(db: &DatabaseConnection, input: NewOperator) -> Result<operator::Model> {
    let email = normalize_email(&input.email);
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation {
            message: format!("'{}' is not a valid email", input.email.trim()),
        });
    }
    if input.display_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Display name cannot be empty".to_string(),
        });
    }
    if input.password.is_empty() {
        return Err(Error::Validation {
            message: "Password cannot be empty".to_string(),
        });
    }

    let password_hash = hash_password(&input.password)?;

    let created = operator::ActiveModel {
        email: Set(email),
        display_name: Set(input.display_name.trim().to_string()),
        password_hash: Set(password_hash),
        discord_user_id: Set(input.discord_user_id.filter(|id| !id.trim().is_empty())),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created operator {} ({})", created.id, created.email);
    Ok(created)
}

/// Creates the seed operator unless an operator with that email already exists.
///
/// An existing operator is returned untouched; its password is never reset.
pub async fn ensure_operator(db: &DatabaseConnection, seed: &OperatorSeed) -> Result<operator::Model> {
    if let Some(existing) = find_operator_by_email(db, &seed.email).await? {
        debug!("Seed operator {} already exists", existing.email);
        return Ok(existing);
    }
    create_operator(db, NewOperator::from(seed)).await
}

/// Finds an operator by email, ignoring case and surrounding whitespace.
pub async fn find_operator_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<operator::Model>> {
    Operator::find()
        .filter(operator::Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Signs an operator in now.
pub async fn sign_in(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    ttl: Duration,
) -> Result<(operator::Model, session::Model)> {
    sign_in_at(db, email, password, ttl, Utc::now()).await
}

/// Signs an operator in at `now` and opens a session valid for `ttl`.
///
/// Expired sessions are purged on every sign-in.
///
/// # Errors
/// Returns `Error::InvalidCredentials` for an unknown email, a wrong password, or an
/// inactive operator. The three cases are indistinguishable to the caller.
pub async fn sign_in_at(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<(operator::Model, session::Model)> {
    let Some(operator) = find_operator_by_email(db, email).await? else {
        warn!("Sign-in attempt for unknown email");
        return Err(Error::InvalidCredentials);
    };

    if !operator.is_active || !verify_password(&operator, password) {
        warn!("Rejected sign-in for operator {}", operator.id);
        return Err(Error::InvalidCredentials);
    }

    purge_expired_sessions(db, now).await?;

    let created = session::ActiveModel {
        token: Set(Uuid::new_v4().simple().to_string()),
        operator_id: Set(operator.id),
        created_at: Set(now),
        expires_at: Set(now + ttl),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Operator {} signed in", operator.id);
    Ok((operator, created))
}

/// Resolves a session token to its operator now.
pub async fn lookup_session(
    db: &DatabaseConnection,
    token: &str,
) -> Result<Option<operator::Model>> {
    lookup_session_at(db, token, Utc::now()).await
}

/// Resolves a session token to its operator at `now`.
///
/// Returns `None` for unknown or expired tokens and for deactivated operators.
pub async fn lookup_session_at(
    db: &DatabaseConnection,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<operator::Model>> {
    let Some(found) = Session::find()
        .filter(session::Column::Token.eq(token))
        .filter(session::Column::ExpiresAt.gt(now))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let operator = found.find_related(Operator).one(db).await?;
    Ok(operator.filter(|operator| operator.is_active))
}

/// Ends a session. Returns whether a session was removed.
pub async fn sign_out(db: &DatabaseConnection, token: &str) -> Result<bool> {
    let result = Session::delete_many()
        .filter(session::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Deletes sessions that expired at or before `now`.
pub async fn purge_expired_sessions(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<u64> {
    let result = Session::delete_many()
        .filter(session::Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;
    if result.rows_affected > 0 {
        debug!("Purged {} expired sessions", result.rows_affected);
    }
    Ok(result.rows_affected)
}

/// Finds the active operator linked to a Discord user.
pub async fn operator_for_discord(
    db: &DatabaseConnection,
    discord_user_id: &str,
) -> Result<Option<operator::Model>> {
    Operator::find()
        .filter(operator::Column::DiscordUserId.eq(discord_user_id))
        .filter(operator::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn ttl() -> Duration {
        Duration::hours(12)
    }

    #[test]
    fn test_hash_password_is_salted_argon2() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert!(a.starts_with("$argon2id$"));
        // A fresh salt per hash
        assert_ne!(a, b);
        assert!(!a.contains("secret"));
    }

    #[test]
    fn test_verify_password() {
        let stored = operator::Model {
            id: 1,
            email: TEST_EMAIL.to_string(),
            display_name: "Desk".to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            discord_user_id: None,
            is_active: true,
            created_at: test_instant(),
        };
        assert!(verify_password(&stored, TEST_PASSWORD));
        assert!(!verify_password(&stored, "wrong"));

        let malformed = operator::Model {
            password_hash: "not-a-phc-string".to_string(),
            ..stored
        };
        assert!(!verify_password(&malformed, TEST_PASSWORD));
    }

    #[tokio::test]
    async fn test_create_operator_normalizes_email_and_hides_password() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_operator(
            &db,
            NewOperator {
                email: "  Desk@Example.COM ".to_string(),
                display_name: "Desk".to_string(),
                password: TEST_PASSWORD.to_string(),
                discord_user_id: Some(" ".to_string()),
            },
        )
        .await?;

        assert_eq!(created.email, "desk@example.com");
        assert_ne!(created.password_hash, TEST_PASSWORD);
        assert!(created.discord_user_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_operator_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_operator(
            &db,
            NewOperator {
                email: "not-an-email".to_string(),
                display_name: "Desk".to_string(),
                password: TEST_PASSWORD.to_string(),
                discord_user_id: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_and_lookup_session() -> Result<()> {
        let db = setup_test_db().await?;
        let operator = create_test_operator(&db).await?;
        let now = test_instant();

        let (signed_in, opened) =
            sign_in_at(&db, "DESK@example.com", TEST_PASSWORD, ttl(), now).await?;
        assert_eq!(signed_in.id, operator.id);
        assert_eq!(opened.expires_at, now + ttl());

        let found = lookup_session_at(&db, &opened.token, now + Duration::hours(1)).await?;
        assert_eq!(found.map(|o| o.id), Some(operator.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_rejects_bad_credentials() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_operator(&db).await?;
        let now = test_instant();

        let wrong_password = sign_in_at(&db, TEST_EMAIL, "nope", ttl(), now).await;
        assert!(matches!(wrong_password, Err(Error::InvalidCredentials)));

        let unknown = sign_in_at(&db, "who@example.com", TEST_PASSWORD, ttl(), now).await;
        assert!(matches!(unknown, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_rejects_inactive_operator() -> Result<()> {
        let db = setup_test_db().await?;
        let operator = create_test_operator(&db).await?;
        let mut active_model: operator::ActiveModel = operator.into();
        active_model.is_active = Set(false);
        active_model.update(&db).await?;

        let result = sign_in_at(&db, TEST_EMAIL, TEST_PASSWORD, ttl(), test_instant()).await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_session_expires() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_operator(&db).await?;
        let now = test_instant();

        let (_, opened) = sign_in_at(&db, TEST_EMAIL, TEST_PASSWORD, ttl(), now).await?;
        let expired = lookup_session_at(&db, &opened.token, now + ttl()).await?;
        assert!(expired.is_none());

        // The next sign-in purges the expired session
        sign_in_at(&db, TEST_EMAIL, TEST_PASSWORD, ttl(), now + ttl()).await?;
        let remaining = Session::find()
            .filter(session::Column::Token.eq(opened.token.as_str()))
            .one(&db)
            .await?;
        assert!(remaining.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_operator(&db).await?;
        let now = test_instant();

        let (_, opened) = sign_in_at(&db, TEST_EMAIL, TEST_PASSWORD, ttl(), now).await?;
        assert!(sign_out(&db, &opened.token).await?);
        assert!(!sign_out(&db, &opened.token).await?);
        assert!(lookup_session_at(&db, &opened.token, now).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_operator_keeps_existing_password() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = OperatorSeed {
            email: TEST_EMAIL.to_string(),
            display_name: "Desk".to_string(),
            password: TEST_PASSWORD.to_string(),
            discord_user_id: Some(TEST_DISCORD_ID.to_string()),
        };

        let first = ensure_operator(&db, &seed).await?;
        let changed = OperatorSeed {
            password: "changed".to_string(),
            ..seed.clone()
        };
        let second = ensure_operator(&db, &changed).await?;

        assert_eq!(first.id, second.id);
        assert!(sign_in_at(&db, TEST_EMAIL, TEST_PASSWORD, ttl(), test_instant()).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_operator_for_discord() -> Result<()> {
        let db = setup_test_db().await?;
        let operator = create_test_operator(&db).await?;

        let found = operator_for_discord(&db, TEST_DISCORD_ID).await?;
        assert_eq!(found.map(|o| o.id), Some(operator.id));
        assert!(operator_for_discord(&db, "unknown").await?.is_none());
        Ok(())
    }
}
