//! Seed operator configuration from environment variables.
//!
//! The first operator is created from `DESK_ADMIN_EMAIL` and `DESK_ADMIN_PASSWORD`
//! so a fresh database can be signed into. `DESK_ADMIN_NAME` and
//! `DESK_ADMIN_DISCORD_ID` are optional.

/// Operator to create at start-up if it does not exist yet.
#[derive(Debug, Clone)]
pub struct OperatorSeed {
    /// Sign-in email
    pub email: String,
    /// Name shown in the desk
    pub display_name: String,
    /// Initial password
    pub password: String,
    /// Discord user ID to link, if any
    pub discord_user_id: Option<String>,
}

/// Reads the seed operator from the environment.
///
/// # Returns
///
/// `Some(seed)` when both email and password are set, `None` otherwise.
#[must_use]
pub fn admin_seed_from_env() -> Option<OperatorSeed> {
    seed_from_lookup(|key| std::env::var(key).ok())
}

fn seed_from_lookup<F>(lookup: F) -> Option<OperatorSeed>
where
    F: Fn(&str) -> Option<String>,
{
    let email = lookup("DESK_ADMIN_EMAIL").filter(|v| !v.trim().is_empty())?;
    let password = lookup("DESK_ADMIN_PASSWORD").filter(|v| !v.is_empty())?;
    let display_name = lookup("DESK_ADMIN_NAME").unwrap_or_else(|| "Admin".to_string());
    let discord_user_id = lookup("DESK_ADMIN_DISCORD_ID").filter(|v| !v.trim().is_empty());

    Some(OperatorSeed {
        email,
        display_name,
        password,
        discord_user_id,
    })
}
