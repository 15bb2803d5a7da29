//! Runtime settings loaded from environment variables.
//!
//! Every setting has a default so the desk starts with an empty environment. A value
//! that is present but cannot be parsed is a configuration error rather than a silent
//! fallback.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::core::day::DayWindow;
use crate::errors::{Error, Result};
use chrono::FixedOffset;
use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::info;

/// Settings shared by the HTTP API and the Discord bot.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Database URL (`DATABASE_URL`)
    pub database_url: String,
    /// HTTP port (`DESK_PORT`)
    pub port: u16,
    /// Offset used to decide which calendar day a registration belongs to
    /// (`DESK_UTC_OFFSET_MINUTES`)
    pub utc_offset: FixedOffset,
    /// How long a sign-in session stays valid (`DESK_SESSION_TTL_HOURS`)
    pub session_ttl: chrono::Duration,
    /// Identical submissions within this window are ignored (`DESK_SUBMIT_WINDOW_MS`)
    pub submit_window: Duration,
    /// Path of the client code catalog (`DESK_CONFIG_PATH`)
    pub catalog_path: PathBuf,
    /// Discord bot token; the bot only runs when set (`DISCORD_BOT_TOKEN`)
    pub discord_token: Option<String>,
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let offset_minutes: i32 = try_load(&lookup, "DESK_UTC_OFFSET_MINUTES", 0)?;
        let utc_offset =
            FixedOffset::east_opt(offset_minutes.saturating_mul(60)).ok_or_else(|| {
                Error::Config {
                    message: format!("DESK_UTC_OFFSET_MINUTES out of range: {offset_minutes}"),
                }
            })?;

        let ttl_hours: i64 = try_load(&lookup, "DESK_SESSION_TTL_HOURS", 12)?;
        if ttl_hours <= 0 {
            return Err(Error::Config {
                message: format!("DESK_SESSION_TTL_HOURS must be positive, got {ttl_hours}"),
            });
        }
        let session_ttl = chrono::Duration::try_hours(ttl_hours).ok_or_else(|| Error::Config {
            message: format!("DESK_SESSION_TTL_HOURS out of range: {ttl_hours}"),
        })?;

        let window_ms: u64 = try_load(&lookup, "DESK_SUBMIT_WINDOW_MS", 1000)?;

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: try_load(&lookup, "DESK_PORT", 8080)?,
            utc_offset,
            session_ttl,
            submit_window: Duration::from_millis(window_ms),
            catalog_path: lookup("DESK_CONFIG_PATH")
                .map_or_else(|| PathBuf::from("config.toml"), PathBuf::from),
            discord_token: lookup("DISCORD_BOT_TOKEN").filter(|token| !token.trim().is_empty()),
        })
    }

    /// Day boundaries for the configured offset.
    #[must_use]
    pub const fn day_window(&self) -> DayWindow {
        DayWindow::new(self.utc_offset)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid {key} value '{raw}': {e}"),
    })
}
