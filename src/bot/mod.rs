//! Bot layer - Discord front desk.
//!
//! Slash commands mirror the HTTP API: register, void, history, summary and today's
//! dashboard. Commands that touch logs require the Discord author to be linked to an
//! active operator through `discord_user_id`.

/// Discord command implementations (desk, reports, general)
pub mod commands;
/// Discord interaction handlers (autocomplete)
pub mod handlers;

use crate::{
    core::{auth, day::DayWindow, guard::SubmitGuard},
    entities::operator,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Reply sent to Discord users without a linked operator.
pub const NOT_LINKED_MESSAGE: &str =
    "🔒 Your Discord account is not linked to a desk operator. Ask an admin to add your Discord ID.";

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Day boundaries used for numbering and reports
    pub window: DayWindow,
    /// Double-submit guard, shared with the HTTP API
    pub guard: Arc<SubmitGuard>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, window: DayWindow, guard: Arc<SubmitGuard>) -> Self {
        Self {
            database,
            window,
            guard,
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Operator linked to the command author, replying with instructions when there is none.
pub async fn require_operator(ctx: Context<'_>) -> Result<Option<operator::Model>> {
    let discord_id = ctx.author().id.to_string();
    let linked = auth::operator_for_discord(&ctx.data().database, &discord_id).await?;
    if linked.is_none() {
        warn!("Discord user {discord_id} is not linked to an operator");
        ctx.say(NOT_LINKED_MESSAGE).await?;
    }
    Ok(linked)
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Runs the Discord bot until the gateway connection ends.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::register(),
                commands::void_entry(),
                commands::history(),
                commands::summary(),
                commands::today(),
                commands::ping(),
                commands::help(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
