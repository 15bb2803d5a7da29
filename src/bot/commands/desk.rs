//! Desk Discord commands - registering and voiding packages.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, require_operator},
        core::{format, guard::SubmitDecision, registration, void},
        errors::{Error, Result},
    };
    use tracing::debug;

    /// Registers a package code and shows the assigned number.
    #[poise::command(slash_command, prefix_command)]
    pub async fn register(
        ctx: Context<'_>,
        #[description = "Package code"]
        #[autocomplete = "autocomplete::autocomplete_code"]
        code: String,
    ) -> Result<()> {
        let Some(operator) = require_operator(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();
        let user_id = operator.id.to_string();
        let code = code.trim();

        if !code.is_empty() && data.guard.check(&user_id, code).await == SubmitDecision::Duplicate {
            debug!("Discord operator {user_id} repeated code '{code}'");
            ctx.say("⏱️ Same code submitted twice in a row; the repeat was ignored.")
                .await?;
            return Ok(());
        }

        let outcome =
            registration::register_package(&data.database, &data.window, code, Some(&user_id))
                .await?;
        ctx.say(format::format_registration(&outcome)).await?;
        Ok(())
    }

    /// Voids a log so it no longer counts towards totals.
    #[poise::command(slash_command, prefix_command, rename = "void")]
    pub async fn void_entry(
        ctx: Context<'_>,
        #[description = "Log ID, as shown by /history"] id: i64,
    ) -> Result<()> {
        let Some(operator) = require_operator(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        match void::void_log(&data.database, id, Some(&operator.id.to_string())).await {
            Ok(entry) => {
                ctx.say(format!(
                    "🗑️ Log #{} voided ({} · {} #{}).",
                    entry.id, entry.code, entry.client_name, entry.assigned_number
                ))
                .await?;
            }
            Err(Error::LogNotFound { id }) => {
                ctx.say(format!("❌ Log #{id} not found.")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
