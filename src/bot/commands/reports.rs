//! Report Discord commands - history, summary and today's dashboard.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, require_operator},
        core::{dashboard, format, history, summary},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Rows shown by `/history` before truncating.
    const HISTORY_ROWS: usize = 20;

    /// Resolves the optional date argument, replying when it cannot be parsed.
    async fn resolve_date(ctx: Context<'_>, date: Option<String>) -> Result<Option<chrono::NaiveDate>> {
        match ctx.data().window.resolve_date(date.as_deref()) {
            Ok(day) => Ok(Some(day)),
            Err(e @ Error::InvalidDate { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Shows every registration of a day, voided ones included.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(
        ctx: Context<'_>,
        #[description = "Day as YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        if require_operator(ctx).await?.is_none() {
            return Ok(());
        }
        let Some(day) = resolve_date(ctx, date).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let day_history = history::day_history(&data.database, &data.window, day).await?;
        ctx.say(format::format_history(&data.window, &day_history, HISTORY_ROWS))
            .await?;
        Ok(())
    }

    /// Shows the per-code totals of a day.
    #[poise::command(slash_command, prefix_command)]
    pub async fn summary(
        ctx: Context<'_>,
        #[description = "Day as YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        if require_operator(ctx).await?.is_none() {
            return Ok(());
        }
        let Some(day) = resolve_date(ctx, date).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let daily = summary::daily_summary(&data.database, &data.window, day).await?;
        ctx.say(format::format_summary(&daily)).await?;
        Ok(())
    }

    /// Shows today's total and the most recent registration.
    #[poise::command(slash_command, prefix_command)]
    pub async fn today(ctx: Context<'_>) -> Result<()> {
        if require_operator(ctx).await?.is_none() {
            return Ok(());
        }

        let data = ctx.data();
        let figures = dashboard::today_dashboard(&data.database, &data.window).await?;
        let last = figures.last_log.as_ref();

        let embed = serenity::CreateEmbed::default()
            .title("📦 Today at the desk")
            .description(figures.date.to_string())
            .color(0x0034_98DB)
            .field("Registered today", figures.total_today.to_string(), true)
            .field("Last client", format::format_last_log(&data.window, last), true)
            .field(
                "Last time",
                format::format_time(&data.window, last.map(|entry| entry.created_at)),
                true,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
