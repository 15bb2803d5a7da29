//! General Discord commands - ping and help.
//! These commands don't require database operations or a linked operator.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Package Desk Help**\n\
        Desk commands need a Discord account linked to a desk operator.\n\n\
        **Desk Commands**\n\
        • `/register <code>` - Registers a package and shows its number for the day.\n\
        • `/void <id>` - Voids a log; it stays in history but stops counting.\n\n\
        **Report Commands**\n\
        • `/today` - Today's total and the last registration.\n\
        • `/history [date]` - Every registration of a day (YYYY-MM-DD).\n\
        • `/summary [date]` - Totals per code for a day.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
