#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use package_desk::{
    bot::{self, BotData},
    config::{catalog, database, operators, settings::Settings},
    core::{auth, catalog::seed_catalog, guard::SubmitGuard},
    errors::Result,
    http::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Runtime settings
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Critical error loading settings: {e}"))?;
    info!(
        "Desk runs on UTC offset {} with a {:?} submit window",
        settings.utc_offset, settings.submit_window
    );

    // 4. Database
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Client code catalog
    let client_catalog = catalog::load_catalog_or_default(&settings.catalog_path)?;
    seed_catalog(&db, &client_catalog)
        .await
        .inspect_err(|e| error!("Failed to seed client catalog: {e}"))?;

    // 6. Seed operator
    match operators::admin_seed_from_env() {
        Some(seed) => {
            auth::ensure_operator(&db, &seed).await?;
        }
        None => warn!("DESK_ADMIN_EMAIL/DESK_ADMIN_PASSWORD not set; no operator seeded"),
    }

    // 7. Serve the API, and the bot when a token is configured
    let guard = Arc::new(SubmitGuard::new(settings.submit_window));
    let state = Arc::new(AppState::new(db.clone(), &settings, Arc::clone(&guard)));
    let server = http::serve(state, settings.port);

    match settings.discord_token.clone() {
        Some(token) => {
            let data = BotData::new(db, settings.day_window(), guard);
            tokio::select! {
                result = server => result?,
                result = bot::run_bot(token, data) => result?,
            }
        }
        None => {
            info!("DISCORD_BOT_TOKEN not set; running the HTTP API only");
            server.await?;
        }
    }

    Ok(())
}
