/// Database connection and table creation
pub mod database;

/// Client code catalog loading from config.toml
pub mod catalog;

/// Seed operator configuration from environment variables
pub mod operators;

/// Runtime settings from environment variables
pub mod settings;
