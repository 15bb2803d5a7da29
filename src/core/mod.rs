/// Operator sign-in, sessions and Discord links
pub mod auth;

/// Client code catalog lookups and seeding
pub mod catalog;

/// Register-page dashboard
pub mod dashboard;

/// Local day boundaries
pub mod day;

/// Plain-text rendering for chat surfaces
pub mod format;

/// Anti double-submit guard
pub mod guard;

/// Daily history and per-client totals
pub mod history;

/// Package registration and numbering
pub mod registration;

/// Daily per-code summary
pub mod summary;

/// Voiding logs
pub mod void;
