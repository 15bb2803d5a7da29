//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Registration and void commands
pub mod desk;

/// General utility commands
pub mod general;

/// History, summary and dashboard commands
pub mod reports;

// Export commands
pub use desk::*;
pub use general::*;
pub use reports::*;
