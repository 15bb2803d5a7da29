//! Client code catalog loading from config.toml
//!
//! The catalog lists every client and the pre-issued codes that belong to it.
//! It is used to seed the `client_codes` table at start-up.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    /// Clients and their codes
    #[serde(default)]
    pub clients: Vec<ClientConfig>,
}

/// Configuration for a single client
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Client name shown in history and totals
    pub name: String,
    /// Codes issued to this client
    pub codes: Vec<String>,
    /// Whether the codes accept registrations
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Catalog {
    /// Total number of codes across all clients.
    #[must_use]
    pub fn code_count(&self) -> usize {
        self.clients.iter().map(|client| client.codes.len()).sum()
    }
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A client has an empty name or a code is listed twice
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    let catalog = parse_catalog(&contents)?;
    Ok(catalog)
}

/// Loads the catalog, falling back to an empty one when the file is missing.
///
/// A present but malformed file is still an error.
pub fn load_catalog_or_default<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Catalog file {} not found, starting without codes", path.display());
        return Ok(Catalog::default());
    }
    load_catalog(path)
}

fn parse_catalog(contents: &str) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    let mut seen = std::collections::HashSet::new();
    for client in &catalog.clients {
        if client.name.trim().is_empty() {
            return Err(Error::Config {
                message: "Client name cannot be empty".to_string(),
            });
        }
        for code in &client.codes {
            if !seen.insert(code.trim()) {
                return Err(Error::Config {
                    message: format!("Code '{}' is listed more than once", code.trim()),
                });
            }
        }
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let toml_str = r#"
            [[clients]]
            name = "ACME"
            codes = ["1001", "1002"]

            [[clients]]
            name = "Globex"
            codes = ["2001"]
            active = false
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.clients.len(), 2);
        assert_eq!(catalog.clients[0].name, "ACME");
        assert!(catalog.clients[0].active);
        assert!(!catalog.clients[1].active);
        assert_eq!(catalog.code_count(), 3);
    }

    #[test]
    fn test_parse_catalog_rejects_duplicate_codes() {
        let toml_str = r#"
            [[clients]]
            name = "ACME"
            codes = ["1001"]

            [[clients]]
            name = "Globex"
            codes = [" 1001 "]
        "#;

        let result = parse_catalog(toml_str);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_empty_catalog() {
        let catalog = parse_catalog("").unwrap();
        assert!(catalog.clients.is_empty());
    }

    #[test]
    fn test_missing_catalog_file_is_empty() {
        let catalog = load_catalog_or_default("does/not/exist.toml").unwrap();
        assert_eq!(catalog.code_count(), 0);
    }
}
