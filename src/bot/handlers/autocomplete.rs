//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests catalog codes while the operator types, so `/register` can be used
//! without a scanner.

use crate::{
    bot::Context,
    core::catalog,
    entities::client_code,
};

/// Discord limit on autocomplete choices.
const MAX_CHOICES: usize = 25;

/// Provides autocomplete suggestions for active codes.
///
/// Matches the partial input against the code and the client name, case-insensitive.
pub async fn autocomplete_code(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(codes) = catalog::get_all_codes(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_codes(codes, partial)
}

fn matching_codes(codes: Vec<client_code::Model>, partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();

    codes
        .into_iter()
        .filter(|entry| entry.is_active)
        .filter(|entry| {
            entry.code.to_lowercase().contains(&partial_lower)
                || entry.client_name.to_lowercase().contains(&partial_lower)
        })
        .map(|entry| entry.code)
        .take(MAX_CHOICES)
        .collect()
}
