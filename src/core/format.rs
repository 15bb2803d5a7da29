//! Text rendering for desk figures.
//!
//! These helpers turn core results into short plain-text lines and monospace tables
//! for chat surfaces. They never touch the database.

use crate::{
    core::{
        day::DayWindow,
        history::{ClientTotal, DayHistory},
        registration::RegistrationOutcome,
        summary::DailySummary,
    },
    entities::log,
};
use chrono::{DateTime, Utc};
use std::{borrow::Cow, fmt::Write};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

/// Longest message Discord accepts, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

const CODE_WIDTH: usize = 10;
const CLIENT_WIDTH: usize = 16;
const HEADER_FIELD_LIMIT: usize = 400;
// Room for the "… N more" line and the closing fence.
const TAIL_RESERVE: usize = 40;

/// Cuts `text` to at most `width` characters, ending the cut with `…`.
fn clip(text: &str, width: usize) -> Cow<'_, str> {
    if text.chars().count() <= width {
        return Cow::Borrowed(text);
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    Cow::Owned(clipped)
}

/// Status line for a registration attempt.
#[must_use]
pub fn format_registration(outcome: &RegistrationOutcome) -> String {
    let marker = if outcome.ok { "✅" } else { "❌" };
    format!("{marker} {}", outcome.display_message())
}

/// Local `HH:MM:SS` of an optional instant.
#[must_use]
pub fn format_time(window: &DayWindow, at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| PLACEHOLDER.to_string(), |at| window.time_of_day(at))
}

/// Client and local time of the most recent log, e.g. `ACME #4 · 10:02:11`.
#[must_use]
pub fn format_last_log(window: &DayWindow, last: Option<&log::Model>) -> String {
    last.map_or_else(
        || PLACEHOLDER.to_string(),
        |entry| {
            let void = if entry.is_void { " (void)" } else { "" };
            format!(
                "{} #{} · {}{void}",
                entry.client_name,
                entry.assigned_number,
                window.time_of_day(entry.created_at)
            )
        },
    )
}

/// Per-client totals as inline chips, e.g. `ACME: 3 · Globex: 1`.
#[must_use]
pub fn format_client_chips(totals: &[ClientTotal]) -> String {
    if totals.is_empty() {
        return PLACEHOLDER.to_string();
    }
    totals
        .iter()
        .map(|total| format!("{}: {}", total.client_name, total.total))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// One history row: `#id  HH:MM:SS  code  client  number`, voided rows flagged.
///
/// Long codes and client names are clipped so the columns stay aligned.
#[must_use]
pub fn format_log_row(window: &DayWindow, entry: &log::Model) -> String {
    let mut row = format!(
        "#{:<5} {} {:<CODE_WIDTH$} {:<CLIENT_WIDTH$} {:>4}",
        entry.id,
        window.time_of_day(entry.created_at),
        clip(&entry.code, CODE_WIDTH),
        clip(&entry.client_name, CLIENT_WIDTH),
        entry.assigned_number
    );
    if entry.is_void {
        row.push_str("  VOID");
    }
    row
}

/// Monospace history table, truncated to `limit` rows and to `MESSAGE_LIMIT` characters.
#[must_use]
pub fn format_history(window: &DayWindow, history: &DayHistory, limit: usize) -> String {
    let chips = format_client_chips(&history.totals_by_client);
    let last = format_last_log(window, history.last_log.as_ref());
    let mut text = format!(
        "**History {}**\nTotal: {}\nBy client: {}\nLast: {}\n",
        history.date,
        history.total_day,
        clip(&chips, HEADER_FIELD_LIMIT),
        clip(&last, HEADER_FIELD_LIMIT)
    );

    if history.logs.is_empty() {
        text.push_str("No registrations for this day.");
        return text;
    }

    text.push_str("```\n");
    let budget = MESSAGE_LIMIT - TAIL_RESERVE;
    let mut used = text.chars().count();
    let mut shown = 0;
    for entry in history.logs.iter().take(limit) {
        let row = format_log_row(window, entry);
        let width = row.chars().count() + 1;
        if used + width > budget {
            break;
        }
        text.push_str(&row);
        text.push('\n');
        used += width;
        shown += 1;
    }
    let hidden = history.logs.len() - shown;
    if hidden > 0 {
        let _ = writeln!(text, "… {hidden} more");
    }
    text.push_str("```");
    text
}

/// Monospace code/total grid with the day total.
#[must_use]
pub fn format_summary(summary: &DailySummary) -> String {
    let mut text = format!("**Summary {}**\n", summary.date);
    if summary.rows.is_empty() {
        text.push_str("No registrations for this day.");
        return text;
    }

    let width = summary
        .rows
        .iter()
        .map(|row| row.code.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    text.push_str("```\n");
    let _ = writeln!(text, "{:<width$}  Total", "Code");
    for row in &summary.rows {
        let _ = writeln!(text, "{:<width$}  {}", row.code, row.total);
    }
    text.push_str("```\n");
    let _ = write!(text, "Total of the day: {}", summary.total_day);
    text
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::summary::CodeTotal;
    use crate::test_utils::*;
    use chrono::{Duration, FixedOffset};

    fn entry(id: i64, is_void: bool) -> log::Model {
        let created_at = test_instant() + Duration::seconds(id);
        log::Model {
            id,
            created_at,
            business_day: created_at.date_naive(),
            code: "1001".to_string(),
            client_name: ACME.to_string(),
            assigned_number: 3,
            user_id: None,
            is_void,
            voided_at: None,
            voided_by: None,
        }
    }

    #[test]
    fn test_format_time_placeholder_and_offset() {
        let window = DayWindow::utc();
        assert_eq!(format_time(&window, None), PLACEHOLDER);
        assert_eq!(format_time(&window, Some(test_instant())), "10:00:00");

        let local = DayWindow::new(FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(format_time(&local, Some(test_instant())), "07:00:00");
    }

    #[test]
    fn test_format_last_log() {
        let window = DayWindow::utc();
        assert_eq!(format_last_log(&window, None), PLACEHOLDER);
        assert_eq!(
            format_last_log(&window, Some(&entry(2, false))),
            "ACME #3 · 10:00:02"
        );
        assert!(format_last_log(&window, Some(&entry(2, true))).ends_with("(void)"));
    }

    #[test]
    fn test_format_client_chips() {
        assert_eq!(format_client_chips(&[]), PLACEHOLDER);
        let totals = vec![
            ClientTotal {
                client_name: ACME.to_string(),
                total: 3,
            },
            ClientTotal {
                client_name: GLOBEX.to_string(),
                total: 1,
            },
        ];
        assert_eq!(format_client_chips(&totals), "ACME: 3 · Globex: 1");
    }

    #[test]
    fn test_format_history_truncates_and_flags_void() {
        let window = DayWindow::utc();
        let history = DayHistory::from_logs(
            test_instant().date_naive(),
            vec![entry(3, true), entry(2, false), entry(1, false)],
        );

        let text = format_history(&window, &history, 2);
        assert!(text.contains("Total: 2"));
        assert!(text.contains("VOID"));
        assert!(text.contains("… 1 more"));
        assert!(!text.contains("#1 "));
    }

    #[test]
    fn test_format_log_row_clips_long_names() {
        let window = DayWindow::utc();
        let short = entry(1, false);
        let long = log::Model {
            client_name: "Consolidated Intercontinental Freight".to_string(),
            code: "ABCDEFGHIJKLMNOP".to_string(),
            ..entry(1, false)
        };

        let short_row = format_log_row(&window, &short);
        let long_row = format_log_row(&window, &long);
        assert_eq!(short_row.chars().count(), long_row.chars().count());
        assert!(long_row.contains("Consolidated In… "));
        assert!(long_row.contains("ABCDEFGHI… "));
        assert!(long_row.ends_with("   3"));
    }

    #[test]
    fn test_format_history_fits_in_one_message() {
        let window = DayWindow::utc();
        let logs = (1..=300)
            .rev()
            .map(|id| log::Model {
                client_name: format!("Client number {id} with a long trading name"),
                ..entry(id, false)
            })
            .collect();
        let history = DayHistory::from_logs(test_instant().date_naive(), logs);

        let text = format_history(&window, &history, 300);
        assert!(text.chars().count() <= MESSAGE_LIMIT);
        assert!(text.contains("Total: 300"));
        assert!(text.contains("By client: "));
        assert!(text.contains(" more"));
        assert!(text.ends_with("```"));
        // The newest rows are the ones kept
        assert!(text.contains("#300 "));
        assert!(!text.contains("#1 "));
    }

    #[test]
    fn test_format_summary() {
        let summary = DailySummary {
            date: test_instant().date_naive(),
            rows: vec![
                CodeTotal {
                    code: "1001".to_string(),
                    total: 2,
                },
                CodeTotal {
                    code: "2001".to_string(),
                    total: 1,
                },
            ],
            total_day: 3,
        };

        let text = format_summary(&summary);
        assert!(text.contains("1001  2"));
        assert!(text.contains("2001  1"));
        assert!(text.ends_with("Total of the day: 3"));

        let empty = DailySummary {
            rows: Vec::new(),
            total_day: 0,
            ..summary
        };
        assert!(format_summary(&empty).contains("No registrations"));
    }

    #[test]
    fn test_format_registration_marks_outcome() {
        let outcome = RegistrationOutcome {
            ok: true,
            message: "Registered for ACME.".to_string(),
            code: Some("1001".to_string()),
            client_name: Some(ACME.to_string()),
            assigned_number: Some(4),
            total: Some(4),
            log_id: Some(9),
        };
        assert_eq!(
            format_registration(&outcome),
            "✅ Registered for ACME. Number: 4. Total: 4."
        );
    }
}
