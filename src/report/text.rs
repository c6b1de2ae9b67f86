//! Plain-text change report.
//!
//! Layout:
//! - Header line with the run timestamp, then a rule
//! - NEW LISTINGS section when anything was added
//! - REMOVED LISTINGS section when anything was removed
//!
//! Each listing is numbered from 1 and shows its five fields pipe-separated.

use chrono::NaiveDateTime;

use crate::listing::Listing;
use crate::report::Summary;
use crate::store::diff::ChangeSet;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the report, or `None` when there is nothing to report.
pub fn render(changes: &ChangeSet, timestamp: NaiveDateTime) -> Option<String> {
    if changes.is_empty() {
        return None;
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Listing Changes - {}\n",
        timestamp.format(TIMESTAMP_FORMAT)
    ));
    output.push_str("=====================================\n\n");

    if !changes.added.is_empty() {
        output.push_str(&format!("NEW LISTINGS ({}):\n", changes.added.len()));
        output.push_str("-------------------\n");
        push_listings(&mut output, &changes.added);
        output.push('\n');
    }

    if !changes.removed.is_empty() {
        output.push_str(&format!("REMOVED LISTINGS ({}):\n", changes.removed.len()));
        output.push_str("---------------------\n");
        push_listings(&mut output, &changes.removed);
    }

    Some(output)
}

/// Output of a read-only comparison of two snapshots: the report (or a
/// no-change notice) followed by the summary line.
pub fn render_comparison(
    changes: &ChangeSet,
    summary: &Summary,
    timestamp: NaiveDateTime,
) -> String {
    let mut output =
        render(changes, timestamp).unwrap_or_else(|| String::from("No changes detected.\n"));
    output.push_str(&format!("\n{summary}\n"));
    output
}

fn push_listings(output: &mut String, listings: &[Listing]) {
    for (i, listing) in listings.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, listing.fields().join(" | ")));
    }
}
