//! JSON output for run results and snapshots.
//!
//! Serializes summaries and change sets for scripting and piping.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::listing::Listing;
use crate::report::text::TIMESTAMP_FORMAT;
use crate::report::Summary;
use crate::store::diff::ChangeSet;

#[derive(Serialize)]
struct ChangesDocument<'a> {
    timestamp: String,
    summary: &'a Summary,
    added: &'a [Listing],
    removed: &'a [Listing],
}

pub fn render_changes(
    summary: &Summary,
    changes: &ChangeSet,
    timestamp: NaiveDateTime,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ChangesDocument {
        timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
        summary,
        added: &changes.added,
        removed: &changes.removed,
    })
}

pub fn render_listings(listings: &[Listing]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Value;

    #[test]
    fn changes_document_shape() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        let changes = ChangeSet {
            added: vec![Listing::new("a", "$1", "1 mi", "x", "y")],
            removed: vec![],
        };
        let summary = Summary::new(3, &changes);

        let json = render_changes(&summary, &changes, timestamp).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timestamp"], "2024-01-02 03:04:05");
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["added"], 1);
        assert_eq!(value["summary"]["removed"], 0);
        assert_eq!(value["added"][0]["title"], "a");
        assert_eq!(value["removed"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn listings_render_as_array() {
        let json = render_listings(&[Listing::new("a", "b", "c", "d", "e")]).unwrap();
        let back: Vec<Listing> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Listing::new("a", "b", "c", "d", "e")]);
    }
}
