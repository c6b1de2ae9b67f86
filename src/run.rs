//! One pass of the watch cycle.
//!
//! load baseline -> assemble current listings -> diff -> save baseline ->
//! write change report (only when something changed).
//!
//! Any write failure stops the pass and is returned to the caller; nothing
//! after the failing step runs.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::Result;
use crate::listing::{assemble, FieldLists, Listing};
use crate::report::{text, ReportSink, Summary};
use crate::store::diff::{compare_listings_with, ChangeSet, MatchPolicy};
use crate::store::SnapshotStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub summary: Summary,
    pub changes: ChangeSet,
    pub current: Vec<Listing>,
    pub report_written: bool,
}

pub fn run_cycle<S, R>(
    store: &mut S,
    sink: &mut R,
    fields: &FieldLists,
    policy: MatchPolicy,
    timestamp: NaiveDateTime,
) -> Result<RunOutcome>
where
    S: SnapshotStore + ?Sized,
    R: ReportSink + ?Sized,
{
    let previous = store.load();
    let current = assemble(fields);
    debug!(
        previous = previous.len(),
        current = current.len(),
        %policy,
        "comparing listings"
    );

    let changes = compare_listings_with(&previous, &current, policy);
    let summary = Summary::new(current.len(), &changes);

    store.save(&current)?;

    let report_written = match text::render(&changes, timestamp) {
        Some(report) => {
            sink.publish(&report)?;
            true
        }
        None => false,
    };

    info!(
        total = summary.total,
        added = summary.added,
        removed = summary.removed,
        "run complete"
    );

    Ok(RunOutcome {
        summary,
        changes,
        current,
        report_written,
    })
}
