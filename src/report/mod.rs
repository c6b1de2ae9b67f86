pub mod json;
pub mod table;
pub mod text;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::store::diff::ChangeSet;
use crate::util::write_atomic;

/// Default change report location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "listing_changes.txt";

/// Counts reported after every run, whether or not a report was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
}

impl Summary {
    pub fn new(total: usize, changes: &ChangeSet) -> Self {
        Summary {
            total,
            added: changes.added.len(),
            removed: changes.removed.len(),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} listings, {} new, {} removed.",
            self.total, self.added, self.removed
        )
    }
}

/// The line printed after a run: where the report went when something
/// changed, otherwise a no-change notice.
pub fn run_message(summary: &Summary, report_location: &str) -> String {
    if summary.has_changes() {
        format!("Found {summary} Changes saved to {report_location}")
    } else {
        format!("Found {} listings, no changes detected", summary.total)
    }
}

/// Destination for a rendered change report. Each publish fully replaces the
/// previous report.
pub trait ReportSink {
    fn publish(&mut self, report: &str) -> Result<()>;

    /// Where the report ends up, for user-facing messages.
    fn location(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileReport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReport {
    fn publish(&mut self, report: &str) -> Result<()> {
        write_atomic(&self.path, |out| {
            out.write_all(report.as_bytes())
                .map_err(|e| Error::io(&self.path, e))
        })?;

        info!(path = %self.path.display(), "change report written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps only the latest report in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryReport {
    pub latest: Option<String>,
}

impl ReportSink for MemoryReport {
    fn publish(&mut self, report: &str) -> Result<()> {
        self.latest = Some(report.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        String::from("memory")
    }
}
