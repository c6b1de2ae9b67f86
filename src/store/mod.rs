//! Snapshot storage.
//!
//! Exactly one snapshot exists at a time: the listings committed by the last
//! successful run. Each run loads it as the previous baseline and replaces it
//! with the current observation.
//!
//! - `snapshot`: CSV file backend used by the binary
//! - `diff`: comparison of two listing sets
//!
//! [`MemoryStore`] keeps the same contract without touching the filesystem.

pub mod diff;
pub mod snapshot;

use crate::error::Result;
use crate::listing::Listing;

pub trait SnapshotStore {
    /// Previous baseline. Absent or unreadable state loads as an empty set.
    fn load(&self) -> Vec<Listing>;

    /// Replace the baseline with `listings`. Failure must leave the previous
    /// baseline intact.
    fn save(&mut self, listings: &[Listing]) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    listings: Vec<Listing>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(listings: Vec<Listing>) -> Self {
        MemoryStore { listings, saves: 0 }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Number of successful saves, used to check a run committed its baseline.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Vec<Listing> {
        self.listings.clone()
    }

    fn save(&mut self, listings: &[Listing]) -> Result<()> {
        self.listings = listings.to_vec();
        self.saves += 1;
        Ok(())
    }
}
