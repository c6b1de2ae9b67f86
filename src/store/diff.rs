//! Snapshot comparison engine.
//!
//! Compares the previous baseline with the current observation:
//! - Matches listings by title + price + mileage (exact, case-sensitive)
//! - City and distance never make two listings different
//! - Reports added and removed listings in their source order
//!
//! Lookups go through a hash index on the identity key, so a comparison is
//! linear in the size of both sets.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::listing::{Listing, ListingKey};

/// How duplicate identity keys are matched across the two sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// A key is still present if it occurs at least once on the other side.
    #[default]
    Existential,
    /// Each occurrence needs its own counterpart; surplus duplicates are
    /// reported as added or removed.
    Multiset,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Existential => "existential",
            MatchPolicy::Multiset => "multiset",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "existential" => Ok(MatchPolicy::Existential),
            "multiset" => Ok(MatchPolicy::Multiset),
            other => Err(format!(
                "unknown match policy '{other}', expected 'existential' or 'multiset'"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub added: Vec<Listing>,
    pub removed: Vec<Listing>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare two listing sets with the default existential matching.
pub fn compare_listings(previous: &[Listing], current: &[Listing]) -> ChangeSet {
    compare_listings_with(previous, current, MatchPolicy::Existential)
}

pub fn compare_listings_with(
    previous: &[Listing],
    current: &[Listing],
    policy: MatchPolicy,
) -> ChangeSet {
    let (added, removed) = match policy {
        MatchPolicy::Existential => (
            unmatched_existential(current, previous),
            unmatched_existential(previous, current),
        ),
        MatchPolicy::Multiset => (
            unmatched_multiset(current, previous),
            unmatched_multiset(previous, current),
        ),
    };

    ChangeSet { added, removed }
}

/// Listings in `source` whose key never occurs in `other`.
fn unmatched_existential(source: &[Listing], other: &[Listing]) -> Vec<Listing> {
    let index: HashSet<ListingKey<'_>> = other.iter().map(Listing::key).collect();

    source
        .iter()
        .filter(|listing| !index.contains(&listing.key()))
        .cloned()
        .collect()
}

/// Listings in `source` left over once each occurrence in `other` has
/// consumed one occurrence of the same key, earliest first.
fn unmatched_multiset(source: &[Listing], other: &[Listing]) -> Vec<Listing> {
    let mut remaining: HashMap<ListingKey<'_>, usize> = HashMap::new();
    for listing in other {
        *remaining.entry(listing.key()).or_default() += 1;
    }

    source
        .iter()
        .filter(|listing| match remaining.get_mut(&listing.key()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}
