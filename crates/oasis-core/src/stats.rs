//! # Aggregate Projections
//!
//! Counts shown on module headers and the dashboard ("3/8 occupied",
//! "2 urgent"). They are recomputed from the store on every call rather
//! than kept as running counters, so they cannot drift from the records.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::Lifecycle;
use crate::types::Token;

/// `count` of `total`, displayed as `count/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ratio {
    pub count: usize,
    pub total: usize,
}

impl Ratio {
    /// Whole-number percentage, 0 when `total` is 0.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.count * 100 / self.total
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.total)
    }
}

/// Number of records in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally<S> {
    pub status: S,
    pub count: usize,
}

/// Counts per status, every status listed in declaration order (zeros kept).
pub fn tally<E: Lifecycle>(records: &[E]) -> Vec<Tally<E::Status>> {
    <E::Status as Token>::ALL
        .iter()
        .map(|status| Tally {
            status: *status,
            count: records.iter().filter(|r| r.status() == *status).count(),
        })
        .collect()
}

pub fn count_where<E, F>(records: &[E], predicate: F) -> usize
where
    F: Fn(&E) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

/// Records matching `predicate` out of all records.
pub fn ratio<E, F>(records: &[E], predicate: F) -> Ratio
where
    F: Fn(&E) -> bool,
{
    Ratio {
        count: count_where(records, predicate),
        total: records.len(),
    }
}

/// Groups records by a token field, one group per token in declaration
/// order (empty groups kept). Records keep their input order in a group.
pub fn group_by<'r, E, K, F>(records: &'r [E], key: F) -> Vec<(K, Vec<&'r E>)>
where
    K: Token,
    F: Fn(&E) -> K,
{
    K::ALL
        .iter()
        .map(|group| {
            let members = records.iter().filter(|r| key(r) == *group).collect();
            (*group, members)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
