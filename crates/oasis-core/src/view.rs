//! # Filter/Search View
//!
//! Derives the display subset of a store from equality filters and a free
//! text search.
//!
//! ## Criteria Combination
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records ──► [status = occupied] ─AND─► [floor = 1er] ─AND─► ["10"]    │
//! │                   │                          │                 │        │
//! │            Criterion::Only(v)         Criterion::All     search text    │
//! │            keeps field == v           keeps everything   any field      │
//! │                                                           contains it   │
//! │                                                           (no case)     │
//! │                                                                         │
//! │  Output borrows the input in input order. Storage is never touched.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oasis_core::view::{Criterion, FilterView, Searchable};
//!
//! #[derive(Debug, PartialEq)]
//! struct Guest { name: String, vip: bool }
//!
//! impl Searchable for Guest {
//!     fn search_fields(&self) -> Vec<&str> { vec![&self.name] }
//! }
//!
//! let guests = vec![
//!     Guest { name: "Aya".into(), vip: true },
//!     Guest { name: "Koffi".into(), vip: false },
//! ];
//! let vips = FilterView::new()
//!     .by(|g: &Guest| g.vip, Criterion::Only(true))
//!     .apply(&guests);
//! assert_eq!(vips.len(), 1);
//!
//! let all: Criterion<bool> = "tous".parse().unwrap();
//! assert!(all.is_all());
//! ```

use std::fmt;
use std::str::FromStr;

/// Filter values reserved to mean "no constraint".
pub const SENTINELS: &[&str] = &["all", "tous", "toutes"];

/// Checks whether `value` is a reserved "no constraint" token.
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(value))
}

// =============================================================================
// Criterion
// =============================================================================

/// One equality filter: either no constraint or a required value.
///
/// Being an enum, the "no constraint" case cannot be confused with a real
/// field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<V> {
    All,
    Only(V),
}

impl<V> Criterion<V> {
    pub fn is_all(&self) -> bool {
        matches!(self, Criterion::All)
    }

    /// Checks a field value against the criterion.
    pub fn matches(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        match self {
            Criterion::All => true,
            Criterion::Only(expected) => expected == value,
        }
    }
}

impl<V> Default for Criterion<V> {
    fn default() -> Self {
        Criterion::All
    }
}

impl<V> From<Option<V>> for Criterion<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Criterion::All, Criterion::Only)
    }
}

impl<V: FromStr> FromStr for Criterion<V> {
    type Err = V::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_sentinel(s) {
            return Ok(Criterion::All);
        }
        s.parse().map(Criterion::Only)
    }
}

impl<V: fmt::Display> fmt::Display for Criterion<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::All => f.write_str("all"),
            Criterion::Only(value) => value.fmt(f),
        }
    }
}

// =============================================================================
// Searchable
// =============================================================================

/// A record with designated free-text search fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

// =============================================================================
// Filter View
// =============================================================================

type Predicate<'a, E> = Box<dyn Fn(&E) -> bool + 'a>;

/// A set of AND-combined criteria plus an optional search text.
pub struct FilterView<'a, E> {
    predicates: Vec<Predicate<'a, E>>,
    search: String,
}

impl<'a, E> FilterView<'a, E> {
    /// A view with no criteria; it matches every record.
    pub fn new() -> Self {
        FilterView {
            predicates: Vec::new(),
            search: String::new(),
        }
    }

    /// Adds an equality criterion on the field read by `field`.
    ///
    /// `Criterion::All` adds nothing.
    pub fn by<V, F>(mut self, field: F, criterion: Criterion<V>) -> Self
    where
        F: Fn(&E) -> V + 'a,
        V: PartialEq + 'a,
    {
        if let Criterion::Only(expected) = criterion {
            self.predicates
                .push(Box::new(move |record| field(record) == expected));
        }
        self
    }

    /// Sets the search text. It is trimmed; empty matches everything.
    pub fn search(mut self, text: &str) -> Self {
        self.search = text.trim().to_lowercase();
        self
    }

    /// Number of active equality criteria.
    pub fn criteria_count(&self) -> usize {
        self.predicates.len()
    }
}

impl<'a, E: Searchable> FilterView<'a, E> {
    /// Checks one record against every criterion and the search text.
    pub fn matches(&self, record: &E) -> bool {
        self.predicates.iter().all(|keep| keep(record)) && self.matches_search(record)
    }

    /// Returns the matching records in input order.
    pub fn apply<'r>(&self, records: &'r [E]) -> Vec<&'r E> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_search(&self, record: &E) -> bool {
        if self.search.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search))
    }
}

impl<E> Default for FilterView<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for FilterView<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterView")
            .field("criteria", &self.predicates.len())
            .field("search", &self.search)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
