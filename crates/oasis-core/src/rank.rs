//! # Priority/Sort Order
//!
//! Orders records for display by a fixed rank table on one field.
//!
//! ```text
//!   rank table:  urgent=0  high=1  medium=2  low=3   (unlisted = last)
//!
//!   input:   #1 low   #2 urgent   #3 low   #4 high
//!   output:  #2 urgent   #4 high   #1 low   #3 low
//!                                   └── ties keep input order
//! ```

/// Field values in display order; a value's index is its rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable<V> {
    order: Vec<V>,
}

impl<V: PartialEq> RankTable<V> {
    pub fn new(order: impl IntoIterator<Item = V>) -> Self {
        RankTable {
            order: order.into_iter().collect(),
        }
    }

    /// Rank of `value`, or `None` when the table does not list it.
    pub fn rank_of(&self, value: &V) -> Option<usize> {
        self.order.iter().position(|v| v == value)
    }

    /// Sort key: ranked values first, unlisted values after all of them.
    fn sort_key(&self, value: &V) -> usize {
        self.rank_of(value).unwrap_or(usize::MAX)
    }
}

/// Stable sort of `records` by the rank of the field read by `key`.
///
/// Records of equal rank, including all unranked records, keep their
/// relative input order.
pub fn sort_by_rank<T, V, F>(mut records: Vec<T>, table: &RankTable<V>, key: F) -> Vec<T>
where
    V: PartialEq,
    F: Fn(&T) -> V,
{
    records.sort_by_key(|record| table.sort_key(&key(record)));
    records
}

// =============================================================================
// Unit Tests
// =============================================================================
