use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::types::AggregationError;

/// Bijection between items and dense indices `0..n`.
///
/// Index order is the items' natural order, so the same set of orderings
/// always yields the same indices regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe<T> {
    items: Vec<T>,
}

impl<T> Universe<T>
where
    T: Ord + Clone + Debug,
{
    pub fn from_orderings(orderings: &[Vec<T>]) -> Self {
        let distinct: BTreeSet<&T> = orderings.iter().flatten().collect();

        Self {
            items: distinct.into_iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `items` is sorted and deduplicated, so a binary search is exact.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.binary_search(item).ok()
    }

    pub fn require_index(&self, item: &T) -> Result<usize, AggregationError> {
        self.index_of(item)
            .ok_or_else(|| AggregationError::UnknownItem(format!("{item:?}")))
    }

    pub fn item(&self, index: usize) -> &T {
        &self.items[index]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}
