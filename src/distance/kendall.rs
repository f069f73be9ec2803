use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::types::AggregationError;

/// Anything that can report the consensus rank of an item.
pub trait RankLookup<T> {
    fn rank_of(&self, item: &T) -> Result<usize, AggregationError>;
}

impl<T> RankLookup<T> for BTreeMap<T, usize>
where
    T: Ord + Debug,
{
    fn rank_of(&self, item: &T) -> Result<usize, AggregationError> {
        self.get(item)
            .copied()
            .ok_or_else(|| AggregationError::UnknownItem(format!("{item:?}")))
    }
}

impl<T> RankLookup<T> for HashMap<T, usize>
where
    T: Eq + Hash + Debug,
{
    fn rank_of(&self, item: &T) -> Result<usize, AggregationError> {
        self.get(item)
            .copied()
            .ok_or_else(|| AggregationError::UnknownItem(format!("{item:?}")))
    }
}

/// Pairwise inversions of a test ordering against a reference ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KendallTau {
    /// Pairs the test ordering puts in the opposite order from the reference.
    pub misorderings: usize,
    /// Every pair of positions in the test ordering: `len * (len - 1) / 2`.
    pub max_orderings: usize,
}

impl KendallTau {
    /// Count inversions in a sequence of reference ranks.
    ///
    /// A pair `i < j` is misordered when `ranks[i] > ranks[j]`; equal ranks
    /// (an item repeated in the test ordering) are not.
    pub fn from_ranks(ranks: &[usize]) -> Self {
        let len = ranks.len();
        let mut misorderings = 0;

        for i in 0..len {
            for j in (i + 1)..len {
                if ranks[i] > ranks[j] {
                    misorderings += 1;
                }
            }
        }

        Self {
            misorderings,
            max_orderings: len * len.saturating_sub(1) / 2,
        }
    }

    pub fn measure<T, L>(lookup: &L, test_ordering: &[T]) -> Result<Self, AggregationError>
    where
        L: RankLookup<T> + ?Sized,
    {
        let ranks = test_ordering
            .iter()
            .map(|item| lookup.rank_of(item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_ranks(&ranks))
    }

    /// Fraction of misordered pairs in `[0, 1]`; 0.0 when there are no pairs.
    pub fn normalized(&self) -> f64 {
        if self.max_orderings == 0 {
            0.0
        } else {
            self.misorderings as f64 / self.max_orderings as f64
        }
    }

    pub fn value(&self, normalize: bool) -> f64 {
        if normalize {
            self.normalized()
        } else {
            self.misorderings as f64
        }
    }
}

/// Kendall-Tau distance of `test_ordering` against any rank lookup.
pub fn kendall_tau<T, L>(lookup: &L, test_ordering: &[T], normalize: bool) -> Result<f64, AggregationError>
where
    L: RankLookup<T> + ?Sized,
{
    Ok(KendallTau::measure(lookup, test_ordering)?.value(normalize))
}
