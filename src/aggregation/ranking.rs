use std::fmt::Debug;

use crate::aggregation::tiers::TierOutcome;
use crate::distance::{KendallTau, RankLookup};
use crate::types::{AggregationError, Tier};
use crate::universe::Universe;

/// A solved, immutable total order over a universe of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<T> {
    universe: Universe<T>,
    /// Universe index -> final position.
    positions: Vec<usize>,
    /// Final position -> universe index.
    order: Vec<usize>,
    /// Final position -> stationary score within its tier.
    scores: Vec<f64>,
    /// Final position -> tier number.
    tier_of: Vec<usize>,
    tiers: Vec<Tier<T>>,
}

impl<T> Ranking<T>
where
    T: Ord + Clone + Debug,
{
    pub(crate) fn from_tiers(universe: Universe<T>, outcomes: Vec<TierOutcome>) -> Self {
        let n = universe.len();
        let mut positions = vec![0; n];
        let mut order = Vec::with_capacity(n);
        let mut scores = Vec::with_capacity(n);
        let mut tier_of = Vec::with_capacity(n);
        let mut tiers = Vec::with_capacity(outcomes.len());

        for (tier_index, outcome) in outcomes.into_iter().enumerate() {
            let start = order.len();
            let mut items = Vec::with_capacity(outcome.accepted.len());
            let mut tier_scores = Vec::with_capacity(outcome.accepted.len());

            for (index, score) in outcome.accepted {
                positions[index] = order.len();
                order.push(index);
                scores.push(score);
                tier_of.push(tier_index);
                items.push(universe.item(index).clone());
                tier_scores.push(score);
            }

            tiers.push(Tier {
                index: tier_index,
                start,
                items,
                scores: tier_scores,
                remaining: outcome.remaining,
                sinks: outcome.sinks,
                iterations: outcome.iterations,
            });
        }

        debug_assert_eq!(order.len(), n, "every item must be placed exactly once");

        Self {
            universe,
            positions,
            order,
            scores,
            tier_of,
            tiers,
        }
    }

    /// 0-based final position of `item` (0 = best).
    pub fn position_of(&self, item: &T) -> Result<usize, AggregationError> {
        let index = self.universe.require_index(item)?;
        Ok(self.positions[index])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items best-first.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().map(move |&index| self.universe.item(index))
    }

    pub fn item_at(&self, position: usize) -> Option<&T> {
        self.order.get(position).map(|&index| self.universe.item(index))
    }

    pub fn score_at(&self, position: usize) -> Option<f64> {
        self.scores.get(position).copied()
    }

    pub fn tier_at(&self, position: usize) -> Option<usize> {
        self.tier_of.get(position).copied()
    }

    pub fn tiers(&self) -> &[Tier<T>] {
        &self.tiers
    }

    pub fn misorderings(&self, test_ordering: &[T]) -> Result<KendallTau, AggregationError> {
        KendallTau::measure(self, test_ordering)
    }

    /// Kendall-Tau distance of `test_ordering` against this ranking: the raw
    /// misordering count, or the fraction of misordered pairs if `normalize`.
    pub fn kendall_tau(&self, test_ordering: &[T], normalize: bool) -> Result<f64, AggregationError> {
        Ok(self.misorderings(test_ordering)?.value(normalize))
    }

    pub(crate) fn universe(&self) -> &Universe<T> {
        &self.universe
    }

    pub(crate) fn position_of_index(&self, index: usize) -> usize {
        self.positions[index]
    }
}

impl<T> RankLookup<T> for Ranking<T>
where
    T: Ord + Clone + Debug,
{
    fn rank_of(&self, item: &T) -> Result<usize, AggregationError> {
        self.position_of(item)
    }
}
