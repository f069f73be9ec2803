use crate::aggregation::config::AggregatorConfig;
use crate::aggregation::preference::PreferenceMatrix;
use crate::aggregation::stationary::{stationary_distribution, ActiveChain};

/// Result of one tier, still in universe indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TierOutcome {
    /// `(index, score)` of accepted items, best-first.
    pub accepted: Vec<(usize, f64)>,
    pub remaining: usize,
    pub sinks: usize,
    pub iterations: usize,
}

/// Sort by score descending, then by index ascending.
pub fn sort_by_score(scored: &mut [(usize, f64)]) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
}

/// Number of leading entries of `sorted` that belong to the current tier.
///
/// The first entry is always accepted. After that the walk stops at the first
/// score that is zero or below `sink_boundary_fraction / remaining`.
pub fn tier_boundary(sorted: &[(usize, f64)], remaining: usize, sink_boundary_fraction: f64) -> usize {
    if sorted.is_empty() {
        return 0;
    }

    let threshold = (1.0 / remaining as f64) * sink_boundary_fraction;

    1 + sorted[1..]
        .iter()
        .take_while(|(_, score)| *score > 0.0 && *score >= threshold)
        .count()
}

/// Compute a single tier over the `active` items.
pub fn solve_tier(matrix: &PreferenceMatrix, active: &[bool], config: &AggregatorConfig) -> TierOutcome {
    let chain = ActiveChain::new(matrix, active);
    let remaining = chain.remaining();
    let stationary = stationary_distribution(&chain, &config.iteration_schedule);

    let mut scored: Vec<(usize, f64)> = (0..matrix.len())
        .filter(|&i| active[i])
        .map(|i| (i, stationary.distribution[i]))
        .collect();
    sort_by_score(&mut scored);

    let accepted_count = tier_boundary(&scored, remaining, config.sink_boundary_fraction);
    scored.truncate(accepted_count);

    TierOutcome {
        accepted: scored,
        remaining,
        sinks: chain.sinks(),
        iterations: stationary.iterations,
    }
}

/// Repeatedly solve and remove tiers until every item is placed.
pub fn peel_tiers(matrix: &PreferenceMatrix, config: &AggregatorConfig) -> Vec<TierOutcome> {
    let mut active = vec![true; matrix.len()];
    let mut remaining = matrix.len();
    let mut tiers = Vec::new();

    while remaining > 0 {
        let outcome = solve_tier(matrix, &active, config);

        tracing::debug!(
            tier = tiers.len(),
            remaining = outcome.remaining,
            sinks = outcome.sinks,
            iterations = outcome.iterations,
            accepted = outcome.accepted.len(),
            "Tier solved."
        );

        // tier_boundary always accepts at least one item, so this terminates.
        debug_assert!(!outcome.accepted.is_empty());
        for &(index, _) in &outcome.accepted {
            active[index] = false;
        }
        remaining -= outcome.accepted.len();
        tiers.push(outcome);
    }

    tiers
}
