//! Deterministic rank aggregation.
//!
//! `rank-consensus` merges several partial, possibly inconsistent orderings of
//! the same items into one consensus total order, then scores any ordering
//! against that consensus with the Kendall-Tau distance.
//!
//! Solving runs in three phases: a pairwise majority vote builds a preference
//! graph, power iteration over the resulting Markov chain finds where
//! probability mass settles, and the best-scoring tier is peeled off and the
//! chain re-solved over whatever is left. All operations are deterministic:
//! identical inputs always produce identical rankings.
//!
//! ```
//! use rank_consensus::RankAggregator;
//!
//! let mut aggregator = RankAggregator::new();
//! aggregator.add_ordering(["a", "b", "c"]).unwrap();
//! aggregator.add_ordering(["a", "b", "c"]).unwrap();
//! aggregator.add_ordering(["b", "a", "c"]).unwrap();
//! aggregator.solve().unwrap();
//!
//! assert_eq!(aggregator.position_of(&"a"), Ok(0));
//! assert_eq!(aggregator.kendall_tau(&["b", "a", "c"], true), Ok(1.0 / 3.0));
//! ```

pub mod aggregation;
pub mod distance;
pub mod types;
pub mod universe;

pub use aggregation::{AggregatorConfig, IterationSchedule, RankAggregator, Ranking};
pub use distance::{kendall_tau, KendallTau, RankLookup};
pub use types::{AggregationError, ConsensusReport, ReportError};
