use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregation::AggregatorConfig;
use crate::types::identifiers::InputFingerprint;

/// One contiguous block of final positions produced by a single
/// stationary-distribution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier<T> {
    /// 0-based tier number, best tier first.
    pub index: usize,
    /// Final position of the first item in this tier.
    pub start: usize,
    /// Accepted items, best-first.
    pub items: Vec<T>,
    /// Stationary mass of each accepted item, aligned with `items`.
    pub scores: Vec<f64>,
    /// Items still unplaced when this tier was computed.
    pub remaining: usize,
    /// Items that had no outgoing preference among `remaining` and were made absorbing.
    pub sinks: usize,
    /// Power-iteration steps actually run.
    pub iterations: usize,
}

/// A ranked item in the serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem<T> {
    pub item: T,
    pub position: usize,
    pub tier: usize,
    pub score: f64,
}

/// Metadata describing how a consensus was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusMetadata {
    pub input_fingerprint: InputFingerprint,
    pub config: AggregatorConfig,
    pub solved_at: DateTime<Utc>, // informational only

    pub orderings: usize,
    pub items: usize,
    pub tiers: usize,

    /// Normalized Kendall-Tau distance of each input ordering against the
    /// consensus, in the order the orderings were added.
    pub input_agreement: Vec<f64>,
}

/// The full, self-contained result of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusReport<T> {
    pub ranking: Vec<RankedItem<T>>,
    pub consensus: ConsensusMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("Ranking is not solved yet")]
    NotSolved,

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Aggregator is already solved")]
    AlreadySolved,

    #[error("Invalid aggregator config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
