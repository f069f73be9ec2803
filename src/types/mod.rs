pub mod consensus;
pub mod identifiers;

pub use consensus::{AggregationError, ConsensusMetadata, ConsensusReport, RankedItem, ReportError, Tier};
pub use identifiers::InputFingerprint;
