pub mod kendall;

pub use kendall::{kendall_tau, KendallTau, RankLookup};
