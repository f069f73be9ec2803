pub mod config;
pub mod preference;
pub mod ranking;
pub mod stationary;
pub mod tiers;

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::distance::KendallTau;
use crate::types::{
	AggregationError, ConsensusMetadata, ConsensusReport, InputFingerprint, RankedItem, ReportError, Tier,
};
use crate::universe::{PositionMap, Universe};
pub use config::{
	AggregatorConfig, IterationSchedule, DEFAULT_ITERATION_MULTIPLIER, DEFAULT_SINK_BOUNDARY_FRACTION,
	MAX_ITERATION_MULTIPLIER,
};
pub use preference::{PairTally, PreferenceMatrix};
pub use ranking::Ranking;

#[derive(Debug)]
enum State<T> {
	Collecting {
		orderings: Vec<Vec<T>>,
	},
	Solved {
		orderings: Vec<Vec<T>>,
		ranking: Ranking<T>,
		solved_at: DateTime<Utc>,
	},
}

/// Builds one consensus total order out of many partial orderings.
///
/// Lifecycle: `add_ordering` any number of times, `solve` exactly once, then
/// query. Adding or solving again after a successful solve is rejected with
/// [`AggregationError::AlreadySolved`]; build a new aggregator instead. The
/// config is checked when `solve` runs, and a rejected config leaves every
/// stored ordering in place.
#[derive(Debug)]
pub struct RankAggregator<T> {
	config: AggregatorConfig,
	state: State<T>,
}

impl<T> Default for RankAggregator<T>
where
	T: Ord + Clone + Debug,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> RankAggregator<T>
where
	T: Ord + Clone + Debug,
{
	pub fn new() -> Self {
		Self::with_config(AggregatorConfig::v0())
	}

	pub fn with_config(config: AggregatorConfig) -> Self {
		Self {
			config,
			state: State::Collecting { orderings: Vec::new() },
		}
	}

	pub fn config(&self) -> &AggregatorConfig {
		&self.config
	}

	/// Store one voter's ordering, best-first. Any sequence is accepted,
	/// including an empty one.
	pub fn add_ordering<I>(&mut self, ordering: I) -> Result<(), AggregationError>
	where
		I: IntoIterator<Item = T>,
	{
		match &mut self.state {
			State::Collecting { orderings } => {
				orderings.push(ordering.into_iter().collect());
				Ok(())
			}
			State::Solved { .. } => Err(AggregationError::AlreadySolved),
		}
	}

	pub fn orderings_added(&self) -> usize {
		match &self.state {
			State::Collecting { orderings } | State::Solved { orderings, .. } => orderings.len(),
		}
	}

	pub fn is_solved(&self) -> bool {
		matches!(self.state, State::Solved { .. })
	}

	#[instrument(skip_all)]
	pub fn solve(&mut self) -> Result<(), AggregationError> {
		let orderings = match &mut self.state {
			State::Collecting { orderings } => {
				self.config.validate()?;
				std::mem::take(orderings)
			}
			State::Solved { .. } => return Err(AggregationError::AlreadySolved),
		};

		// 1. Universe and per-voter positions
		let universe = Universe::from_orderings(&orderings);
		let votes: Vec<PositionMap> = orderings
			.iter()
			.map(|ordering| PositionMap::build(&universe, ordering))
			.collect();

		// 2. Pairwise majority vote
		let matrix = PreferenceMatrix::from_votes(universe.len(), &votes);

		// 3. Tiered stationary solve
		let outcomes = tiers::peel_tiers(&matrix, &self.config);
		let ranking = Ranking::from_tiers(universe, outcomes);

		debug_assert!(
			ranking
				.items()
				.enumerate()
				.all(|(position, item)| ranking.position_of(item) == Ok(position))
		);

		tracing::info!(
			orderings = orderings.len(),
			items = ranking.len(),
			tiers = ranking.tiers().len(),
			"Consensus solved."
		);

		self.state = State::Solved {
			orderings,
			ranking,
			solved_at: Utc::now(),
		};
		Ok(())
	}

	pub fn ranking(&self) -> Result<&Ranking<T>, AggregationError> {
		match &self.state {
			State::Solved { ranking, .. } => Ok(ranking),
			State::Collecting { .. } => Err(AggregationError::NotSolved),
		}
	}

	pub fn position_of(&self, item: &T) -> Result<usize, AggregationError> {
		self.ranking()?.position_of(item)
	}

	pub fn size(&self) -> Result<usize, AggregationError> {
		Ok(self.ranking()?.len())
	}

	pub fn tiers(&self) -> Result<&[Tier<T>], AggregationError> {
		Ok(self.ranking()?.tiers())
	}

	pub fn kendall_tau(&self, test_ordering: &[T], normalize: bool) -> Result<f64, AggregationError> {
		self.ranking()?.kendall_tau(test_ordering, normalize)
	}

	/// Normalized Kendall-Tau distance of every input ordering against the
	/// consensus. Repeated items are collapsed to their last position first.
	pub fn input_agreement(&self) -> Result<Vec<f64>, AggregationError> {
		let (orderings, ranking) = match &self.state {
			State::Solved { orderings, ranking, .. } => (orderings, ranking),
			State::Collecting { .. } => return Err(AggregationError::NotSolved),
		};

		Ok(orderings
			.iter()
			.map(|ordering| {
				let ranks: Vec<usize> = PositionMap::build(ranking.universe(), ordering)
					.ranked_indices()
					.into_iter()
					.map(|index| ranking.position_of_index(index))
					.collect();
				KendallTau::from_ranks(&ranks).normalized()
			})
			.collect())
	}
}

impl<T> RankAggregator<T>
where
	T: Ord + Clone + Debug + Serialize,
{
	pub fn report(&self) -> Result<ConsensusReport<T>, ReportError> {
		let (orderings, ranking, solved_at) = match &self.state {
			State::Solved {
				orderings,
				ranking,
				solved_at,
			} => (orderings, ranking, *solved_at),
			State::Collecting { .. } => return Err(AggregationError::NotSolved.into()),
		};

		let input_fingerprint = InputFingerprint::from_inputs(&self.config, orderings)?;

		let ranked = (0..ranking.len())
			.filter_map(|position| ranking.item_at(position).map(|item| (position, item)))
			.map(|(position, item)| RankedItem {
				item: item.clone(),
				position,
				tier: ranking.tier_at(position).unwrap_or_default(),
				score: ranking.score_at(position).unwrap_or_default(),
			})
			.collect();

		let consensus = ConsensusMetadata {
			input_fingerprint,
			config: self.config.clone(),
			solved_at,
			orderings: orderings.len(),
			items: ranking.len(),
			tiers: ranking.tiers().len(),
			input_agreement: self.input_agreement()?,
		};

		Ok(ConsensusReport {
			ranking: ranked,
			consensus,
		})
	}
}
