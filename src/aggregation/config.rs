use serde::{Deserialize, Serialize};

use crate::types::AggregationError;

/// Fraction of the uniform mass `1 / remaining` below which a score marks the
/// end of the current tier.
pub const DEFAULT_SINK_BOUNDARY_FRACTION: f64 = 1.0 / 10_000.0;

/// Steps per remaining item under the default fixed schedule.
pub const DEFAULT_ITERATION_MULTIPLIER: usize = 2;

/// Largest accepted `Fixed` multiplier. Anything above it would only make
/// `solve` run for an unbounded time.
pub const MAX_ITERATION_MULTIPLIER: usize = 1_000;

/// How many power-iteration steps a tier runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IterationSchedule {
    /// Exactly `multiplier * remaining` steps, no convergence test.
    Fixed { multiplier: usize },
    /// Stop once the L1 change between successive distributions is at most
    /// `tolerance`, or after `max_iterations` steps.
    ///
    /// Periodic chains never settle, so on those inputs the result depends on
    /// where the cap lands and can differ from `Fixed`.
    Converged { tolerance: f64, max_iterations: usize },
}

impl IterationSchedule {
    pub fn step_budget(&self, remaining: usize) -> usize {
        match *self {
            IterationSchedule::Fixed { multiplier } => multiplier.saturating_mul(remaining),
            IterationSchedule::Converged { max_iterations, .. } => max_iterations,
        }
    }

    pub fn tolerance(&self) -> Option<f64> {
        match *self {
            IterationSchedule::Fixed { .. } => None,
            IterationSchedule::Converged { tolerance, .. } => Some(tolerance),
        }
    }
}

impl Default for IterationSchedule {
    fn default() -> Self {
        IterationSchedule::Fixed {
            multiplier: DEFAULT_ITERATION_MULTIPLIER,
        }
    }
}

// Serializable and comparable so it can be hashed into the input fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub version: String,
    pub iteration_schedule: IterationSchedule,
    pub sink_boundary_fraction: f64,
}

impl AggregatorConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            iteration_schedule: IterationSchedule::default(),
            sink_boundary_fraction: DEFAULT_SINK_BOUNDARY_FRACTION,
        }
    }

    /// Reject values that would make a solve meaningless or unbounded.
    pub fn validate(&self) -> Result<(), AggregationError> {
        match self.iteration_schedule {
            IterationSchedule::Fixed { multiplier } => {
                if multiplier == 0 || multiplier > MAX_ITERATION_MULTIPLIER {
                    return Err(AggregationError::InvalidConfig(format!(
                        "iteration multiplier must be in 1..={MAX_ITERATION_MULTIPLIER}, got {multiplier}"
                    )));
                }
            }
            IterationSchedule::Converged {
                tolerance,
                max_iterations,
            } => {
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(AggregationError::InvalidConfig(format!(
                        "convergence tolerance must be finite and non-negative, got {tolerance}"
                    )));
                }
                if max_iterations == 0 {
                    return Err(AggregationError::InvalidConfig(
                        "max_iterations must be at least 1".into(),
                    ));
                }
            }
        }

        if !self.sink_boundary_fraction.is_finite() || self.sink_boundary_fraction < 0.0 {
            return Err(AggregationError::InvalidConfig(format!(
                "sink boundary fraction must be finite and non-negative, got {}",
                self.sink_boundary_fraction
            )));
        }

        Ok(())
    }

    pub fn with_iteration_schedule(mut self, schedule: IterationSchedule) -> Self {
        self.iteration_schedule = schedule;
        self
    }

    pub fn with_sink_boundary_fraction(mut self, fraction: f64) -> Self {
        self.sink_boundary_fraction = fraction;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::v0()
    }
}
