use crate::aggregation::config::IterationSchedule;
use crate::aggregation::preference::PreferenceMatrix;

/// The preference chain restricted to the items that are still unplaced.
///
/// Sinks (active items with no outgoing edge to another active item) get a
/// self-loop, which keeps every active out-degree at least 1 and makes the
/// sinks absorbing.
#[derive(Debug, Clone)]
pub struct ActiveChain<'a> {
    matrix: &'a PreferenceMatrix,
    active: &'a [bool],
    absorbing: Vec<bool>,
    out_degree: Vec<usize>,
}

impl<'a> ActiveChain<'a> {
    pub fn new(matrix: &'a PreferenceMatrix, active: &'a [bool]) -> Self {
        let n = matrix.len();
        let mut absorbing = vec![false; n];
        let mut out_degree = vec![0; n];

        for i in (0..n).filter(|&i| active[i]) {
            out_degree[i] = matrix.out_degree(i, active);
            if out_degree[i] == 0 {
                absorbing[i] = true;
                out_degree[i] = 1;
            }
        }

        Self {
            matrix,
            active,
            absorbing,
            out_degree,
        }
    }

    pub fn remaining(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    pub fn sinks(&self) -> usize {
        self.absorbing.iter().filter(|&&s| s).count()
    }

    pub fn is_absorbing(&self, index: usize) -> bool {
        self.absorbing[index]
    }

    fn transition(&self, from: usize, to: usize) -> bool {
        if from == to {
            self.absorbing[from]
        } else {
            self.matrix.has_edge(from, to)
        }
    }

    /// One power-iteration step. Inactive entries stay 0.
    fn step(&self, previous: &[f64], next: &mut [f64]) {
        let n = self.matrix.len();

        for target in 0..n {
            next[target] = 0.0;
            if !self.active[target] {
                continue;
            }

            let mut mass = 0.0;
            for source in 0..n {
                if self.active[source] && self.transition(source, target) {
                    mass += previous[source] / self.out_degree[source] as f64;
                }
            }
            next[target] = mass;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationaryResult {
    /// Indexed by universe index; inactive items hold 0.
    pub distribution: Vec<f64>,
    pub iterations: usize,
    /// L1 change of the last step (0 when no step ran).
    pub l1_delta: f64,
}

/// Approximate the stationary distribution of `chain`, starting from the
/// uniform distribution over its active items.
pub fn stationary_distribution(chain: &ActiveChain<'_>, schedule: &IterationSchedule) -> StationaryResult {
    let n = chain.matrix.len();
    let remaining = chain.remaining();

    let mut current = vec![0.0; n];
    if remaining == 0 {
        return StationaryResult {
            distribution: current,
            iterations: 0,
            l1_delta: 0.0,
        };
    }

    let uniform = 1.0 / remaining as f64;
    for i in (0..n).filter(|&i| chain.active[i]) {
        current[i] = uniform;
    }

    let budget = schedule.step_budget(remaining);
    let tolerance = schedule.tolerance();

    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut l1_delta = 0.0;

    while iterations < budget {
        chain.step(&current, &mut next);
        iterations += 1;

        l1_delta = current.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut current, &mut next);

        if tolerance.is_some_and(|t| l1_delta <= t) {
            break;
        }
    }

    StationaryResult {
        distribution: current,
        iterations,
        l1_delta,
    }
}
