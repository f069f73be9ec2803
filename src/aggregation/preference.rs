use crate::universe::PositionMap;

/// Votes cast on one unordered pair `(first, second)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairTally {
    /// Voters placing `first` ahead of `second`.
    pub first_better: usize,
    /// Voters placing `second` ahead of `first`.
    pub second_better: usize,
}

impl PairTally {
    pub fn count(first: usize, second: usize, votes: &[PositionMap]) -> Self {
        let mut tally = PairTally::default();

        for vote in votes {
            // Only voters who ranked both items have an opinion.
            if let (Some(p1), Some(p2)) = (vote.position(first), vote.position(second)) {
                if p1 < p2 {
                    tally.first_better += 1;
                } else {
                    tally.second_better += 1;
                }
            }
        }

        tally
    }

    pub fn is_decisive(&self) -> bool {
        self.first_better + self.second_better > 0 && self.first_better != self.second_better
    }
}

/// Pairwise majority-vote graph over universe indices.
///
/// An edge `from -> to` means the majority of voters with an opinion put `to`
/// ahead of `from`, so probability mass flows toward better items. For any
/// pair at most one direction is set; ties and pairs nobody compared have no
/// edge at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceMatrix {
    n: usize,
    edges: Vec<bool>,
}

impl PreferenceMatrix {
    pub fn from_votes(n: usize, votes: &[PositionMap]) -> Self {
        let mut edges = vec![false; n * n];

        // Lower triangle only; each pair is decided once and mirrored.
        for i in 0..n {
            for j in 0..i {
                let tally = PairTally::count(i, j, votes);
                if !tally.is_decisive() {
                    continue;
                }

                if tally.first_better > tally.second_better {
                    edges[j * n + i] = true;
                } else {
                    edges[i * n + j] = true;
                }
            }
        }

        let matrix = Self { n, edges };
        debug_assert!((0..n).all(|i| (0..n).all(|j| !(matrix.has_edge(i, j) && matrix.has_edge(j, i)))));
        matrix
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges[from * self.n + to]
    }

    /// Edges leaving `from` whose target is still active.
    pub fn out_degree(&self, from: usize, active: &[bool]) -> usize {
        (0..self.n)
            .filter(|&to| active[to] && self.has_edge(from, to))
            .count()
    }
}
