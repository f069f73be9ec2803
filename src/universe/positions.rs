use std::fmt::Debug;

use crate::universe::Universe;

/// Where each universe index sits inside one ordering.
///
/// `None` means the voter did not mention the item and has no opinion on it.
/// When an ordering repeats an item, the later occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    positions: Vec<Option<usize>>,
}

impl PositionMap {
    pub fn build<T>(universe: &Universe<T>, ordering: &[T]) -> Self
    where
        T: Ord + Clone + Debug,
    {
        let mut positions = vec![None; universe.len()];

        for (position, item) in ordering.iter().enumerate() {
            if let Some(index) = universe.index_of(item) {
                positions[index] = Some(position);
            }
        }

        Self { positions }
    }

    pub fn position(&self, index: usize) -> Option<usize> {
        self.positions[index]
    }

    /// Number of distinct items this ordering has an opinion on.
    pub fn coverage(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// The deduplicated ordering as universe indices, best-first.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut placed: Vec<(usize, usize)> = self
            .positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| position.map(|p| (p, index)))
            .collect();

        placed.sort_unstable();
        placed.into_iter().map(|(_, index)| index).collect()
    }
}
