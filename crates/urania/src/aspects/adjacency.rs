//! Aspect relations re-expressed as one typed adjacency map.

use std::collections::{BTreeMap, BTreeSet};

use crate::aspects::types::AspectInstance;

/// Aspect type (exact separation) to the unordered body pairs holding it.
///
/// Pairs are stored as `(min, max)` so lookups are symmetric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectAdjacency {
    pairs: BTreeMap<u16, BTreeSet<(usize, usize)>>,
}

impl AspectAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_aspects(aspects: &[AspectInstance]) -> Self {
        let mut adjacency = Self::new();
        for aspect in aspects {
            adjacency.insert(aspect.aspect, aspect.p1, aspect.p2);
        }
        adjacency
    }

    /// Record a relation. Self pairs are ignored.
    pub fn insert(&mut self, aspect: u16, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.pairs
            .entry(aspect)
            .or_default()
            .insert((a.min(b), a.max(b)));
    }

    pub fn contains(&self, aspect: u16, a: usize, b: usize) -> bool {
        self.pairs
            .get(&aspect)
            .is_some_and(|set| set.contains(&(a.min(b), a.max(b))))
    }

    /// Unordered pairs of one aspect type, ascending.
    pub fn pairs(&self, aspect: u16) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.get(&aspect).into_iter().flatten().copied()
    }

    /// Bodies related to `body` by `aspect`, ascending.
    pub fn partners(&self, aspect: u16, body: usize) -> BTreeSet<usize> {
        self.pairs(aspect)
            .filter_map(|(a, b)| {
                if a == body {
                    Some(b)
                } else if b == body {
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Every body that appears in at least one pair of `aspect`.
    pub fn bodies(&self, aspect: u16) -> BTreeSet<usize> {
        self.pairs(aspect).flat_map(|(a, b)| [a, b]).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
