use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::aspects::{AspectAdjacency, CONJUNCTION, OPPOSITION, QUINCUNX, SEXTILE, SQUARE, TRINE};
use crate::patterns::types::{Pattern, PatternKind};

/// Point names never counted in patterns: symmetric duplicates or derived
/// points of other bodies.
pub const DERIVED_POINTS: &[&str] = &[
    "earth",
    "mean_node",
    "true_node",
    "mean_south_node",
    "true_south_node",
    "osc_apogee",
    "osc. apogee",
    "intp_apogee",
    "intp. apogee",
    "intp_perigee",
    "intp. perigee",
    "dsc",
    "ic",
];

/// Whether a point name is on the [`DERIVED_POINTS`] list (case-insensitive).
pub fn is_derived_point(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    DERIVED_POINTS.contains(&name.as_str())
}

/// Searches an aspect adjacency map for multi-body configurations.
pub struct PatternDetector<'a> {
    adjacency: &'a AspectAdjacency,
    labels: &'a [String],
}

impl<'a> PatternDetector<'a> {
    /// `labels` is indexed by body id and only used for display text.
    pub fn new(adjacency: &'a AspectAdjacency, labels: &'a [String]) -> Self {
        Self { adjacency, labels }
    }

    fn label(&self, body: usize) -> String {
        self.labels
            .get(body)
            .cloned()
            .unwrap_or_else(|| body.to_string())
    }

    fn joined(&self, bodies: &[usize]) -> String {
        bodies
            .iter()
            .map(|&b| self.label(b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every pattern, grouped by kind and ordered by participant key.
    pub fn detect(&self) -> Vec<Pattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.stelliums());
        patterns.extend(self.t_squares());
        patterns.extend(self.yods());
        patterns.extend(self.grand_trines());
        patterns.extend(self.grand_crosses());
        for pattern in &patterns {
            debug!("Detected {:?}: {}", pattern.kind, pattern.label);
        }
        patterns
    }

    /// Four distinct bodies linked by a chain of three conjunctions.
    pub fn stelliums(&self) -> Vec<Pattern> {
        let mut found = BTreeSet::new();
        for a in self.adjacency.bodies(CONJUNCTION) {
            for b in self.adjacency.partners(CONJUNCTION, a) {
                for c in self.adjacency.partners(CONJUNCTION, b) {
                    if c == a {
                        continue;
                    }
                    for d in self.adjacency.partners(CONJUNCTION, c) {
                        if d == a || d == b {
                            continue;
                        }
                        let mut key = [a, b, c, d];
                        key.sort_unstable();
                        found.insert(key);
                    }
                }
            }
        }
        found
            .into_iter()
            .map(|key| Pattern {
                kind: PatternKind::Stellium,
                bodies: key.to_vec(),
                label: self.joined(&key),
            })
            .collect()
    }

    /// An opposition whose ends are both square to a third body, the apex.
    pub fn t_squares(&self) -> Vec<Pattern> {
        let mut found = BTreeMap::new();
        for (k, l) in self.adjacency.pairs(OPPOSITION) {
            let apexes = self.adjacency.partners(SQUARE, k);
            for apex in apexes {
                if self.adjacency.contains(SQUARE, apex, l) {
                    let label = format!(
                        "{} => {}, {}",
                        self.label(apex),
                        self.label(k),
                        self.label(l)
                    );
                    found.insert([apex, k, l], label);
                }
            }
        }
        found
            .into_iter()
            .map(|(key, label)| Pattern {
                kind: PatternKind::TSquare,
                bodies: key.to_vec(),
                label,
            })
            .collect()
    }

    /// Two quincunxes from one apex whose far ends are sextile.
    pub fn yods(&self) -> Vec<Pattern> {
        let mut found = BTreeMap::new();
        for apex in self.adjacency.bodies(QUINCUNX) {
            let partners: Vec<usize> = self.adjacency.partners(QUINCUNX, apex).into_iter().collect();
            for (i, &l) in partners.iter().enumerate() {
                for &m in &partners[i + 1..] {
                    if self.adjacency.contains(SEXTILE, l, m) {
                        let label =
                            format!("{} => {}, {}", self.label(apex), self.label(l), self.label(m));
                        found.insert([apex, l, m], label);
                    }
                }
            }
        }
        found
            .into_iter()
            .map(|(key, label)| Pattern {
                kind: PatternKind::Yod,
                bodies: key.to_vec(),
                label,
            })
            .collect()
    }

    /// Three bodies in mutual trine.
    pub fn grand_trines(&self) -> Vec<Pattern> {
        let mut found = BTreeSet::new();
        for (a, b) in self.adjacency.pairs(TRINE) {
            for c in self.adjacency.partners(TRINE, b) {
                if c > b && self.adjacency.contains(TRINE, a, c) {
                    found.insert([a, b, c]);
                }
            }
        }
        found
            .into_iter()
            .map(|key| Pattern {
                kind: PatternKind::GrandTrine,
                bodies: key.to_vec(),
                label: self.joined(&key),
            })
            .collect()
    }

    /// Two oppositions whose four ends are each square to the other pair.
    pub fn grand_crosses(&self) -> Vec<Pattern> {
        let oppositions: Vec<(usize, usize)> = self.adjacency.pairs(OPPOSITION).collect();
        let mut found = BTreeSet::new();
        for (i, &(a, c)) in oppositions.iter().enumerate() {
            for &(b, d) in &oppositions[i + 1..] {
                let squared = [(a, b), (a, d), (c, b), (c, d)]
                    .iter()
                    .all(|&(x, y)| self.adjacency.contains(SQUARE, x, y));
                if squared {
                    let mut key = [a, b, c, d];
                    key.sort_unstable();
                    found.insert(key);
                }
            }
        }
        found
            .into_iter()
            .map(|key| Pattern {
                kind: PatternKind::GrandCross,
                bodies: key.to_vec(),
                label: self.joined(&key),
            })
            .collect()
    }
}
