use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Stellium,
    TSquare,
    Yod,
    GrandTrine,
    GrandCross,
}

impl PatternKind {
    /// Legend caption.
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Stellium => "Stellium",
            PatternKind::TSquare => "T-Square",
            PatternKind::Yod => "Yod",
            PatternKind::GrandTrine => "Grand Trine",
            PatternKind::GrandCross => "Grand Cross",
        }
    }
}

/// A multi-body configuration found among classified aspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// Participants in key order. T-squares and yods lead with the apex.
    pub bodies: Vec<usize>,
    pub label: String,
}

impl Pattern {
    /// Apex body of a T-square or yod.
    pub fn apex(&self) -> Option<usize> {
        match self.kind {
            PatternKind::TSquare | PatternKind::Yod => self.bodies.first().copied(),
            _ => None,
        }
    }
}
