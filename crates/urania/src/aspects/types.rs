use serde::{Deserialize, Serialize};

/// Exact separation of a conjunction, in degrees.
pub const CONJUNCTION: u16 = 0;
pub const SEXTILE: u16 = 60;
pub const SQUARE: u16 = 90;
pub const TRINE: u16 = 120;
pub const QUINCUNX: u16 = 150;
pub const OPPOSITION: u16 = 180;

/// Separations a catalog entry may use.
pub const ALLOWED_DEGREES: [u16; 11] = [0, 30, 45, 60, 72, 90, 120, 135, 144, 150, 180];

/// One entry of the aspect catalog.
///
/// The exact separation doubles as the type id: the glyph of an entry is
/// `orb{degree}` and its colour slot is `orb_color_{degree}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub name: String,
    pub degree: u16,
    pub orb: f64,
    pub color: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AspectDefinition {
    pub fn new(name: &str, degree: u16, orb: f64, color: &str, is_active: bool) -> Self {
        Self {
            name: name.to_string(),
            degree,
            orb,
            color: color.to_string(),
            is_active,
        }
    }

    /// Glyph id of the aspect symbol in the template defs.
    pub fn glyph_id(&self) -> String {
        format!("orb{}", self.degree)
    }

    /// Inclusive window check on a circular separation.
    pub fn matches(&self, separation: f64) -> bool {
        let exact = f64::from(self.degree);
        exact - self.orb <= separation && separation <= exact + self.orb
    }
}

/// Position handed to the aspect calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectPoint {
    /// Index of the body inside its subject.
    pub id: usize,
    pub longitude: f64,
    /// Ascendant, Midheaven and their opposites.
    pub is_axis: bool,
}

/// A body pair that falls inside one catalog window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInstance {
    pub p1: usize,
    pub p2: usize,
    pub p1_longitude: f64,
    pub p2_longitude: f64,
    /// Exact separation of the matched catalog entry.
    pub aspect: u16,
    pub name: String,
    /// Measured circular separation, in [0, 180].
    pub separation: f64,
    /// `separation - exact`; negative when the pair is inside the exact angle.
    pub deviation: f64,
    /// Absolute deviation from the exact angle.
    pub orbit: f64,
}

impl AspectInstance {
    pub fn involves(&self, a: usize, b: usize) -> bool {
        (self.p1 == a && self.p2 == b) || (self.p1 == b && self.p2 == a)
    }
}
