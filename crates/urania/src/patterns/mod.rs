//! Higher-order configurations (stellium, T-square, yod, grand trine and
//! grand cross) over classified aspects.

pub mod detector;
pub mod types;

pub use detector::{is_derived_point, PatternDetector, DERIVED_POINTS};
pub use types::{Pattern, PatternKind};
