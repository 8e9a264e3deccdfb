pub mod adjacency;
pub mod calculator;
pub mod types;

pub use adjacency::AspectAdjacency;
pub use calculator::AspectCalculator;
pub use types::{
    AspectDefinition, AspectInstance, AspectPoint, ALLOWED_DEGREES, CONJUNCTION, OPPOSITION,
    QUINCUNX, SEXTILE, SQUARE, TRINE,
};
