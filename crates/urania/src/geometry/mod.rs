//! Circular geometry for the chart wheel.

pub mod deconflict;
pub mod placement;

pub use deconflict::{deconflict_labels, LabelPosition, DETECTION_DISTANCE, LABEL_SEPARATION};
pub use placement::{
    angle_of, degree_diff, label_rotation, normalize_degrees, place, place_inset, Point,
    SLICES, SLICE_DEGREES,
};
