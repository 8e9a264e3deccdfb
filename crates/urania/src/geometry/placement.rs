//! Maps circular positions onto SVG coordinates.
//!
//! Every wheel element lives on a circle whose centre sits at `(radius, radius)`,
//! so the circle fits a `2 * radius` square with the origin in the top-left
//! corner. Angles run counter-clockwise from the positive x axis and the y axis
//! grows downward, as in SVG.

use serde::{Deserialize, Serialize};

/// Number of equal slices the wheel is divided into (one per sign).
pub const SLICES: u32 = 12;

/// Width of a single slice in degrees.
pub const SLICE_DEGREES: f64 = 360.0 / SLICES as f64;

/// Point in SVG user space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift both coordinates by the same amount.
    pub fn offset(self, delta: f64) -> Self {
        Self {
            x: self.x + delta,
            y: self.y + delta,
        }
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // tiny negative inputs round up to exactly 360.0
    if normalized >= 360.0 {
        normalized -= 360.0;
    }
    normalized
}

/// Circular separation between two longitudes, in [0, 180].
pub fn degree_diff(a: f64, b: f64) -> f64 {
    let raw = (a - b).abs() % 360.0;
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Place a point on a circle of `radius` centred at `(radius, radius)`.
///
/// The angle is `slice * SLICE_DEGREES + offset`. Continuous placement passes
/// slice `0` and folds the position into `offset`.
pub fn place(slice: u32, radius: f64, offset: f64) -> Point {
    let angle = normalize_degrees(f64::from(slice) * SLICE_DEGREES + offset);
    let radians = angle.to_radians();
    Point {
        x: radius * (radians.cos() + 1.0),
        y: radius * (1.0 - radians.sin()),
    }
}

/// Place a point on a ring `inset` units inside a wheel of radius `radius`.
///
/// The ring shares the wheel centre `(radius, radius)`.
pub fn place_inset(radius: f64, inset: f64, offset: f64) -> Point {
    place(0, radius - inset, offset).offset(inset)
}

/// Recover the angle of a point produced by [`place`] on a circle of `radius`.
pub fn angle_of(point: Point, radius: f64) -> f64 {
    let dx = point.x / radius - 1.0;
    let dy = 1.0 - point.y / radius;
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Rotation (degrees) that keeps a label at `point` upright while facing the
/// wheel centre `(radius, radius)`.
pub fn label_rotation(point: Point, radius: f64) -> f64 {
    let mut degrees = (radius - point.y).atan2(radius - point.x).to_degrees() - 90.0;
    if (90.0..270.0).contains(&degrees) {
        degrees += 180.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_cardinal_points() {
        let east = place(0, 100.0, 0.0);
        assert!((east.x - 200.0).abs() < 1e-9);
        assert!((east.y - 100.0).abs() < 1e-9);

        let north = place(0, 100.0, 90.0);
        assert!((north.x - 100.0).abs() < 1e-9);
        assert!(north.y.abs() < 1e-9);

        // three slices of 30 degrees land on the same spot
        let sliced = place(3, 100.0, 0.0);
        assert!((sliced.x - north.x).abs() < 1e-9);
        assert!((sliced.y - north.y).abs() < 1e-9);
    }

    #[test]
    fn test_place_wraps_offset() {
        let a = place(0, 50.0, 370.0);
        let b = place(0, 50.0, 10.0);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);

        let c = place(0, 50.0, -90.0);
        let d = place(0, 50.0, 270.0);
        assert!((c.x - d.x).abs() < 1e-9);
        assert!((c.y - d.y).abs() < 1e-9);
    }

    #[test]
    fn test_place_inset_shares_centre() {
        let p = place_inset(240.0, 40.0, 180.0);
        // radius 200 ring around (240, 240), pointing west
        assert!((p.x - 40.0).abs() < 1e-9);
        assert!((p.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_degree_diff() {
        assert_eq!(degree_diff(10.0, 350.0), 20.0);
        assert_eq!(degree_diff(350.0, 10.0), 20.0);
        assert_eq!(degree_diff(0.0, 180.0), 180.0);
        assert_eq!(degree_diff(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_label_rotation_upright() {
        // label on the left of the centre reads upright without flipping
        let rotation = label_rotation(Point::new(0.0, 100.0), 100.0);
        assert!((rotation - (-90.0)).abs() < 1e-9);
        let rotation = label_rotation(Point::new(100.0, 200.0), 100.0);
        assert!((rotation - (-180.0)).abs() < 1e-9);
        // due east sits exactly on the flip boundary
        let rotation = label_rotation(Point::new(200.0, 100.0), 100.0);
        assert!((rotation - 270.0).abs() < 1e-9);
    }
}
