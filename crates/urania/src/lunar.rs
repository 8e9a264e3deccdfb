//! Crescent geometry of the lunar phase icon.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Shape of the shading circle drawn over the moon disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarPhase {
    pub center_offset: f64,
    pub radius: f64,
    pub foreground: String,
    pub background: String,
}

impl LunarPhase {
    /// Geometry for a sun-moon separation `deg` in [0, 360).
    ///
    /// `colors` are the two theme shades; waxing and waning quadrants swap
    /// which one is drawn in front. Near the quadrant ends the radius grows
    /// quadratically so the shading circle covers the disc.
    pub fn from_separation(deg: f64, colors: [&str; 2]) -> Result<Self> {
        if !(0.0..360.0).contains(&deg) {
            return Err(ChartError::invariant(format!(
                "lunar phase angle {} is outside [0, 360)",
                deg
            )));
        }
        let [shade_0, shade_1] = colors;

        let (center_offset, radius, foreground, background) = if deg < 90.0 {
            let mut maxr = deg;
            if deg > 80.0 {
                maxr *= maxr;
            }
            let t = deg / 90.0;
            (20.0 + t * (maxr + 10.0), 10.0 + t * maxr, shade_0, shade_1)
        } else if deg < 180.0 {
            let mut maxr = 180.0 - deg;
            if deg < 100.0 {
                maxr *= maxr;
            }
            let t = (deg - 90.0) / 90.0;
            (
                20.0 + t * (maxr + 10.0) - (maxr + 10.0),
                10.0 + maxr - t * maxr,
                shade_1,
                shade_0,
            )
        } else if deg < 270.0 {
            let mut maxr = deg - 180.0;
            if deg > 260.0 {
                maxr *= maxr;
            }
            let t = (deg - 180.0) / 90.0;
            (20.0 + t * (maxr + 10.0), 10.0 + t * maxr, shade_1, shade_0)
        } else {
            let mut maxr = 360.0 - deg;
            if deg < 280.0 {
                maxr *= maxr;
            }
            let t = (deg - 270.0) / 90.0;
            (
                20.0 + t * (maxr + 10.0) - (maxr + 10.0),
                10.0 + maxr - t * maxr,
                shade_0,
                shade_1,
            )
        };

        Ok(Self {
            center_offset,
            radius,
            foreground: foreground.to_string(),
            background: background.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [&str; 2] = ["#000000", "#ffffff"];

    #[test]
    fn test_new_moon() {
        let phase = LunarPhase::from_separation(0.0, COLORS).unwrap();
        assert_eq!(phase.center_offset, 20.0);
        assert_eq!(phase.radius, 10.0);
        assert_eq!(phase.foreground, "#000000");
        assert_eq!(phase.background, "#ffffff");
    }

    #[test]
    fn test_first_quarter_linear() {
        let phase = LunarPhase::from_separation(45.0, COLORS).unwrap();
        assert!((phase.center_offset - 47.5).abs() < 1e-9);
        assert!((phase.radius - 32.5).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_growth_near_quarter() {
        let phase = LunarPhase::from_separation(85.0, COLORS).unwrap();
        let maxr = 85.0 * 85.0;
        assert!((phase.radius - (10.0 + 85.0 / 90.0 * maxr)).abs() < 1e-9);
    }

    #[test]
    fn test_waning_quadrants_swap_colors() {
        let phase = LunarPhase::from_separation(135.0, COLORS).unwrap();
        assert_eq!(phase.foreground, "#ffffff");
        let phase = LunarPhase::from_separation(200.0, COLORS).unwrap();
        assert_eq!(phase.foreground, "#ffffff");
        let phase = LunarPhase::from_separation(300.0, COLORS).unwrap();
        assert_eq!(phase.foreground, "#000000");
        // full moon sits at the start of the third quadrant
        let phase = LunarPhase::from_separation(180.0, COLORS).unwrap();
        assert_eq!(phase.radius, 10.0);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            LunarPhase::from_separation(360.0, COLORS),
            Err(ChartError::Invariant { .. })
        ));
        assert!(LunarPhase::from_separation(-0.5, COLORS).is_err());
        assert!(LunarPhase::from_separation(f64::NAN, COLORS).is_err());
    }
}
