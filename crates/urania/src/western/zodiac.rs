//! The twelve signs and their elements.

use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_degrees, SLICE_DEGREES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignMeta {
    /// Glyph id in the chart template.
    pub name: String,
    pub element: Element,
}

lazy_static::lazy_static! {
    pub static ref SIGNS: Vec<SignMeta> = vec![
        SignMeta { name: "aries".to_string(), element: Element::Fire },
        SignMeta { name: "taurus".to_string(), element: Element::Earth },
        SignMeta { name: "gemini".to_string(), element: Element::Air },
        SignMeta { name: "cancer".to_string(), element: Element::Water },
        SignMeta { name: "leo".to_string(), element: Element::Fire },
        SignMeta { name: "virgo".to_string(), element: Element::Earth },
        SignMeta { name: "libra".to_string(), element: Element::Air },
        SignMeta { name: "scorpio".to_string(), element: Element::Water },
        SignMeta { name: "sagittarius".to_string(), element: Element::Fire },
        SignMeta { name: "capricorn".to_string(), element: Element::Earth },
        SignMeta { name: "aquarius".to_string(), element: Element::Air },
        SignMeta { name: "pisces".to_string(), element: Element::Water },
    ];
}

/// Sign index (0-11) of an absolute longitude.
pub fn sign_index(longitude: f64) -> usize {
    ((normalize_degrees(longitude) / SLICE_DEGREES) as usize).min(11)
}

/// Degrees travelled inside the sign, in [0, 30).
pub fn position_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    lon - sign_index(lon) as f64 * SLICE_DEGREES
}

/// Sign metadata; the index wraps past Pisces.
pub fn sign(index: usize) -> &'static SignMeta {
    &SIGNS[index % 12]
}

pub fn sign_name(index: usize) -> &'static str {
    &sign(index).name
}

pub fn element_of(index: usize) -> Element {
    sign(index).element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_index() {
        assert_eq!(sign_index(0.0), 0);
        assert_eq!(sign_index(29.999), 0);
        assert_eq!(sign_index(30.0), 1);
        assert_eq!(sign_index(359.9), 11);
        assert_eq!(sign_index(-10.0), 11);
        assert_eq!(sign_index(725.0), 0);
    }

    #[test]
    fn test_position_in_sign() {
        assert!((position_in_sign(45.5) - 15.5).abs() < 1e-9);
        assert!((position_in_sign(360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_elements_cycle() {
        assert_eq!(element_of(0), Element::Fire);
        assert_eq!(element_of(5), Element::Earth);
        assert_eq!(element_of(10), Element::Air);
        assert_eq!(element_of(7), Element::Water);
        assert_eq!(sign_name(8), "sagittarius");
    }
}
