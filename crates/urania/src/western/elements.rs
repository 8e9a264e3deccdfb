use serde::{Deserialize, Serialize};

use crate::western::zodiac::{element_of, Element};

/// Weighted element scores of a body set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementTally {
    pub fire: f64,
    pub earth: f64,
    pub air: f64,
    pub water: f64,
}

/// Element shares in whole percent.
///
/// Each share is rounded on its own, so the four values may not add up to
/// exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPercentages {
    pub fire: u32,
    pub earth: u32,
    pub air: u32,
    pub water: u32,
}

impl ElementTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element, points: f64) {
        match element {
            Element::Fire => self.fire += points,
            Element::Earth => self.earth += points,
            Element::Air => self.air += points,
            Element::Water => self.water += points,
        }
    }

    /// Score one body: its base points, plus `bonus` when it stands in one of
    /// the signs it rules.
    pub fn add_body(&mut self, sign: usize, points: f64, related_signs: &[usize], bonus: f64) {
        let extra = if related_signs.contains(&sign) {
            bonus
        } else {
            0.0
        };
        self.add(element_of(sign), points + extra);
    }

    pub fn total(&self) -> f64 {
        self.fire + self.earth + self.air + self.water
    }

    /// Round-half-even shares of the total. An empty tally reports zero
    /// everywhere.
    pub fn percentages(&self) -> ElementPercentages {
        let total = self.total();
        let share = |value: f64| -> u32 {
            if total <= 0.0 {
                return 0;
            }
            (100.0 * value / total).round_ties_even() as u32
        };
        ElementPercentages {
            fire: share(self.fire),
            earth: share(self.earth),
            air: share(self.air),
            water: share(self.water),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rulership_bonus() {
        let mut tally = ElementTally::new();
        // mars in aries, which it rules
        tally.add_body(0, 10.0, &[0, 7], 10.0);
        // mars in taurus
        tally.add_body(1, 10.0, &[0, 7], 10.0);
        assert_eq!(tally.fire, 20.0);
        assert_eq!(tally.earth, 10.0);
    }

    #[test]
    fn test_rounding_drift_is_kept() {
        let tally = ElementTally {
            fire: 1.0,
            earth: 1.0,
            air: 1.0,
            water: 0.0,
        };
        let pct = tally.percentages();
        assert_eq!((pct.fire, pct.earth, pct.air, pct.water), (33, 33, 33, 0));
    }

    #[test]
    fn test_half_rounds_to_even() {
        let tally = ElementTally {
            fire: 1.0,
            earth: 7.0,
            air: 0.0,
            water: 0.0,
        };
        // 12.5 -> 12, 87.5 -> 88
        let pct = tally.percentages();
        assert_eq!((pct.fire, pct.earth), (12, 88));
    }

    #[test]
    fn test_empty_tally() {
        assert_eq!(ElementTally::new().percentages(), ElementPercentages::default());
    }
}
