use crate::aspects::types::{AspectDefinition, AspectInstance, AspectPoint};
use crate::geometry::degree_diff;

/// Classifies body pairs against an aspect catalog.
///
/// Every catalog entry is checked on its own, so a pair may match several
/// entries when their windows overlap.
pub struct AspectCalculator<'a> {
    catalog: &'a [AspectDefinition],
    include_inactive: bool,
    axes_orb: Option<f64>,
}

impl<'a> AspectCalculator<'a> {
    /// Calculator over the active entries of `catalog`.
    pub fn new(catalog: &'a [AspectDefinition]) -> Self {
        Self {
            catalog,
            include_inactive: false,
            axes_orb: None,
        }
    }

    /// Also match entries switched off for drawing.
    pub fn including_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    /// Tighter orb applied when either body is an axis point.
    pub fn with_axes_orb(mut self, axes_orb: Option<f64>) -> Self {
        self.axes_orb = axes_orb;
        self
    }

    fn entries(&self) -> impl Iterator<Item = &'a AspectDefinition> + '_ {
        let include_inactive = self.include_inactive;
        self.catalog
            .iter()
            .filter(move |entry| include_inactive || entry.is_active)
    }

    /// All catalog matches for two longitudes, in catalog order.
    pub fn calculate_aspects(&self, lon1: f64, lon2: f64) -> Vec<(&'a AspectDefinition, f64)> {
        let separation = degree_diff(lon1, lon2);
        self.entries()
            .filter(|entry| entry.matches(separation))
            .map(|entry| (entry, separation))
            .collect()
    }

    /// Push one instance per catalog match between `a` and `b`. Pairs
    /// touching an axis are held to the tighter axes orb when one is set.
    fn classify(&self, a: &AspectPoint, b: &AspectPoint, out: &mut Vec<AspectInstance>) {
        for (entry, separation) in self.calculate_aspects(a.longitude, b.longitude) {
            let deviation = separation - f64::from(entry.degree);
            let orbit = deviation.abs();
            if let Some(axes_orb) = self.axes_orb {
                if (a.is_axis || b.is_axis) && orbit > axes_orb {
                    continue;
                }
            }
            out.push(AspectInstance {
                p1: a.id,
                p2: b.id,
                p1_longitude: a.longitude,
                p2_longitude: b.longitude,
                aspect: entry.degree,
                name: entry.name.clone(),
                separation,
                deviation,
                orbit,
            });
        }
    }

    /// Aspects among one set of bodies, each unordered pair visited once.
    pub fn compute_natal_aspects(&self, points: &[AspectPoint]) -> Vec<AspectInstance> {
        let mut aspects = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                self.classify(&points[i], &points[j], &mut aspects);
            }
        }
        aspects
    }

    /// Aspects between a primary and a secondary set.
    ///
    /// `p1` of every instance indexes the primary subject, `p2` the secondary.
    pub fn compute_cross_aspects(
        &self,
        primary: &[AspectPoint],
        secondary: &[AspectPoint],
    ) -> Vec<AspectInstance> {
        let mut aspects = Vec::new();
        for a in primary {
            for b in secondary {
                self.classify(a, b, &mut aspects);
            }
        }
        aspects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::types::{OPPOSITION, SQUARE};

    fn catalog() -> Vec<AspectDefinition> {
        vec![
            AspectDefinition::new("conjunction", 0, 10.0, "#5757e2", true),
            AspectDefinition::new("square", 90, 5.0, "#dc0000", true),
            AspectDefinition::new("quincunx", 150, 1.0, "#26bbcf", false),
            AspectDefinition::new("opposition", 180, 10.0, "#510060", true),
        ]
    }

    fn point(id: usize, longitude: f64) -> AspectPoint {
        AspectPoint {
            id,
            longitude,
            is_axis: false,
        }
    }

    #[test]
    fn test_inactive_entries_skipped_by_default() {
        let catalog = catalog();
        let calculator = AspectCalculator::new(&catalog);
        assert!(calculator.calculate_aspects(0.0, 150.0).is_empty());

        let calculator = AspectCalculator::new(&catalog).including_inactive();
        let matches = calculator.calculate_aspects(0.0, 150.0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0.degree, 150);
    }

    #[test]
    fn test_cross_aspects_keep_subject_indices() {
        let catalog = catalog();
        let calculator = AspectCalculator::new(&catalog);
        let primary = vec![point(0, 10.0), point(3, 100.0)];
        let secondary = vec![point(5, 190.0)];
        let aspects = calculator.compute_cross_aspects(&primary, &secondary);

        assert_eq!(aspects.len(), 2);
        assert_eq!((aspects[0].p1, aspects[0].p2, aspects[0].aspect), (0, 5, OPPOSITION));
        assert_eq!((aspects[1].p1, aspects[1].p2, aspects[1].aspect), (3, 5, SQUARE));
    }

    #[test]
    fn test_axes_orb_filters_wide_axis_aspects() {
        let catalog = catalog();
        let calculator = AspectCalculator::new(&catalog).with_axes_orb(Some(1.0));
        let points = vec![
            AspectPoint {
                id: 0,
                longitude: 0.0,
                is_axis: true,
            },
            point(1, 4.0),
            point(2, 184.0),
        ];
        let aspects = calculator.compute_natal_aspects(&points);
        // only the 1-2 opposition survives, both axis aspects are 4 degrees wide
        assert_eq!(aspects.len(), 1);
        assert!(aspects[0].involves(1, 2));
    }

    #[test]
    fn test_deviation_sign() {
        let catalog = catalog();
        let calculator = AspectCalculator::new(&catalog);
        let aspects = calculator.compute_natal_aspects(&[point(0, 0.0), point(1, 87.0)]);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].deviation, -3.0);
        assert_eq!(aspects[0].orbit, 3.0);
    }
}
