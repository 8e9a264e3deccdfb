//! Spreads body labels around the wheel so glyphs do not overlap.

use std::cmp::Ordering;

/// Labels closer than this (degrees) are moved apart.
pub const DETECTION_DISTANCE: f64 = 5.0;

/// Gap (degrees) a moved label keeps from the label it collided with.
pub const LABEL_SEPARATION: f64 = 6.5;

/// A body label at a display angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPosition {
    pub body_id: usize,
    pub degree: f64,
}

impl LabelPosition {
    pub fn new(body_id: usize, degree: f64) -> Self {
        Self { body_id, degree }
    }
}

/// Adjust label angles so that neighbouring labels stay apart.
///
/// The output follows the ascending order of the raw degrees and is not
/// re-sorted after adjustment. A forward pass pushes each label that sits
/// within [`DETECTION_DISTANCE`] of the previous adjusted label to
/// `previous + LABEL_SEPARATION`. A cleanup pass then compares every pair and
/// moves the later label of a still-colliding pair to
/// `(earlier + LABEL_SEPARATION) % 360`.
///
/// The forward pass does not wrap at 360°, so labels near the end of the
/// circle may come back above 360. Callers place them with
/// [`place`](super::place), which normalizes the angle.
pub fn deconflict_labels(labels: &[LabelPosition]) -> Vec<LabelPosition> {
    let mut ordered = labels.to_vec();
    ordered.sort_by(|a, b| {
        a.degree
            .partial_cmp(&b.degree)
            .unwrap_or(Ordering::Equal)
            .then(a.body_id.cmp(&b.body_id))
    });

    let Some(first) = ordered.first() else {
        return ordered;
    };

    let mut adjusted = Vec::with_capacity(ordered.len());
    adjusted.push(first.degree);
    for label in ordered.iter().skip(1) {
        let previous = adjusted[adjusted.len() - 1];
        let mut current = label.degree;
        if current - previous < DETECTION_DISTANCE {
            current = previous + LABEL_SEPARATION;
        }
        adjusted.push(current);
    }

    for i in 0..adjusted.len() {
        for j in (i + 1)..adjusted.len() {
            if (adjusted[j] - adjusted[i]).abs() < DETECTION_DISTANCE {
                adjusted[j] = (adjusted[i] + LABEL_SEPARATION) % 360.0;
            }
        }
    }

    ordered
        .iter()
        .zip(adjusted)
        .map(|(label, degree)| LabelPosition::new(label.body_id, degree))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(deconflict_labels(&[]).is_empty());
    }

    #[test]
    fn test_spread_labels_untouched() {
        let labels = vec![LabelPosition::new(0, 10.0), LabelPosition::new(1, 100.0)];
        assert_eq!(deconflict_labels(&labels), labels);
    }

    #[test]
    fn test_cluster_is_spread() {
        let labels = vec![
            LabelPosition::new(0, 10.0),
            LabelPosition::new(1, 11.0),
            LabelPosition::new(2, 12.0),
        ];
        let result = deconflict_labels(&labels);
        let ids: Vec<usize> = result.iter().map(|l| l.body_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(result[0].degree, 10.0);
        assert_eq!(result[1].degree, 16.5);
        assert_eq!(result[2].degree, 23.0);
    }

    #[test]
    fn test_unsorted_input_follows_raw_order() {
        let labels = vec![LabelPosition::new(7, 200.0), LabelPosition::new(3, 198.0)];
        let result = deconflict_labels(&labels);
        assert_eq!(result[0].body_id, 3);
        assert_eq!(result[1].body_id, 7);
        assert_eq!(result[1].degree, 204.5);
    }

    #[test]
    fn test_forward_pass_runs_past_boundary() {
        // 358 collides with 356 and is pushed beyond 360 without wrapping
        let labels = vec![
            LabelPosition::new(0, 2.0),
            LabelPosition::new(1, 356.0),
            LabelPosition::new(2, 358.0),
        ];
        let result = deconflict_labels(&labels);
        assert_eq!(result[0].degree, 2.0);
        assert_eq!(result[1].degree, 356.0);
        assert_eq!(result[2].degree, 362.5);
    }
}
