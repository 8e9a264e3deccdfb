use urania::aspects::{
    AspectAdjacency, AspectCalculator, AspectDefinition, AspectPoint, CONJUNCTION, OPPOSITION,
};
use urania::chart::default_aspects;
use urania::patterns::{PatternDetector, PatternKind};

fn points(longitudes: &[f64]) -> Vec<AspectPoint> {
    longitudes
        .iter()
        .enumerate()
        .map(|(id, &longitude)| AspectPoint {
            id,
            longitude,
            is_axis: false,
        })
        .collect()
}

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("B{}", i)).collect()
}

#[test]
fn test_orb_boundary_is_inclusive() {
    let catalog = vec![AspectDefinition::new("conjunction", 0, 10.0, "#5757e2", true)];
    let calculator = AspectCalculator::new(&catalog);

    let at_edge = calculator.calculate_aspects(100.0, 110.0);
    assert_eq!(at_edge.len(), 1);
    assert_eq!(at_edge[0].0.degree, CONJUNCTION);

    assert!(calculator.calculate_aspects(100.0, 110.001).is_empty());
}

#[test]
fn test_orb_boundary_for_square_and_opposition() {
    let square = vec![AspectDefinition::new("square", 90, 5.0, "#dc0000", true)];
    let calculator = AspectCalculator::new(&square);
    assert_eq!(calculator.calculate_aspects(0.0, 95.0).len(), 1);
    assert_eq!(calculator.calculate_aspects(0.0, 85.0).len(), 1);
    assert!(calculator.calculate_aspects(0.0, 95.001).is_empty());
    assert!(calculator.calculate_aspects(0.0, 84.999).is_empty());

    let opposition = vec![AspectDefinition::new("opposition", 180, 10.0, "#510060", true)];
    let calculator = AspectCalculator::new(&opposition);
    let at_edge = calculator.calculate_aspects(20.0, 190.0);
    assert_eq!(at_edge.len(), 1);
    assert_eq!(at_edge[0].0.degree, OPPOSITION);
    assert!(calculator.calculate_aspects(20.0, 189.999).is_empty());
}

#[test]
fn test_exact_opposition_has_zero_orbit() {
    let catalog = default_aspects();
    let aspects = AspectCalculator::new(&catalog).compute_natal_aspects(&points(&[10.0, 190.0]));
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect, OPPOSITION);
    assert!(aspects[0].orbit.abs() < 1e-9);
}

#[test]
fn test_separation_wraps_across_zero() {
    let catalog = default_aspects();
    let aspects = AspectCalculator::new(&catalog).compute_natal_aspects(&points(&[355.0, 3.0]));
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect, CONJUNCTION);
    assert!((aspects[0].separation - 8.0).abs() < 1e-9);
}

#[test]
fn test_inactive_entries_only_when_requested() {
    let catalog = default_aspects();
    let pair = points(&[0.0, 150.5]);
    assert!(AspectCalculator::new(&catalog)
        .compute_natal_aspects(&pair)
        .is_empty());
    let all = AspectCalculator::new(&catalog)
        .including_inactive()
        .compute_natal_aspects(&pair);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].aspect, 150);
}

#[test]
fn test_stellium_of_four_close_bodies() {
    let catalog = default_aspects();
    let aspects = AspectCalculator::new(&catalog).compute_natal_aspects(&points(&[0.0, 1.0, 2.0, 3.0]));
    let adjacency = AspectAdjacency::from_aspects(&aspects);
    let names = labels(4);
    let patterns = PatternDetector::new(&adjacency, &names).detect();

    let stelliums: Vec<_> = patterns
        .iter()
        .filter(|p| p.kind == PatternKind::Stellium)
        .collect();
    assert_eq!(stelliums.len(), 1);
    assert_eq!(stelliums[0].bodies, vec![0, 1, 2, 3]);
}

#[test]
fn test_t_square() {
    let catalog = default_aspects();
    let aspects = AspectCalculator::new(&catalog).compute_natal_aspects(&points(&[0.0, 90.0, 180.0]));
    let adjacency = AspectAdjacency::from_aspects(&aspects);
    let names = labels(3);
    let patterns = PatternDetector::new(&adjacency, &names).detect();

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].kind, PatternKind::TSquare);
    assert_eq!(patterns[0].apex(), Some(1));
    assert_eq!(patterns[0].label, "B1 => B0, B2");
}

#[test]
fn test_grand_cross_contains_t_squares() {
    let catalog = default_aspects();
    let aspects =
        AspectCalculator::new(&catalog).compute_natal_aspects(&points(&[0.0, 90.0, 180.0, 270.0]));
    let adjacency = AspectAdjacency::from_aspects(&aspects);
    let names = labels(4);
    let patterns = PatternDetector::new(&adjacency, &names).detect();

    let crosses = patterns
        .iter()
        .filter(|p| p.kind == PatternKind::GrandCross)
        .count();
    let t_squares = patterns
        .iter()
        .filter(|p| p.kind == PatternKind::TSquare)
        .count();
    assert_eq!(crosses, 1);
    assert_eq!(t_squares, 4);
}
