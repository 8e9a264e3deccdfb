use urania::geometry::{
    angle_of, deconflict_labels, normalize_degrees, place, LabelPosition, SLICE_DEGREES,
};

#[test]
fn test_place_round_trip() {
    for radius in [12.0, 110.0, 240.0] {
        let mut angle = -720.0;
        while angle < 720.0 {
            let point = place(0, radius, angle);
            let back = angle_of(point, radius);
            let expected = normalize_degrees(angle);
            let error = (back - expected).abs();
            assert!(
                error <= 1e-6 || (360.0 - error) <= 1e-6,
                "angle {} came back as {}",
                angle,
                back
            );
            angle += 7.3;
        }
    }
}

#[test]
fn test_place_stays_in_bounding_box() {
    for slice in 0..12 {
        let point = place(slice, 240.0, 17.0);
        assert!((0.0..=480.0).contains(&point.x));
        assert!((0.0..=480.0).contains(&point.y));
    }
}

#[test]
fn test_slice_index_folds_into_angle() {
    let by_slice = place(3, 100.0, 10.0);
    let by_offset = place(0, 100.0, 3.0 * SLICE_DEGREES + 10.0);
    assert!((by_slice.x - by_offset.x).abs() < 1e-9);
    assert!((by_slice.y - by_offset.y).abs() < 1e-9);
}

#[test]
fn test_deconflicted_labels_keep_distance() {
    let input: Vec<LabelPosition> = [100.0, 101.0, 102.5, 104.0, 250.0]
        .iter()
        .enumerate()
        .map(|(id, &deg)| LabelPosition::new(id, deg))
        .collect();
    let output = deconflict_labels(&input);
    assert_eq!(output.len(), input.len());

    let mut degrees: Vec<f64> = output.iter().map(|l| l.degree).collect();
    degrees.sort_by(|a, b| a.total_cmp(b));
    for pair in degrees[..4].windows(2) {
        assert!(pair[1] - pair[0] >= 6.49, "gap {:?}", pair);
    }
    let far = output.iter().find(|l| l.body_id == 4).unwrap();
    assert_eq!(far.degree, 250.0);
}

#[test]
fn test_deconflict_is_order_independent() {
    let forward: Vec<LabelPosition> = [(0, 30.0), (1, 31.0), (2, 90.0)]
        .iter()
        .map(|&(id, deg)| LabelPosition::new(id, deg))
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();
    assert_eq!(deconflict_labels(&forward), deconflict_labels(&reversed));
}
