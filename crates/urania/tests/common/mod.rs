#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use urania::chart::{BodyPosition, ChartSettings, Subject, SubjectData};

pub fn subject_data(name: &str, longitudes: &[(&str, f64)], first_cusp: f64) -> SubjectData {
    let positions: BTreeMap<String, BodyPosition> = longitudes
        .iter()
        .map(|(point, lon)| {
            (
                point.to_string(),
                BodyPosition {
                    longitude: *lon,
                    retrograde: false,
                },
            )
        })
        .collect();
    SubjectData {
        name: name.to_string(),
        city: "Bogota, Distrito Capital, Colombia".to_string(),
        nation: "CO".to_string(),
        lat: 4.61,
        lng: -74.08,
        datetime: NaiveDate::from_ymd_opt(2003, 2, 22)
            .unwrap()
            .and_hms_opt(3, 5, 0)
            .unwrap(),
        positions,
        houses: (0..12).map(|i| first_cusp + 30.0 * i as f64).collect(),
        lunar_phase_degrees: 135.0,
    }
}

pub fn sample_longitudes() -> Vec<(&'static str, f64)> {
    vec![
        ("sun", 333.2),
        ("moon", 262.6),
        ("mercury", 312.4),
        ("venus", 290.1),
        ("mars", 243.9),
        ("jupiter", 131.5),
        ("saturn", 82.8),
        ("uranus", 329.3),
        ("neptune", 311.1),
        ("pluto", 259.0),
        ("mean_node", 79.6),
        ("asc", 251.0),
        ("mc", 176.4),
    ]
}

pub fn sample_subject(name: &str, settings: &ChartSettings) -> Subject {
    Subject::from_data(&subject_data(name, &sample_longitudes(), 251.0), settings).unwrap()
}

pub fn shifted_subject(name: &str, shift: f64, settings: &ChartSettings) -> Subject {
    let longitudes: Vec<(&str, f64)> = sample_longitudes()
        .into_iter()
        .map(|(point, lon)| (point, lon + shift))
        .collect();
    Subject::from_data(&subject_data(name, &longitudes, 251.0 + shift), settings).unwrap()
}
