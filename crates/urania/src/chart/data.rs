use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::aspects::AspectPoint;
use crate::chart::settings::ChartSettings;
use crate::error::{ChartError, Result};
use crate::geometry::normalize_degrees;
use crate::western::{position_in_sign, sign_index};

/// Precomputed position of one point, as delivered by the ephemeris layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub longitude: f64,
    #[serde(default)]
    pub retrograde: bool,
}

/// Raw input for one chart subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub nation: String,
    pub lat: f64,
    pub lng: f64,
    /// Local date and time of the chart.
    pub datetime: NaiveDateTime,
    /// Lower-cased point name to position.
    pub positions: BTreeMap<String, BodyPosition>,
    /// House cusp longitudes, first house first.
    pub houses: Vec<f64>,
    /// Sun to moon separation in degrees.
    pub lunar_phase_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Catalog id, used for colour slots.
    pub id: u32,
    pub name: String,
    pub label: String,
    /// Absolute longitude in [0, 360).
    pub longitude: f64,
    /// Longitude inside the sign, in [0, 30).
    pub position: f64,
    pub sign: usize,
    pub retrograde: bool,
    pub active: bool,
    pub related_signs: Vec<usize>,
    pub color: String,
    pub element_points: f64,
}

impl CelestialBody {
    /// Ascendant, Midheaven, Descendant or Imum Coeli.
    pub fn is_axis(&self) -> bool {
        ["asc", "mc", "dsc", "ic"]
            .iter()
            .any(|axis| self.name.eq_ignore_ascii_case(axis))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// 1-12
    pub index: u8,
    pub cusp: f64,
    pub position: f64,
    pub sign: usize,
}

/// One validated chart subject. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub city: String,
    pub nation: String,
    pub lat: f64,
    pub lng: f64,
    pub datetime: NaiveDateTime,
    /// Catalog points present in the input, catalog order. Body ids used by
    /// aspects and patterns index this list.
    pub bodies: Vec<CelestialBody>,
    pub houses: Vec<House>,
    pub lunar_phase_degrees: f64,
}

impl Subject {
    pub fn from_data(data: &SubjectData, settings: &ChartSettings) -> Result<Self> {
        if data.houses.len() != 12 {
            return Err(ChartError::validation(format!(
                "expected 12 house cusps for '{}', got {}",
                data.name,
                data.houses.len()
            )));
        }
        if let Some(bad) = data.houses.iter().find(|c| !c.is_finite()) {
            return Err(ChartError::validation(format!(
                "house cusp {} of '{}' is not a number",
                bad, data.name
            )));
        }

        // position keys match catalog names regardless of case
        let mut positions: BTreeMap<String, &BodyPosition> = BTreeMap::new();
        for (name, position) in &data.positions {
            if positions.insert(name.to_lowercase(), position).is_some() {
                warn!("Point '{}' is listed twice in '{}'", name, data.name);
            }
        }

        let mut bodies = Vec::new();
        for point in &settings.celestial_points {
            let Some(&position) = positions.get(&point.name.to_lowercase()) else {
                if point.is_active {
                    warn!("No position for active point '{}' in '{}'", point.name, data.name);
                }
                continue;
            };
            if !position.longitude.is_finite() {
                return Err(ChartError::validation(format!(
                    "longitude of '{}' is not a number",
                    point.name
                )));
            }
            let longitude = normalize_degrees(position.longitude);
            debug!("{}: {} at {:.4}", data.name, point.name, longitude);
            bodies.push(CelestialBody {
                id: point.id,
                name: point.name.clone(),
                label: point.label.clone(),
                longitude,
                position: position_in_sign(longitude),
                sign: sign_index(longitude),
                retrograde: position.retrograde,
                active: point.is_active,
                related_signs: point.related_zodiac_signs.clone(),
                color: point.color.clone(),
                element_points: point.element_points,
            });
        }

        for name in data.positions.keys() {
            if settings.point(name).is_none() {
                warn!("Ignoring unknown point '{}' in '{}'", name, data.name);
            }
        }
        if !bodies.iter().any(|b| b.active) {
            warn!("Subject '{}' has no active bodies", data.name);
        }

        let houses = data
            .houses
            .iter()
            .enumerate()
            .map(|(i, &cusp)| {
                let cusp = normalize_degrees(cusp);
                House {
                    index: i as u8 + 1,
                    cusp,
                    position: position_in_sign(cusp),
                    sign: sign_index(cusp),
                }
            })
            .collect();

        Ok(Self {
            name: data.name.clone(),
            city: data.city.clone(),
            nation: data.nation.clone(),
            lat: data.lat,
            lng: data.lng,
            datetime: data.datetime,
            bodies,
            houses,
            lunar_phase_degrees: data.lunar_phase_degrees,
        })
    }

    /// Cusp of the seventh house. Every wheel is rotated so this angle sits
    /// on the left edge.
    pub fn descendant(&self) -> f64 {
        self.houses[6].cusp
    }

    /// Active bodies with their ids.
    pub fn active_bodies(&self) -> impl Iterator<Item = (usize, &CelestialBody)> {
        self.bodies.iter().enumerate().filter(|(_, b)| b.active)
    }

    /// Active bodies as aspect calculator input, optionally dropping points
    /// for which `exclude` returns true.
    pub fn aspect_points(&self, exclude: impl Fn(&CelestialBody) -> bool) -> Vec<AspectPoint> {
        self.active_bodies()
            .filter(|(_, body)| !exclude(body))
            .map(|(id, body)| AspectPoint {
                id,
                longitude: body.longitude,
                is_axis: body.is_axis(),
            })
            .collect()
    }

    /// Body labels indexed by body id.
    pub fn labels(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.label.clone()).collect()
    }
}
