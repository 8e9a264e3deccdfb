use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aspects::{AspectDefinition, ALLOWED_DEGREES};
use crate::error::{ChartError, Result};

/// Colour theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStyle {
    #[default]
    Dark,
    Bright,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub paper_0: String,
    pub paper_1: String,
    /// Slice fills, Aries first.
    pub zodiac_bg: Vec<String>,
    /// Sign glyph colours, Aries first.
    pub zodiac_icon: Vec<String>,
    pub zodiac_radix_ring_0: String,
    pub zodiac_radix_ring_1: String,
    pub zodiac_radix_ring_2: String,
    pub zodiac_transit_ring_0: String,
    pub zodiac_transit_ring_1: String,
    pub zodiac_transit_ring_2: String,
    pub zodiac_transit_ring_3: String,
    pub houses_radix_line: String,
    pub houses_transit_line: String,
    pub lunar_phase_0: String,
    pub lunar_phase_1: String,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl ChartColors {
    pub fn dark() -> Self {
        Self {
            paper_0: "#ffffff".to_string(),
            paper_1: "#1d2c56".to_string(),
            zodiac_bg: strings(&[
                "#c54100", "#6b3d00", "#5995e7", "#2b4972", "#ff7200", "#863c00", "#69acf1",
                "#4f0377", "#ffd237", "#482900", "#6cbfff", "#2b286f",
            ]),
            zodiac_icon: strings(&[
                "#ff7200", "#c7a26b", "#9ed0ff", "#7fa8e0", "#ffb347", "#d2a679", "#b4dcff",
                "#c27ae0", "#ffd237", "#b08a5a", "#9ee6ff", "#8c89ff",
            ]),
            zodiac_radix_ring_0: "#c9a227".to_string(),
            zodiac_radix_ring_1: "#c9a227".to_string(),
            zodiac_radix_ring_2: "#c9a227".to_string(),
            zodiac_transit_ring_0: "#c9a227".to_string(),
            zodiac_transit_ring_1: "#c9a227".to_string(),
            zodiac_transit_ring_2: "#6cbfff".to_string(),
            zodiac_transit_ring_3: "#6cbfff".to_string(),
            houses_radix_line: "#c9a227".to_string(),
            houses_transit_line: "#6cbfff".to_string(),
            lunar_phase_0: "#000000".to_string(),
            lunar_phase_1: "#ffffff".to_string(),
        }
    }

    pub fn bright() -> Self {
        Self {
            paper_0: "#000000".to_string(),
            paper_1: "#ffffff".to_string(),
            zodiac_bg: strings(&[
                "#482900", "#6b3d00", "#5995e7", "#2b4972", "#c54100", "#2b286f", "#69acf1",
                "#ffd237", "#ff7200", "#863c00", "#4f0377", "#6cbfff",
            ]),
            zodiac_icon: strings(&[
                "#482900", "#6b3d00", "#5995e7", "#2b4972", "#c54100", "#2b286f", "#69acf1",
                "#ffd237", "#ff7200", "#863c00", "#4f0377", "#6cbfff",
            ]),
            zodiac_radix_ring_0: "#ff0000".to_string(),
            zodiac_radix_ring_1: "#ff0000".to_string(),
            zodiac_radix_ring_2: "#ff0000".to_string(),
            zodiac_transit_ring_0: "#ff0000".to_string(),
            zodiac_transit_ring_1: "#ff0000".to_string(),
            zodiac_transit_ring_2: "#0000ff".to_string(),
            zodiac_transit_ring_3: "#0000ff".to_string(),
            houses_radix_line: "#ff0000".to_string(),
            houses_transit_line: "#0000ff".to_string(),
            lunar_phase_0: "#000000".to_string(),
            lunar_phase_1: "#ffffff".to_string(),
        }
    }
}

/// Catalog entry for a drawable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPointSetting {
    pub id: u32,
    /// Glyph id in the template, also the key of the input position
    /// (lower-cased).
    pub name: String,
    /// Key into the language table.
    pub label: String,
    pub color: String,
    pub is_active: bool,
    pub element_points: f64,
    /// Signs (0-11) the point rules.
    #[serde(default)]
    pub related_zodiac_signs: Vec<usize>,
}

impl CelestialPointSetting {
    fn new(
        id: u32,
        name: &str,
        color: &str,
        is_active: bool,
        element_points: f64,
        related_zodiac_signs: &[usize],
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            label: name.to_string(),
            color: color.to_string(),
            is_active,
            element_points,
            related_zodiac_signs: related_zodiac_signs.to_vec(),
        }
    }
}

fn default_points() -> Vec<CelestialPointSetting> {
    vec![
        CelestialPointSetting::new(0, "Sun", "#984b00", true, 40.0, &[4]),
        CelestialPointSetting::new(1, "Moon", "#150052", true, 40.0, &[3]),
        CelestialPointSetting::new(2, "Mercury", "#520800", true, 15.0, &[2, 5]),
        CelestialPointSetting::new(3, "Venus", "#400052", true, 15.0, &[1, 6]),
        CelestialPointSetting::new(4, "Mars", "#540000", true, 15.0, &[0, 7]),
        CelestialPointSetting::new(5, "Jupiter", "#47133d", true, 10.0, &[8, 11]),
        CelestialPointSetting::new(6, "Saturn", "#124500", true, 10.0, &[9, 10]),
        CelestialPointSetting::new(7, "Uranus", "#6f0766", true, 10.0, &[10]),
        CelestialPointSetting::new(8, "Neptune", "#06537f", true, 10.0, &[11]),
        CelestialPointSetting::new(9, "Pluto", "#713f04", true, 10.0, &[7]),
        CelestialPointSetting::new(10, "Mean_Node", "#4c1541", true, 0.0, &[]),
        CelestialPointSetting::new(11, "True_Node", "#4c1541", false, 0.0, &[]),
        CelestialPointSetting::new(12, "Asc", "#ff7e00", true, 40.0, &[]),
        CelestialPointSetting::new(13, "Mc", "#ff7e00", true, 20.0, &[]),
        CelestialPointSetting::new(14, "Dsc", "#ff7e00", false, 0.0, &[]),
        CelestialPointSetting::new(15, "Ic", "#ff7e00", false, 0.0, &[]),
        CelestialPointSetting::new(16, "Chiron", "#666f06", false, 0.0, &[]),
    ]
}

/// The aspect catalog, one entry per allowed separation.
pub fn default_aspects() -> Vec<AspectDefinition> {
    vec![
        AspectDefinition::new("conjunction", 0, 10.0, "#5757e2", true),
        AspectDefinition::new("semi-sextile", 30, 1.0, "#810757", false),
        AspectDefinition::new("semi-square", 45, 1.0, "#b14e58", false),
        AspectDefinition::new("sextile", 60, 6.0, "#d59e28", true),
        AspectDefinition::new("quintile", 72, 1.0, "#1f99b3", false),
        AspectDefinition::new("square", 90, 5.0, "#dc0000", true),
        AspectDefinition::new("trine", 120, 8.0, "#36d100", true),
        AspectDefinition::new("sesquiquadrate", 135, 1.0, "#985a10", false),
        AspectDefinition::new("biquintile", 144, 1.0, "#7a9810", false),
        AspectDefinition::new("quincunx", 150, 1.0, "#26bbcf", false),
        AspectDefinition::new("opposition", 180, 10.0, "#510060", true),
    ]
}

/// Display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSettings {
    pub cusp: String,
    pub aspects: String,
    pub transits: String,
    pub transit_name: String,
    pub and_word: String,
    pub planets_and_house: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
    pub fire: String,
    pub earth: String,
    pub air: String,
    pub water: String,
    /// Point label to display name.
    pub celestial_points: BTreeMap<String, String>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        let names = [
            ("Sun", "Sun"),
            ("Moon", "Moon"),
            ("Mercury", "Mercury"),
            ("Venus", "Venus"),
            ("Mars", "Mars"),
            ("Jupiter", "Jupiter"),
            ("Saturn", "Saturn"),
            ("Uranus", "Uranus"),
            ("Neptune", "Neptune"),
            ("Pluto", "Pluto"),
            ("Mean_Node", "Mean Node"),
            ("True_Node", "True Node"),
            ("Asc", "Asc"),
            ("Mc", "Mc"),
            ("Dsc", "Dsc"),
            ("Ic", "Ic"),
            ("Chiron", "Chiron"),
        ];
        Self {
            cusp: "Cusp".to_string(),
            aspects: "Aspects".to_string(),
            transits: "Transits for".to_string(),
            transit_name: "At the time of the transit".to_string(),
            and_word: "&amp;".to_string(),
            planets_and_house: "Points for".to_string(),
            chart_type: "Type".to_string(),
            north: "North".to_string(),
            south: "South".to_string(),
            east: "East".to_string(),
            west: "West".to_string(),
            fire: "Fire".to_string(),
            earth: "Earth".to_string(),
            air: "Air".to_string(),
            water: "Water".to_string(),
            celestial_points: names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutSettings {
    #[serde(rename = "basic_chart_viewBox")]
    pub basic_chart_viewbox: String,
    #[serde(rename = "wide_chart_viewBox")]
    pub wide_chart_viewbox: String,
}

impl Default for ChartLayoutSettings {
    fn default() -> Self {
        Self {
            basic_chart_viewbox: "0 0 772.2 546.0".to_string(),
            wide_chart_viewbox: "0 0 1060 546.0".to_string(),
        }
    }
}

/// Theme, catalogs and labels shared read-only by every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub colors: ChartColors,
    pub celestial_points: Vec<CelestialPointSetting>,
    pub aspects: Vec<AspectDefinition>,
    pub language: LanguageSettings,
    pub chart: ChartLayoutSettings,
    /// Extra element points for a body standing in a sign it rules.
    pub rulership_bonus: f64,
    /// Maximum orb for aspects that involve an axis point.
    pub axes_orb: Option<f64>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::for_style(ThemeStyle::Dark)
    }
}

impl ChartSettings {
    pub fn for_style(style: ThemeStyle) -> Self {
        let colors = match style {
            ThemeStyle::Dark => ChartColors::dark(),
            ThemeStyle::Bright => ChartColors::bright(),
        };
        Self {
            colors,
            celestial_points: default_points(),
            aspects: default_aspects(),
            language: LanguageSettings::default(),
            chart: ChartLayoutSettings::default(),
            rulership_bonus: 10.0,
            axes_orb: None,
        }
    }

    /// Parse a TOML theme; missing keys keep the dark defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)
            .map_err(|e| ChartError::configuration(format!("Invalid settings TOML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)
            .map_err(|e| ChartError::configuration(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors.zodiac_bg.len() != 12 || self.colors.zodiac_icon.len() != 12 {
            return Err(ChartError::configuration(
                "zodiac_bg and zodiac_icon must list 12 colours",
            ));
        }

        let mut degrees = BTreeSet::new();
        for aspect in &self.aspects {
            if !ALLOWED_DEGREES.contains(&aspect.degree) {
                return Err(ChartError::configuration(format!(
                    "aspect '{}' uses unsupported separation {}",
                    aspect.name, aspect.degree
                )));
            }
            if !aspect.orb.is_finite() || aspect.orb < 0.0 {
                return Err(ChartError::configuration(format!(
                    "aspect '{}' has invalid orb {}",
                    aspect.name, aspect.orb
                )));
            }
            if !degrees.insert(aspect.degree) {
                return Err(ChartError::configuration(format!(
                    "separation {} is listed twice in the aspect catalog",
                    aspect.degree
                )));
            }
        }

        let mut ids = BTreeSet::new();
        for point in &self.celestial_points {
            if !ids.insert(point.id) {
                return Err(ChartError::configuration(format!(
                    "celestial point id {} is used twice",
                    point.id
                )));
            }
            if let Some(sign) = point.related_zodiac_signs.iter().find(|&&s| s > 11) {
                return Err(ChartError::configuration(format!(
                    "celestial point '{}' rules unknown sign {}",
                    point.name, sign
                )));
            }
        }

        if let Some(orb) = self.axes_orb {
            if !orb.is_finite() || orb < 0.0 {
                return Err(ChartError::configuration(format!("invalid axes orb {}", orb)));
            }
        }
        Ok(())
    }

    pub fn point(&self, name: &str) -> Option<&CelestialPointSetting> {
        self.celestial_points
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn aspect(&self, degree: u16) -> Option<&AspectDefinition> {
        self.aspects.iter().find(|a| a.degree == degree)
    }

    /// Display name for a point label, falling back to the label itself.
    pub fn point_display_name<'s>(&'s self, label: &'s str) -> &'s str {
        self.language
            .celestial_points
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }
}
