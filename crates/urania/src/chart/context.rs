use serde::{Deserialize, Serialize};

use crate::chart::data::Subject;
use crate::chart::settings::{ChartSettings, ThemeStyle};
use crate::error::{ChartError, Result};

/// Drawing radius of the wheel; the wheel spans a 480 unit square.
pub const WHEEL_RADIUS: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartVariant {
    Natal,
    ExternalNatal,
    Transit,
    Synastry,
}

impl ChartVariant {
    /// Transit and synastry charts overlay a second subject.
    pub fn is_dual(&self) -> bool {
        matches!(self, ChartVariant::Transit | ChartVariant::Synastry)
    }

    pub fn radii(&self) -> RadiusSet {
        if self.is_dual() {
            RadiusSet::DUAL
        } else {
            RadiusSet::NATAL
        }
    }
}

impl std::fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartVariant::Natal => "Natal",
            ChartVariant::ExternalNatal => "ExternalNatal",
            ChartVariant::Transit => "Transit",
            ChartVariant::Synastry => "Synastry",
        };
        f.write_str(name)
    }
}

/// Ring insets from the wheel edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusSet {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl RadiusSet {
    pub const NATAL: RadiusSet = RadiusSet {
        c1: 56.0,
        c2: 92.0,
        c3: 110.0,
    };
    pub const DUAL: RadiusSet = RadiusSet {
        c1: 12.0,
        c2: 36.0,
        c3: 72.0,
    };
}

/// Caller-facing look options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub style: ThemeStyle,
    pub font: String,
    pub font_name: String,
    pub background_color: Option<String>,
    pub background_image_url: Option<String>,
    pub background_wheel_image_url: Option<String>,
    pub name_spacing: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            style: ThemeStyle::Dark,
            font: "Belgan Aesthetic".to_string(),
            font_name: "Belgan Aesthetic".to_string(),
            background_color: None,
            background_image_url: None,
            background_wheel_image_url: None,
            name_spacing: false,
        }
    }
}

/// Optional outputs that stay off unless asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFeatures {
    /// List detected patterns in the legend slot.
    pub pattern_legend: bool,
    /// Fill the lunar phase slots with computed crescent values.
    pub lunar_phase: bool,
}

fn check_houses(subject: &Subject) -> Result<()> {
    if subject.houses.len() != 12 {
        return Err(ChartError::validation(format!(
            "expected 12 house cusps for '{}', got {}",
            subject.name,
            subject.houses.len()
        )));
    }
    Ok(())
}

/// Everything one render reads. Built once and never changed afterwards.
#[derive(Debug, Clone)]
pub struct ChartContext<'a> {
    variant: ChartVariant,
    primary: Subject,
    secondary: Option<Subject>,
    settings: &'a ChartSettings,
    appearance: Appearance,
    features: RenderFeatures,
}

impl<'a> ChartContext<'a> {
    /// Build a context after checking the settings and both subjects.
    pub fn new(
        variant: ChartVariant,
        primary: Subject,
        secondary: Option<Subject>,
        settings: &'a ChartSettings,
        appearance: Appearance,
    ) -> Result<Self> {
        if variant.is_dual() && secondary.is_none() {
            return Err(ChartError::configuration(format!(
                "a second subject is required for {} charts",
                variant
            )));
        }
        settings.validate()?;
        check_houses(&primary)?;
        if let Some(secondary) = &secondary {
            check_houses(secondary)?;
        }
        Ok(Self {
            variant,
            primary,
            secondary,
            settings,
            appearance,
            features: RenderFeatures::default(),
        })
    }

    /// Replace the optional render features.
    pub fn with_features(mut self, features: RenderFeatures) -> Self {
        self.features = features;
        self
    }

    /// Chart kind being drawn.
    pub fn variant(&self) -> ChartVariant {
        self.variant
    }

    /// Subject whose houses and rotation define the wheel.
    pub fn primary(&self) -> &Subject {
        &self.primary
    }

    /// Partner or transit subject, present on dual charts.
    pub fn secondary(&self) -> Option<&Subject> {
        self.secondary.as_ref()
    }

    /// Second subject of a dual chart.
    pub fn require_secondary(&self) -> Result<&Subject> {
        self.secondary.as_ref().ok_or_else(|| {
            ChartError::configuration(format!(
                "a second subject is required for {} charts",
                self.variant
            ))
        })
    }

    pub fn settings(&self) -> &'a ChartSettings {
        self.settings
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn features(&self) -> RenderFeatures {
        self.features
    }

    /// Ring insets for the chart kind.
    pub fn radii(&self) -> RadiusSet {
        self.variant.radii()
    }

    /// Angle subtracted from every longitude so the descendant lands on the
    /// left edge of the wheel.
    pub fn rotation(&self) -> f64 {
        self.primary.descendant()
    }

    /// Extra header spacing, requested explicitly or needed because the name
    /// has descenders.
    pub fn name_spacing(&self) -> bool {
        self.appearance.name_spacing
            || self
                .primary
                .name
                .chars()
                .any(|c| matches!(c, 'j' | 'q' | 'g' | 'p'))
    }
}
