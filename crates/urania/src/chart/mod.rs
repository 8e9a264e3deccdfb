pub mod assembler;
pub mod context;
pub mod data;
pub mod format;
pub mod settings;

pub use assembler::ChartAssembler;
pub use context::{Appearance, ChartContext, ChartVariant, RadiusSet, RenderFeatures, WHEEL_RADIUS};
pub use data::{BodyPosition, CelestialBody, House, Subject, SubjectData};
pub use settings::{
    default_aspects, CelestialPointSetting, ChartColors, ChartLayoutSettings, ChartSettings,
    LanguageSettings, ThemeStyle,
};
