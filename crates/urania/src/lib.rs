//! Horoscope wheel rendering: circular placement, aspect and pattern
//! detection, and assembly of the chart SVG from a slot template.

pub mod aspects;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod lunar;
pub mod patterns;
pub mod rendering;
pub mod template;
pub mod western;

pub use chart::{
    Appearance, ChartAssembler, ChartContext, ChartSettings, ChartVariant, RenderFeatures,
    Subject, SubjectData, ThemeStyle,
};
pub use error::{ChartError, Result, TemplateError};
pub use template::{render_svg, Template};
