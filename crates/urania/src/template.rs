//! `$name` placeholder templates and the final SVG render step.

use log::{debug, info};
use regex::Regex;

use crate::chart::{ChartAssembler, ChartContext};
use crate::error::{Result, TemplateError};
use crate::rendering::FragmentMap;

/// Chart template shipped with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/chart.xml");

lazy_static::lazy_static! {
    // `$$`, `$name`, `${name}`; a `$` followed by anything else is invalid
    static ref PLACEHOLDER: Regex = Regex::new(
        r"\$(?:(\$)|([A-Za-z_][A-Za-z0-9_]*)|\{([A-Za-z_][A-Za-z0-9_]*)\}|)"
    )
    .expect("placeholder pattern is a valid literal");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed document template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> std::result::Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            literal.push_str(&text[last..whole.start()]);
            last = whole.end();

            if caps.get(1).is_some() {
                literal.push('$');
            } else if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.as_str().to_string()));
            } else {
                return Err(TemplateError::InvalidPlaceholder {
                    offset: whole.start(),
                });
            }
        }
        literal.push_str(&text[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// The template shipped with the crate.
    pub fn bundled() -> std::result::Result<Self, TemplateError> {
        Self::parse(DEFAULT_TEMPLATE)
    }

    /// Placeholder names in document order, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Merge slot values into the template. Every placeholder must have a slot.
    pub fn substitute(&self, slots: &FragmentMap) -> std::result::Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = slots
                        .get(name)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder { name: name.clone() })?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

/// Replace every double quote with a single quote.
pub fn normalize_quotes(document: &str) -> String {
    document.replace('"', "'")
}

/// Assemble, substitute and normalize one chart document.
pub fn render_svg(ctx: &ChartContext<'_>, template: &Template) -> Result<String> {
    let slots = ChartAssembler::new(ctx).assemble()?;
    slots.check_required()?;
    debug!(
        "Template slots: {}",
        slots.slot_names().collect::<Vec<_>>().join(", ")
    );
    let document = template.substitute(&slots)?;
    info!(
        "Rendered {:?} chart for {} ({} bytes)",
        ctx.variant(),
        ctx.primary().name,
        document.len()
    );
    Ok(normalize_quotes(&document))
}
