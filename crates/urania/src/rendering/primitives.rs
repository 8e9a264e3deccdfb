//! Typed SVG drawing primitives, serialized once per fragment.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Format a coordinate: rounded to 4 decimals, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    let mut text = format!("{:.4}", value);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Escape text coming from subject data before it is placed in markup.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a value placed inside an attribute. Quotes are escaped too since
/// the rendered document has its double quotes turned into single ones.
pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Ordered list of CSS declarations for a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.declarations.push((property.to_string(), value.into()));
        self
    }

    pub fn stroke(self, color: &str) -> Self {
        self.with("stroke", color)
    }

    pub fn stroke_width(self, width: &str) -> Self {
        self.with("stroke-width", width)
    }

    pub fn stroke_opacity(self, opacity: &str) -> Self {
        self.with("stroke-opacity", opacity)
    }

    pub fn fill(self, color: &str) -> Self {
        self.with("fill", color)
    }

    pub fn fill_opacity(self, opacity: &str) -> Self {
        self.with("fill-opacity", opacity)
    }

    pub fn font_size(self, size: &str) -> Self {
        self.with("font-size", size)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .declarations
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{};", joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate(f64, f64),
    Scale(f64),
    /// Angle in degrees around a pivot.
    Rotate { angle: f64, pivot: Point },
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transform::Translate(x, y) => write!(f, "translate({},{})", fmt_num(*x), fmt_num(*y)),
            Transform::Scale(s) => write!(f, "scale({})", fmt_num(*s)),
            Transform::Rotate { angle, pivot } => write!(
                f,
                "rotate({} {} {})",
                fmt_num(*angle),
                fmt_num(pivot.x),
                fmt_num(pivot.y)
            ),
        }
    }
}

fn transform_list(transforms: &[Transform]) -> String {
    transforms
        .iter()
        .map(Transform::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Small counter-clockwise arc of the given radius.
    ArcTo { radius: f64, to: Point },
    Close,
}

/// Shape primitives for chart rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        style: Style,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<String>,
        style: Style,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        style: Style,
    },
    Path {
        commands: Vec<PathCommand>,
        style: Style,
    },
    /// Text content is markup: character entities pass through untouched.
    Text {
        position: Option<Point>,
        content: String,
        style: Style,
        anchor: Option<TextAnchor>,
        centered_baseline: bool,
        transform: Vec<Transform>,
    },
    /// Reference to a symbol in the template defs.
    Use {
        href: String,
        position: Option<Point>,
        transform: Vec<Transform>,
    },
    Group {
        transform: Vec<Transform>,
        children: Vec<Shape>,
    },
}

impl Shape {
    pub fn line(from: Point, to: Point, style: Style) -> Self {
        Shape::Line { from, to, style }
    }

    pub fn text(position: Option<Point>, content: impl Into<String>, style: Style) -> Self {
        Shape::Text {
            position,
            content: content.into(),
            style,
            anchor: None,
            centered_baseline: false,
            transform: Vec::new(),
        }
    }

    pub fn use_symbol(href: &str, position: Option<Point>, transform: Vec<Transform>) -> Self {
        Shape::Use {
            href: href.to_string(),
            position,
            transform,
        }
    }

    pub fn group(transform: Vec<Transform>, children: Vec<Shape>) -> Self {
        Shape::Group {
            transform,
            children,
        }
    }

    /// Set the anchor of a text shape; other shapes are returned unchanged.
    pub fn anchored(mut self, value: TextAnchor) -> Self {
        if let Shape::Text { anchor, .. } = &mut self {
            *anchor = Some(value);
        }
        self
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out);
        out
    }

    pub fn write_svg(&self, out: &mut String) {
        // writing into a String cannot fail
        let _ = self.write_into(out);
    }

    fn write_into(&self, out: &mut String) -> std::fmt::Result {
        match self {
            Shape::Line { from, to, style } => write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="{}"/>"#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
                style
            ),
            Shape::Circle {
                center,
                radius,
                fill,
                style,
            } => {
                write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(*radius)
                )?;
                if let Some(fill) = fill {
                    write!(out, r#" fill="{}""#, fill)?;
                }
                if !style.is_empty() {
                    write!(out, r#" style="{}""#, style)?;
                }
                out.write_str("/>")
            }
            Shape::Rect {
                origin,
                width,
                height,
                style,
            } => write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" style="{}"/>"#,
                fmt_num(origin.x),
                fmt_num(origin.y),
                fmt_num(*width),
                fmt_num(*height),
                style
            ),
            Shape::Path { commands, style } => {
                out.write_str(r#"<path d=""#)?;
                let parts: Vec<String> = commands
                    .iter()
                    .map(|command| match command {
                        PathCommand::MoveTo(p) => format!("M{},{}", fmt_num(p.x), fmt_num(p.y)),
                        PathCommand::LineTo(p) => format!("L{},{}", fmt_num(p.x), fmt_num(p.y)),
                        PathCommand::ArcTo { radius, to } => format!(
                            "A{r},{r} 0 0,0 {},{}",
                            fmt_num(to.x),
                            fmt_num(to.y),
                            r = fmt_num(*radius)
                        ),
                        PathCommand::Close => "z".to_string(),
                    })
                    .collect();
                write!(out, r#"{}" style="{}"/>"#, parts.join(" "), style)
            }
            Shape::Text {
                position,
                content,
                style,
                anchor,
                centered_baseline,
                transform,
            } => {
                out.write_str("<text")?;
                if !transform.is_empty() {
                    write!(out, r#" transform="{}""#, transform_list(transform))?;
                }
                if let Some(anchor) = anchor {
                    write!(out, r#" text-anchor="{}""#, anchor.as_str())?;
                }
                if let Some(p) = position {
                    write!(out, r#" x="{}" y="{}""#, fmt_num(p.x), fmt_num(p.y))?;
                }
                if *centered_baseline {
                    out.write_str(r#" dominant-baseline="middle""#)?;
                }
                write!(out, r#" style="{}">{}</text>"#, style, content)
            }
            Shape::Use {
                href,
                position,
                transform,
            } => {
                out.write_str("<use")?;
                if !transform.is_empty() {
                    write!(out, r#" transform="{}""#, transform_list(transform))?;
                }
                if let Some(p) = position {
                    write!(out, r#" x="{}" y="{}""#, fmt_num(p.x), fmt_num(p.y))?;
                }
                write!(out, r##" xlink:href="#{}"/>"##, href)
            }
            Shape::Group {
                transform,
                children,
            } => {
                out.write_str("<g")?;
                if !transform.is_empty() {
                    write!(out, r#" transform="{}""#, transform_list(transform))?;
                }
                out.write_str(">")?;
                for child in children {
                    child.write_into(out)?;
                }
                out.write_str("</g>")
            }
        }
    }
}

/// Serialize a run of shapes back to back.
pub fn shapes_to_svg(shapes: &[Shape]) -> String {
    let mut out = String::new();
    for shape in shapes {
        shape.write_svg(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_covers_quotes() {
        assert_eq!(
            escape_attr("bg.png?a=1&b='x'\""),
            "bg.png?a=1&amp;b=&apos;x&apos;&quot;"
        );
        assert_eq!(escape_text("O'Brien"), "O'Brien");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(240.0), "240");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(0.123456), "0.1235");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn test_line_svg() {
        let line = Shape::line(
            Point::new(1.0, 2.0),
            Point::new(3.5, 4.0),
            Style::new().stroke("#fff").stroke_width("0.7"),
        );
        assert_eq!(
            line.to_svg(),
            r#"<line x1="1" y1="2" x2="3.5" y2="4" style="stroke: #fff; stroke-width: 0.7;"/>"#
        );
    }

    #[test]
    fn test_nested_group() {
        let group = Shape::group(
            vec![Transform::Translate(-7.2, -7.2)],
            vec![Shape::group(
                vec![Transform::Scale(0.6)],
                vec![Shape::use_symbol("Sun", Some(Point::new(10.0, 20.0)), vec![])],
            )],
        );
        assert_eq!(
            group.to_svg(),
            r##"<g transform="translate(-7.2,-7.2)"><g transform="scale(0.6)"><use x="10" y="20" xlink:href="#Sun"/></g></g>"##
        );
    }

    #[test]
    fn test_path_svg() {
        let path = Shape::Path {
            commands: vec![
                PathCommand::MoveTo(Point::new(240.0, 240.0)),
                PathCommand::LineTo(Point::new(0.0, 240.0)),
                PathCommand::ArcTo {
                    radius: 240.0,
                    to: Point::new(240.0, 480.0),
                },
                PathCommand::Close,
            ],
            style: Style::new().fill("#482900").fill_opacity("0"),
        };
        assert_eq!(
            path.to_svg(),
            r#"<path d="M240,240 L0,240 A240,240 0 0,0 240,480 z" style="fill: #482900; fill-opacity: 0;"/>"#
        );
    }

    #[test]
    fn test_text_keeps_entities() {
        let text = Shape::text(None, "12&#176;", Style::new().font_size("10px"))
            .anchored(TextAnchor::End);
        assert_eq!(
            text.to_svg(),
            r#"<text text-anchor="end" style="font-size: 10px;">12&#176;</text>"#
        );
        assert_eq!(escape_text("A & B <x>"), "A &amp; B &lt;x&gt;");
    }
}
