use crate::chart::context::{ChartContext, ChartVariant, WHEEL_RADIUS};
use crate::chart::data::Subject;
use crate::error::Result;
use crate::geometry::{degree_diff, label_rotation, normalize_degrees, Point};
use crate::rendering::{FragmentMap, Shape, Style, TextAnchor, Transform};

use super::{key, ring_point};

/// Colour of the cusp line of house `index` (0-11). The four angles take the
/// colour of their catalog point.
fn cusp_color<'s>(ctx: &'s ChartContext<'_>, index: usize, fallback: &'s str) -> &'s str {
    let angle = match index {
        0 => "Asc",
        9 => "Mc",
        6 => "Dsc",
        3 => "Ic",
        _ => return fallback,
    };
    ctx.settings()
        .point(angle)
        .map(|p| p.color.as_str())
        .unwrap_or(fallback)
}

/// Angle halfway between cusp `index` and the next one.
fn midpoint_offset(subject: &Subject, index: usize, offset: f64) -> f64 {
    let current = subject.houses[index].cusp;
    let next = subject.houses[(index + 1) % subject.houses.len()].cusp;
    offset + degree_diff(next, current) / 2.0
}

pub(super) fn assemble(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    primary_cusps(ctx, slots);
    if ctx.variant().is_dual() {
        secondary_cusps(ctx, ctx.require_secondary()?, slots);
    }
    Ok(())
}

fn primary_cusps(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let primary = ctx.primary();
    let colors = &ctx.settings().colors;
    let radii = ctx.radii();
    let rotation = ctx.rotation();
    let dual = ctx.variant().is_dual();

    let (line_from, line_to) = if dual {
        (160.0, 72.0)
    } else {
        (radii.c1, radii.c3)
    };
    let label_dropin = if dual { radii.c1 + 10.0 } else { radii.c1 + 17.0 };

    for (i, house) in primary.houses.iter().enumerate() {
        let offset = house.cusp - rotation;
        let style = Style::new()
            .stroke(cusp_color(ctx, i, &colors.houses_radix_line))
            .stroke_width("2px")
            .with("stroke-dasharray", "3,2")
            .stroke_opacity("1");
        let line = Shape::line(
            ring_point(line_from, offset),
            ring_point(line_to, offset),
            style,
        );
        slots.push("makeHouses", key("cusp", i + 1), &[line]);

        let text_offset = midpoint_offset(primary, i, offset);
        let marker = Shape::Circle {
            center: ring_point(label_dropin, text_offset),
            radius: 6.0,
            fill: Some("#fff".to_string()),
            style: Style::new(),
        };
        slots.push("makeHouses", key("marker", i + 1), &[marker]);

        let anchor = ring_point(label_dropin + 1.0, text_offset);
        let label = Shape::Text {
            position: Some(anchor),
            content: (i + 1).to_string(),
            style: Style::new()
                .fill(&colors.paper_1)
                .fill_opacity("1")
                .font_size("8px"),
            anchor: Some(TextAnchor::Middle),
            centered_baseline: true,
            transform: vec![Transform::Rotate {
                angle: label_rotation(anchor, WHEEL_RADIUS),
                pivot: anchor,
            }],
        };
        slots.push("makeHouses", key("label", i + 1), &[label]);
    }
}

fn secondary_cusps(ctx: &ChartContext<'_>, secondary: &Subject, slots: &mut FragmentMap) {
    let colors = &ctx.settings().colors;
    let rotation = ctx.rotation();
    let number_style = match ctx.variant() {
        ChartVariant::Synastry => Style::new().fill("#0f0").fill_opacity(".4").font_size("14px"),
        _ => Style::new().fill("#00f").fill_opacity("0").font_size("14px"),
    };

    for (i, house) in secondary.houses.iter().enumerate() {
        let offset = normalize_degrees(360.0 - rotation + house.cusp);
        let line = Shape::line(
            ring_point(36.0, offset),
            ring_point(0.0, offset),
            Style::new()
                .stroke(cusp_color(ctx, i, &colors.houses_transit_line))
                .stroke_width("2px")
                .stroke_opacity("1"),
        );
        slots.push("makeHouses", key("transit_cusp", i + 1), &[line]);

        let text_offset = midpoint_offset(secondary, i, offset);
        let Point { x, y } = ring_point(8.0, text_offset);
        let number = Shape::text(
            Some(Point::new(x - 3.0, y + 3.0)),
            (i + 1).to_string(),
            number_style.clone(),
        );
        slots.push("makeHouses", key("transit_label", i + 1), &[number]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::assembler::test_support::{natal_context, settings, transit_context};

    #[test]
    fn test_natal_houses_are_numbered() {
        let settings = settings();
        let ctx = natal_context(&settings);
        let mut slots = FragmentMap::new();
        assemble(&ctx, &mut slots).unwrap();

        let labels: Vec<_> = slots
            .fragments("makeHouses")
            .iter()
            .filter(|f| f.key.starts_with("label_"))
            .collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].key, "label_01");
        assert!(labels[11].svg.contains(">12</text>"));
    }

    #[test]
    fn test_angle_cusps_use_point_colors() {
        let settings = settings();
        let ctx = natal_context(&settings);
        let asc = settings.point("Asc").map(|p| p.color.clone()).unwrap();
        let mut slots = FragmentMap::new();
        assemble(&ctx, &mut slots).unwrap();

        let first = &slots.fragments("makeHouses")[0];
        assert_eq!(first.key, "cusp_01");
        assert!(first.svg.contains(&format!("stroke: {}", asc)));
    }

    #[test]
    fn test_transit_adds_outer_cusps() {
        let settings = settings();
        let ctx = transit_context(&settings);
        let mut slots = FragmentMap::new();
        assemble(&ctx, &mut slots).unwrap();

        let outer = slots
            .fragments("makeHouses")
            .iter()
            .filter(|f| f.key.starts_with("transit_cusp_"))
            .count();
        assert_eq!(outer, 12);
        assert_eq!(slots.fragments("makeHouses").len(), 12 * 3 + 12 * 2);
    }
}
