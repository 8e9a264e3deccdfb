use chrono::Datelike;
use log::debug;

use crate::chart::context::{ChartContext, ChartVariant};
use crate::chart::format::{
    format_datetime, format_datetime_short, format_latitude, format_longitude, shorten_location,
};
use crate::error::Result;
use crate::geometry::Point;
use crate::lunar::LunarPhase;
use crate::patterns::Pattern;
use crate::rendering::{escape_attr, escape_text, fmt_num, FragmentMap, Shape, Style, Transform};

/// Width of the A4 page in points.
const CHART_WIDTH: &str = "650.4245745";

/// Detected patterns, one text row with its participant glyphs each.
pub(super) fn patterns(ctx: &ChartContext<'_>, patterns: &[Pattern], slots: &mut FragmentMap) {
    slots.open("makePatterns");
    if !ctx.features().pattern_legend {
        debug!("Pattern legend disabled, {} patterns not listed", patterns.len());
        return;
    }

    let primary = ctx.primary();
    let style = Style::new()
        .fill(&ctx.settings().colors.paper_0)
        .font_size("10px");
    for (row, pattern) in patterns.iter().enumerate() {
        let y = 14.0 * row as f64;
        let mut items = vec![Shape::text(
            Some(Point::new(0.0, y)),
            pattern.kind.label(),
            style.clone(),
        )];
        for (k, &body) in pattern.bodies.iter().enumerate() {
            items.push(Shape::group(
                vec![Transform::Translate(20.0 + 10.0 * k as f64, y)],
                vec![Shape::use_symbol(
                    &primary.bodies[body].name,
                    Some(Point::new(0.0, -20.0)),
                    vec![Transform::Scale(0.4)],
                )],
            ));
        }
        slots.push(
            "makePatterns",
            format!("pattern_{:02}", row),
            &[Shape::group(vec![Transform::Translate(-30.0, 380.0)], items)],
        );
    }
}

/// Header strings, theme colours, background and lunar phase slots.
pub(super) fn assemble(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    page(ctx, slots);
    header(ctx, slots);
    palette(ctx, slots);
    lunar_phase(ctx, slots)
}

fn page(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let settings = ctx.settings();
    let appearance = ctx.appearance();

    let viewbox = if ctx.variant().is_dual() {
        &settings.chart.wide_chart_viewbox
    } else {
        &settings.chart.basic_chart_viewbox
    };
    slots.set("viewbox", viewbox);
    slots.set("chart_width", CHART_WIDTH);
    slots.set("svgWidth", "100%");
    slots.set("svgHeight", "100%");
    slots.set("circleX", "0");
    slots.set("circleY", "0");
    slots.set("cfgZoom", "1");
    slots.set("cfgRotate", "0");
    slots.set("cfgTranslate", "0");
    slots.set("font", &appearance.font);
    slots.set("font_name", &appearance.font_name);

    let bg_image = match &appearance.background_image_url {
        Some(url) => format!(
            r#"<image x="0" y="0" width="{}" height="100%" xlink:href="{}" preserveAspectRatio="none"/>"#,
            CHART_WIDTH,
            escape_attr(url)
        ),
        None => "<symbol></symbol>".to_string(),
    };
    slots.set("bg_image", bg_image);

    let wheel_pattern = match &appearance.background_wheel_image_url {
        Some(url) => format!(
            r#"<defs><pattern id="image" x="0" y="0" width="100%" height="100%" patternContentUnits="objectBoundingBox"><image xlink:href="{}" width="1" height="1" preserveAspectRatio="xMidYMid slice"/></pattern></defs>"#,
            escape_attr(url)
        ),
        None => String::new(),
    };
    slots.set("bg_image_wheel", wheel_pattern);

    for corner in ["bottomLeft1", "bottomLeft2", "bottomLeft3", "bottomLeft4"] {
        slots.set(corner, "");
    }
}

fn header(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let language = &ctx.settings().language;
    let primary = ctx.primary();
    let name = escape_text(&primary.name);

    let title = match (ctx.variant(), ctx.secondary()) {
        (ChartVariant::Synastry, Some(partner)) => format!(
            "{} {} {}",
            name,
            language.and_word,
            escape_text(&partner.name)
        ),
        (ChartVariant::Transit, Some(transit)) => format!(
            "{} {}/{}/{}",
            language.transits,
            transit.datetime.day(),
            transit.datetime.month(),
            transit.datetime.year()
        ),
        _ => name,
    };
    slots.set("stringTitle", title);
    slots.set("stringName", "");

    let date_y = if ctx.name_spacing() { 90 } else { 80 };
    slots.set("ystringDateTime", date_y);
    slots.set("ystringLocation", date_y + 20);
    slots.set("ystringLat", date_y + 40);
    slots.set("ystringLon", date_y + 60);

    slots.set("stringLocation", escape_text(&shorten_location(&primary.city)));
    slots.set("stringDateTime", format_datetime(&primary.datetime));

    match (ctx.variant(), ctx.secondary()) {
        (ChartVariant::Synastry, Some(partner)) => {
            slots.set("stringLat", format!("{}: ", escape_text(&partner.name)));
            slots.set("stringLon", escape_text(&partner.city));
            slots.set("stringPosition", format_datetime_short(&partner.datetime));
        }
        _ => {
            slots.set(
                "stringLat",
                format_latitude(primary.lat, &language.north, &language.south),
            );
            slots.set(
                "stringLon",
                format_longitude(primary.lng, &language.east, &language.west),
            );
            slots.set(
                "stringPosition",
                format!("{}: {}", language.chart_type, ctx.variant()),
            );
        }
    }
}

fn palette(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let settings = ctx.settings();
    let colors = &settings.colors;

    slots.set("paper_color_0", &colors.paper_0);
    let paper_1 = ctx
        .appearance()
        .background_color
        .as_deref()
        .unwrap_or(colors.paper_1.as_str());
    slots.set("paper_color_1", paper_1);

    for point in &settings.celestial_points {
        slots.set(&format!("planets_color_{}", point.id), &point.color);
    }
    for (i, color) in colors.zodiac_icon.iter().enumerate() {
        slots.set(&format!("zodiac_color_{}", i), color);
    }
    for aspect in &settings.aspects {
        slots.set(&format!("orb_color_{}", aspect.degree), &aspect.color);
    }
}

fn lunar_phase(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    let colors = &ctx.settings().colors;
    let primary = ctx.primary();
    // always computed so a bad angle is reported even when the icon is static
    let phase = LunarPhase::from_separation(
        primary.lunar_phase_degrees,
        [colors.lunar_phase_0.as_str(), colors.lunar_phase_1.as_str()],
    )?;

    if ctx.features().lunar_phase {
        slots.set("lunar_phase_fg", &phase.foreground);
        slots.set("lunar_phase_bg", &phase.background);
        slots.set("lunar_phase_cx", fmt_num(phase.center_offset));
        slots.set("lunar_phase_r", fmt_num(phase.radius));
        slots.set("lunar_phase_outline", &colors.paper_0);
        slots.set("lunar_phase_rotate", fmt_num(-90.0 - primary.lat));
    } else {
        slots.set("lunar_phase_fg", "");
        slots.set("lunar_phase_bg", "#1d2c56");
        slots.set("lunar_phase_cx", "");
        slots.set("lunar_phase_r", "");
        slots.set("lunar_phase_outline", "");
        slots.set("lunar_phase_rotate", "");
    }
    Ok(())
}
