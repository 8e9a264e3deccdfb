use crate::chart::context::{ChartContext, WHEEL_RADIUS};
use crate::geometry::{label_rotation, normalize_degrees, place, Point, SLICES};
use crate::rendering::{fmt_num, FragmentMap, PathCommand, Shape, Style, Transform};
use crate::western::sign_name;

use super::{key, ring_point};

/// Ticks on the degree ring, one every two degrees.
const DEGREE_TICKS: usize = 180;

/// Radius used for the dash pattern of the natal sign ring.
const DASH_RING_RADIUS: f64 = 194.0;

pub(super) fn assemble(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    circles(ctx, slots);
    if ctx.variant().is_dual() {
        transit_ring(ctx, slots);
        transit_degree_ring(ctx, slots);
    } else {
        slots.open("transitRing");
        natal_degree_ring(ctx, slots);
    }
    zodiac(ctx, slots);
}

fn circle_attrs(radius: f64) -> String {
    let r = fmt_num(WHEEL_RADIUS);
    format!(r#"cx="{r}" cy="{r}" r="{}""#, fmt_num(radius))
}

fn circles(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let colors = &ctx.settings().colors;
    let radii = ctx.radii();
    let r = WHEEL_RADIUS;
    let wheel_image = ctx.appearance().background_wheel_image_url.is_some();

    if ctx.variant().is_dual() {
        slots.set("c1", circle_attrs(r - 36.0));
        slots.set(
            "c1style",
            Style::new()
                .fill("none")
                .stroke(&colors.zodiac_transit_ring_2)
                .stroke_width("1px")
                .stroke_opacity(".4"),
        );
        slots.set("c2", circle_attrs(r - radii.c2));
        slots.set(
            "c2style",
            Style::new()
                .fill("none")
                .stroke(&colors.zodiac_transit_ring_1)
                .stroke_width("1px")
                .stroke_opacity(".4"),
        );
        slots.set("c3", circle_attrs(r - 160.0));
    } else {
        let perimeter = 2.0 * 3.1416 * DASH_RING_RADIUS;
        let segment = perimeter / SLICES as f64;
        let separation = segment * 5.0 / 100.0;
        let offset = normalize_degrees(360.0 - ctx.rotation());
        slots.set("c1", circle_attrs(r - 46.0));
        slots.set(
            "c1style",
            Style::new()
                .fill("none")
                .stroke(&colors.zodiac_radix_ring_2)
                .stroke_width("3px")
                .with(
                    "stroke-dasharray",
                    format!("{} {}", fmt_num(segment - separation), fmt_num(separation)),
                )
                .with(
                    "stroke-dashoffset",
                    fmt_num(perimeter / 360.0 * offset - 5.0),
                ),
        );
        slots.set("c2", circle_attrs(r - radii.c2));
        slots.set(
            "c2style",
            Style::new()
                .fill(&colors.paper_1)
                .fill_opacity("0")
                .stroke(&colors.zodiac_radix_ring_1)
                .stroke_opacity(".4")
                .stroke_width("1px"),
        );
        slots.set("c3", circle_attrs(r - radii.c3));
    }

    let c3style = if wheel_image {
        Style::new()
            .fill("url(#image)")
            .fill_opacity("1")
            .stroke(&colors.zodiac_radix_ring_0)
            .stroke_width("1px")
    } else {
        let stroke = if ctx.variant().is_dual() {
            &colors.zodiac_transit_ring_0
        } else {
            &colors.zodiac_radix_ring_0
        };
        Style::new()
            .fill(&colors.paper_1)
            .fill_opacity("1")
            .stroke(stroke)
            .stroke_width("1px")
    };
    slots.set("c3style", c3style);
}

fn transit_ring(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let colors = &ctx.settings().colors;
    let center = Point::new(WHEEL_RADIUS, WHEEL_RADIUS);
    slots.push(
        "transitRing",
        "band",
        &[Shape::Circle {
            center,
            radius: WHEEL_RADIUS - 18.0,
            fill: None,
            style: Style::new()
                .fill("none")
                .stroke(&colors.paper_1)
                .stroke_width("36px")
                .stroke_opacity(".4"),
        }],
    );
    slots.push(
        "transitRing",
        "edge",
        &[Shape::Circle {
            center,
            radius: WHEEL_RADIUS,
            fill: None,
            style: Style::new()
                .fill("none")
                .stroke(&colors.zodiac_transit_ring_3)
                .stroke_width("1px")
                .stroke_opacity(".6"),
        }],
    );
}

fn tick_angle(ctx: &ChartContext<'_>, tick: usize) -> f64 {
    normalize_degrees(tick as f64 * 2.0 - ctx.rotation())
}

fn natal_degree_ring(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let c1 = ctx.radii().c1;
    let style = Style::new()
        .stroke(&ctx.settings().colors.paper_0)
        .stroke_width("1px")
        .stroke_opacity("1");

    for tick in 0..DEGREE_TICKS {
        let angle = tick_angle(ctx, tick);
        // two short ticks, 25 and 10 units inside the sign ring
        let shapes: Vec<Shape> = [25.0, 10.0]
            .iter()
            .map(|depth| {
                let inset = c1 + depth;
                Shape::line(
                    ring_point(inset + 4.0, angle),
                    ring_point(inset - 4.0, angle),
                    style.clone(),
                )
            })
            .collect();
        slots.push("degreeRing", format!("tick_{:03}", tick), &shapes);
    }
}

fn transit_degree_ring(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let style = Style::new()
        .stroke("#F00")
        .stroke_width("1px")
        .stroke_opacity(".9");

    for tick in 0..DEGREE_TICKS {
        let angle = tick_angle(ctx, tick);
        let line = Shape::line(ring_point(0.0, angle), ring_point(-2.0, angle), style.clone());
        slots.push("degreeRing", format!("tick_{:03}", tick), &[line]);
    }
}

fn zodiac(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let colors = &ctx.settings().colors;
    let r = WHEEL_RADIUS;
    let offset = 360.0 - ctx.rotation();
    let dual = ctx.variant().is_dual();
    let slice_dropin = if dual { 0.0 } else { ctx.radii().c1 };
    let glyph_dropin = if dual { 54.0 } else { ctx.radii().c1 - 30.0 };

    for sign in 0..SLICES {
        let index = sign as usize;
        let start = place(sign, r - slice_dropin, offset).offset(slice_dropin);
        let end = place(sign + 1, r - slice_dropin, offset).offset(slice_dropin);
        let slice = Shape::Path {
            commands: vec![
                PathCommand::MoveTo(Point::new(r, r)),
                PathCommand::LineTo(start),
                PathCommand::ArcTo {
                    radius: r - slice_dropin,
                    to: end,
                },
                PathCommand::Close,
            ],
            style: Style::new().fill(&colors.zodiac_bg[index]).fill_opacity("0"),
        };

        let anchor = place(sign, r - glyph_dropin, offset + 15.0).offset(glyph_dropin);
        let glyph = Shape::group(
            vec![
                Transform::Rotate {
                    angle: label_rotation(anchor, r),
                    pivot: anchor,
                },
                Transform::Translate(anchor.x, anchor.y),
                Transform::Scale(0.6),
                Transform::Translate(-16.0, -16.0),
            ],
            vec![Shape::use_symbol(sign_name(index), None, vec![])],
        );

        slots.push("makeZodiac", key("sign", index), &[slice, glyph]);
    }
}
