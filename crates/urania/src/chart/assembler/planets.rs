use log::debug;

use crate::chart::context::ChartContext;
use crate::chart::data::Subject;
use crate::error::Result;
use crate::geometry::{deconflict_labels, LabelPosition, Point};
use crate::patterns::is_derived_point;
use crate::rendering::{FragmentMap, Shape, Style, Transform};
use crate::western::ElementTally;

use super::ring_point;

/// Inset of primary glyphs and the outer end of their pointer.
const GLYPH_INSET: f64 = 101.0;
const POINTER_OUTER: f64 = 113.5;
/// Inset of secondary glyphs on the transit band.
const TRANSIT_GLYPH_INSET: f64 = 18.0;
const GLYPH_SCALE: f64 = 0.6;

pub(super) fn assemble(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    primary_glyphs(ctx, slots);
    if ctx.variant().is_dual() {
        secondary_glyphs(ctx, ctx.require_secondary()?, slots);
    }
    elements(ctx, slots);
    Ok(())
}

/// Display degrees of the active bodies after label deconfliction, keyed by
/// body id.
fn label_positions(subject: &Subject) -> Vec<LabelPosition> {
    let labels: Vec<LabelPosition> = subject
        .active_bodies()
        .map(|(id, body)| LabelPosition::new(id, body.longitude))
        .collect();
    deconflict_labels(&labels)
}

fn glyph(name: &str, at: Point) -> Shape {
    Shape::group(
        vec![Transform::Translate(-12.0 * GLYPH_SCALE, -12.0 * GLYPH_SCALE)],
        vec![Shape::group(
            vec![Transform::Scale(GLYPH_SCALE)],
            vec![Shape::use_symbol(
                name,
                Some(Point::new(at.x / GLYPH_SCALE, at.y / GLYPH_SCALE)),
                vec![],
            )],
        )],
    )
}

fn primary_glyphs(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let primary = ctx.primary();
    let rotation = ctx.rotation();
    let c3 = ctx.radii().c3;
    let pointer = Style::new()
        .stroke(&ctx.settings().colors.paper_0)
        .stroke_width("1px")
        .stroke_opacity("1");

    for label in label_positions(primary) {
        let body = &primary.bodies[label.body_id];
        if (label.degree - body.longitude).abs() > f64::EPSILON {
            debug!(
                "Moved {} label from {:.2} to {:.2}",
                body.name, body.longitude, label.degree
            );
        }
        let at = ring_point(GLYPH_INSET, label.degree - rotation);
        let true_angle = body.longitude - rotation;
        let line = Shape::line(
            ring_point(c3, true_angle),
            ring_point(POINTER_OUTER, true_angle),
            pointer.clone(),
        );
        slots.push(
            "makePlanets",
            format!("planet_{:02}", body.id),
            &[glyph(&body.name, at), line],
        );
    }
}

fn secondary_glyphs(ctx: &ChartContext<'_>, secondary: &Subject, slots: &mut FragmentMap) {
    let rotation = ctx.rotation();
    let pointer = Style::new()
        .stroke(&ctx.settings().colors.paper_0)
        .stroke_width("1px")
        .stroke_opacity("1");

    for label in label_positions(secondary) {
        let body = &secondary.bodies[label.body_id];
        let at = ring_point(TRANSIT_GLYPH_INSET, label.degree - rotation);
        let true_angle = body.longitude - rotation;
        let line = Shape::line(
            ring_point(0.0, true_angle),
            ring_point(6.0, true_angle),
            pointer.clone(),
        );
        slots.push(
            "makePlanets",
            format!("transit_planet_{:02}", body.id),
            &[glyph(&body.name, at), line],
        );
    }
}

fn elements(ctx: &ChartContext<'_>, slots: &mut FragmentMap) {
    let settings = ctx.settings();
    let language = &settings.language;

    let mut tally = ElementTally::new();
    for (_, body) in ctx.primary().active_bodies() {
        if is_derived_point(&body.name) {
            continue;
        }
        tally.add_body(
            body.sign,
            body.element_points,
            &body.related_signs,
            settings.rulership_bonus,
        );
    }
    let shares = tally.percentages();
    debug!(
        "Element shares: fire {}% earth {}% air {}% water {}%",
        shares.fire, shares.earth, shares.air, shares.water
    );

    let rows = [
        ("#ff6600", format!("{}  {}%", language.fire, shares.fire)),
        ("#6a2d04", format!("{} {}%", language.earth, shares.earth)),
        ("#6f76d1", format!("{}   {}%", language.air, shares.air)),
        ("#630e73", format!("{} {}%", language.water, shares.water)),
    ];
    let texts = rows
        .into_iter()
        .enumerate()
        .map(|(i, (color, content))| {
            Shape::text(
                Some(Point::new(0.0, 12.0 * i as f64)),
                content,
                Style::new().fill(color),
            )
        })
        .collect();
    slots.push(
        "makeElements",
        "elements",
        &[Shape::group(vec![Transform::Translate(-30.0, 79.0)], texts)],
    );
}
