//! Aspect lines on the wheel plus the tabular legends around it.

use crate::aspects::AspectInstance;
use crate::chart::context::{ChartContext, ChartVariant, WHEEL_RADIUS};
use crate::chart::data::Subject;
use crate::chart::format::format_degrees;
use crate::error::Result;
use crate::geometry::Point;
use crate::rendering::{FragmentMap, Shape, Style, TextAnchor, Transform};
use crate::western::sign_name;

use super::ring_point;

const GRID_BOX: f64 = 14.0;
const ROW_HEIGHT: f64 = 14.0;
/// Rows per column of the planet grid before it wraps.
const PLANET_GRID_ROWS: usize = 27;
/// Rows per column of the transit aspect list.
const ASPECT_LIST_ROWS: usize = 12;
/// Above this many entries the last aspect list column is shifted up.
const ASPECT_LIST_SHIFT_AFTER: usize = 60;

fn aspect_color<'s>(ctx: &'s ChartContext<'_>, degree: u16) -> &'s str {
    ctx.settings()
        .aspect(degree)
        .map(|a| a.color.as_str())
        .unwrap_or("#000")
}

fn aspect_key(aspect: &AspectInstance) -> String {
    format!("aspect_{:02}_{:02}_{}", aspect.p1, aspect.p2, aspect.aspect)
}

fn aspect_line(ctx: &ChartContext<'_>, inset: f64, aspect: &AspectInstance) -> Shape {
    let rotation = ctx.rotation();
    Shape::line(
        ring_point(inset, aspect.p1_longitude - rotation),
        ring_point(inset, aspect.p2_longitude - rotation),
        Style::new()
            .stroke(aspect_color(ctx, aspect.aspect))
            .stroke_width("0.7")
            .stroke_opacity("1"),
    )
}

fn legend_text(ctx: &ChartContext<'_>, at: Option<Point>, content: String, size: &str) -> Shape {
    Shape::text(
        at,
        content,
        Style::new()
            .fill(&ctx.settings().colors.paper_0)
            .font_size(size),
    )
}

fn small_glyph(href: &str, translate: (f64, f64), scale: f64) -> Shape {
    Shape::group(
        vec![Transform::Translate(translate.0, translate.1)],
        vec![Shape::use_symbol(href, None, vec![Transform::Scale(scale)])],
    )
}

pub(super) fn natal_aspect_lines(
    ctx: &ChartContext<'_>,
    aspects: &[AspectInstance],
    slots: &mut FragmentMap,
) {
    slots.open("makeAspects");
    let reach = WHEEL_RADIUS - ctx.radii().c3 - 3.6;
    for aspect in aspects {
        let line = aspect_line(ctx, WHEEL_RADIUS - reach, aspect);
        slots.push("makeAspects", aspect_key(aspect), &[line]);
    }
}

/// Cross aspects reach from the inner wheel to the transit band.
pub(super) fn transit_aspect_lines(
    ctx: &ChartContext<'_>,
    aspects: &[AspectInstance],
    slots: &mut FragmentMap,
) {
    slots.open("makeAspects");
    for aspect in aspects {
        let line = aspect_line(ctx, 160.0, aspect);
        slots.push(
            "makeAspects",
            format!("transit_{}", aspect_key(aspect)),
            &[line],
        );
    }
}

/// Nudge that centres each aspect glyph inside its grid cell.
fn glyph_correction(degree: u16) -> (f64, f64) {
    match degree {
        0 => (1.0, -1.0),
        60 => (1.2, -0.5),
        72 => (0.5, -1.5),
        90 => (0.5, -1.0),
        120 => (0.8, -1.0),
        180 => (0.0, -2.0),
        _ => (0.0, 0.0),
    }
}

/// Triangular body-by-body grid of the natal aspects.
pub(super) fn natal_aspect_grid(
    ctx: &ChartContext<'_>,
    aspects: &[AspectInstance],
    slots: &mut FragmentMap,
) {
    slots.open("makeAspectGrid");
    let primary = ctx.primary();
    let cell = Style::new()
        .stroke(&ctx.settings().colors.paper_0)
        .stroke_width("1px")
        .stroke_opacity(".6")
        .fill("none");
    let rect = |x: f64, y: f64| Shape::Rect {
        origin: Point::new(x, y),
        width: GRID_BOX,
        height: GRID_BOX,
        style: cell.clone(),
    };

    let mut x = 380.0;
    let mut y = 750.0;
    for a in (0..primary.bodies.len()).rev() {
        let body = &primary.bodies[a];
        if !body.active {
            continue;
        }
        let mut row = vec![
            rect(x, y),
            Shape::use_symbol(
                &body.name,
                Some(Point::new((x + 2.0) * 2.5, (y + 1.0) * 2.5)),
                vec![Transform::Scale(0.4)],
            ),
        ];
        x += GRID_BOX;
        y -= GRID_BOX;

        let mut cell_x = x;
        let cell_y = y + GRID_BOX;
        for b in (0..a).rev() {
            if !primary.bodies[b].active {
                continue;
            }
            row.push(rect(cell_x, cell_y));
            cell_x += GRID_BOX;
            for aspect in aspects.iter().filter(|asp| asp.involves(a, b)) {
                let (dx, dy) = glyph_correction(aspect.aspect);
                row.push(Shape::use_symbol(
                    &format!("orb{}", aspect.aspect),
                    Some(Point::new(
                        cell_x - GRID_BOX + 1.0 + dx,
                        cell_y + 3.0 + dy,
                    )),
                    vec![],
                ));
            }
        }
        slots.push("makeAspectGrid", format!("row_{:02}", a), &row);
    }
}

/// Column list of cross aspects for dual charts.
pub(super) fn transit_aspect_list(
    ctx: &ChartContext<'_>,
    secondary: &Subject,
    aspects: &[AspectInstance],
    slots: &mut FragmentMap,
) -> Result<()> {
    let primary = ctx.primary();
    let mut rows = vec![legend_text(
        ctx,
        Some(Point::new(0.0, -15.0)),
        format!("{}:", ctx.settings().language.aspects),
        "14px",
    )];

    let mut column = 0.0;
    let mut line = 0.0;
    for (i, aspect) in aspects.iter().enumerate() {
        if i > 0 && i % ASPECT_LIST_ROWS == 0 && i <= 4 * ASPECT_LIST_ROWS {
            column = (i / ASPECT_LIST_ROWS) as f64 * 100.0;
            line = 0.0;
            if i == 4 * ASPECT_LIST_ROWS && aspects.len() > ASPECT_LIST_SHIFT_AFTER {
                line = -((aspects.len() - ASPECT_LIST_SHIFT_AFTER) as f64) * ROW_HEIGHT;
            }
        }

        let first = &primary.bodies[aspect.p1].name;
        let second = &secondary.bodies[aspect.p2].name;
        rows.push(Shape::group(
            vec![Transform::Translate(column, line)],
            vec![
                Shape::use_symbol(first, Some(Point::new(0.0, 3.0)), vec![Transform::Scale(0.4)]),
                Shape::use_symbol(
                    &format!("orb{}", aspect.aspect),
                    Some(Point::new(15.0, 0.0)),
                    vec![],
                ),
                Shape::group(
                    vec![Transform::Translate(30.0, 0.0)],
                    vec![Shape::use_symbol(
                        second,
                        Some(Point::new(0.0, 3.0)),
                        vec![Transform::Scale(0.4)],
                    )],
                ),
                legend_text(
                    ctx,
                    Some(Point::new(45.0, 8.0)),
                    format_degrees(aspect.orbit, 3)?,
                    "10px",
                ),
            ],
        ));
        line += ROW_HEIGHT;
    }

    slots.push(
        "makeAspectGrid",
        "transit_aspects",
        &[Shape::group(vec![Transform::Translate(500.0, 310.0)], rows)],
    );
    Ok(())
}

fn retrograde_glyph(x: f64) -> Shape {
    small_glyph("retrograde", (x, -6.0), 0.5)
}

/// Position table of both subjects.
pub(super) fn planet_grid(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    let settings = ctx.settings();
    let primary = ctx.primary();
    let mut rows = Vec::new();

    let (mut offset, mut li) = (0.0, 10.0);
    for (row, (_, body)) in primary.active_bodies().enumerate() {
        if row == PLANET_GRID_ROWS {
            li = 10.0;
            offset = -120.0;
        }
        let mut items = vec![
            legend_text(
                ctx,
                Some(Point::new(-20.0, 0.0)),
                settings.point_display_name(&body.label).to_string(),
                "10px",
            )
            .anchored(TextAnchor::Start),
            legend_text(
                ctx,
                Some(Point::new(35.0, 0.0)),
                format_degrees(body.position, 3)?,
                "10px",
            )
            .anchored(TextAnchor::Start),
        ];
        if body.retrograde {
            items.push(retrograde_glyph(80.0));
        }
        rows.push(Shape::group(vec![Transform::Translate(offset, li)], items));
        li += ROW_HEIGHT;
    }

    if ctx.variant().is_dual() {
        let secondary = ctx.require_secondary()?;
        let (header_x, header) = match ctx.variant() {
            ChartVariant::Synastry => (
                380.0,
                format!("{} {}:", settings.language.planets_and_house, secondary.name),
            ),
            _ => (320.0, format!("{}:", settings.language.transit_name)),
        };
        rows.push(Shape::group(
            vec![Transform::Translate(header_x, -15.0)],
            vec![legend_text(ctx, None, header, "14px").anchored(TextAnchor::Start)],
        ));

        let (mut offset, mut li) = (250.0, 10.0);
        for (row, (_, body)) in secondary.active_bodies().enumerate() {
            if row == PLANET_GRID_ROWS {
                li = 10.0;
                offset = -120.0;
            }
            let mut items = vec![
                legend_text(
                    ctx,
                    None,
                    settings.point_display_name(&body.label).to_string(),
                    "10px",
                )
                .anchored(TextAnchor::Start),
                small_glyph(&body.name, (5.0, -8.0), 0.4),
                legend_text(
                    ctx,
                    Some(Point::new(19.0, 0.0)),
                    format_degrees(body.position, 3)?,
                    "10px",
                )
                .anchored(TextAnchor::Start),
                small_glyph(sign_name(body.sign), (60.0, -8.0), 0.3),
            ];
            if body.retrograde {
                items.push(retrograde_glyph(74.0));
            }
            rows.push(Shape::group(vec![Transform::Translate(offset, li)], items));
            li += ROW_HEIGHT;
        }
    }

    slots.push(
        "makePlanetGrid",
        "planet_grid",
        &[Shape::group(vec![Transform::Translate(50.0, 550.0)], rows)],
    );
    Ok(())
}

fn house_column(ctx: &ChartContext<'_>, subject: &Subject, x: f64) -> Result<Shape> {
    let cusp_word = &ctx.settings().language.cusp;
    let mut rows = Vec::with_capacity(subject.houses.len());
    for (i, house) in subject.houses.iter().enumerate() {
        let number = if i < 9 {
            format!("&#160;&#160;{}", i + 1)
        } else {
            (i + 1).to_string()
        };
        rows.push(Shape::group(
            vec![Transform::Translate(0.0, 10.0 + ROW_HEIGHT * i as f64)],
            vec![
                legend_text(
                    ctx,
                    Some(Point::new(40.0, 0.0)),
                    format!("{} {}:", cusp_word, number),
                    "10px",
                )
                .anchored(TextAnchor::End),
                small_glyph(sign_name(house.sign), (40.0, -8.0), 0.3),
                legend_text(
                    ctx,
                    Some(Point::new(53.0, 0.0)),
                    format!(" {}", format_degrees(house.position, 3)?),
                    "10px",
                ),
            ],
        ));
    }
    Ok(Shape::group(vec![Transform::Translate(x, -20.0)], rows))
}

/// Cusp table; synastry charts get a second column for the partner.
pub(super) fn houses_grid(ctx: &ChartContext<'_>, slots: &mut FragmentMap) -> Result<()> {
    let column = house_column(ctx, ctx.primary(), 600.0)?;
    slots.push("makeHousesGrid", "houses", &[column]);
    if ctx.variant() == ChartVariant::Synastry {
        let column = house_column(ctx, ctx.require_secondary()?, 840.0)?;
        slots.push("makeHousesGrid", "transit_houses", &[column]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::assembler::test_support::{
        natal_context, settings, synastry_context, transit_context,
    };
    use crate::chart::assembler::ChartAssembler;

    #[test]
    fn test_aspect_list_columns_wrap() {
        let settings = settings();
        let ctx = transit_context(&settings);
        let secondary = ctx.require_secondary().unwrap();
        let found = ChartAssembler::new(&ctx).cross_aspects(secondary);
        let aspects: Vec<AspectInstance> = found.iter().cycle().take(30).cloned().collect();

        let mut slots = FragmentMap::new();
        transit_aspect_list(&ctx, secondary, &aspects, &mut slots).unwrap();
        let svg = slots.get("makeAspectGrid").unwrap();
        assert!(svg.contains("translate(100,0)"));
        assert!(svg.contains("translate(200,0)"));
        assert!(!svg.contains("translate(300,0)"));
    }

    #[test]
    fn test_aspect_list_shifts_long_last_column() {
        let settings = settings();
        let ctx = transit_context(&settings);
        let secondary = ctx.require_secondary().unwrap();
        let found = ChartAssembler::new(&ctx).cross_aspects(secondary);
        let aspects: Vec<AspectInstance> = found.iter().cycle().take(62).cloned().collect();

        let mut slots = FragmentMap::new();
        transit_aspect_list(&ctx, secondary, &aspects, &mut slots).unwrap();
        assert!(slots
            .get("makeAspectGrid")
            .unwrap()
            .contains("translate(400,-28)"));
    }

    #[test]
    fn test_natal_grid_has_row_per_active_body() {
        let settings = settings();
        let ctx = natal_context(&settings);
        let aspects = ChartAssembler::new(&ctx).natal_aspects();
        let mut slots = FragmentMap::new();
        natal_aspect_grid(&ctx, &aspects, &mut slots);
        assert_eq!(
            slots.fragments("makeAspectGrid").len(),
            ctx.primary().active_bodies().count()
        );
    }

    #[test]
    fn test_houses_grid_second_column_for_synastry() {
        let settings = settings();
        let mut slots = FragmentMap::new();
        houses_grid(&natal_context(&settings), &mut slots).unwrap();
        assert_eq!(slots.fragments("makeHousesGrid").len(), 1);
        assert!(slots.get("makeHousesGrid").unwrap().contains("&#160;&#160;1:"));

        let mut slots = FragmentMap::new();
        houses_grid(&synastry_context(&settings), &mut slots).unwrap();
        assert_eq!(slots.fragments("makeHousesGrid").len(), 2);
        assert!(slots.get("makeHousesGrid").unwrap().contains("translate(840,-20)"));
    }

    #[test]
    fn test_glyph_correction_table() {
        assert_eq!(glyph_correction(60), (1.2, -0.5));
        assert_eq!(glyph_correction(150), (0.0, 0.0));
    }
}
