//! Turns a [`ChartContext`] into the named slots of the chart template.
//!
//! Dispatch is on the chart variant only: natal-like charts draw one subject
//! inside a dashed degree ring, dual charts overlay a second subject on an
//! outer transit band. Every drawn item is pushed as a keyed fragment so the
//! output can be inspected item by item.

mod grids;
mod houses;
mod legend;
mod planets;
mod rings;

use log::debug;

use crate::aspects::{AspectAdjacency, AspectCalculator, AspectInstance, AspectPoint};
use crate::chart::context::{ChartContext, WHEEL_RADIUS};
use crate::chart::data::Subject;
use crate::error::Result;
use crate::geometry::{place_inset, Point};
use crate::patterns::{is_derived_point, Pattern, PatternDetector};
use crate::rendering::FragmentMap;

/// Builds the fragment map of one render.
pub struct ChartAssembler<'a> {
    ctx: &'a ChartContext<'a>,
}

impl<'a> ChartAssembler<'a> {
    pub fn new(ctx: &'a ChartContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn assemble(&self) -> Result<FragmentMap> {
        let ctx = self.ctx;
        let mut slots = FragmentMap::new();

        rings::assemble(ctx, &mut slots);
        houses::assemble(ctx, &mut slots)?;
        planets::assemble(ctx, &mut slots)?;

        if ctx.variant().is_dual() {
            let secondary = ctx.require_secondary()?;
            let aspects = self.cross_aspects(secondary);
            grids::transit_aspect_lines(ctx, &aspects, &mut slots);
            grids::transit_aspect_list(ctx, secondary, &aspects, &mut slots)?;
            slots.open("makePatterns");
        } else {
            let aspects = self.natal_aspects();
            grids::natal_aspect_lines(ctx, &aspects, &mut slots);
            grids::natal_aspect_grid(ctx, &aspects, &mut slots);
            let patterns = self.patterns();
            legend::patterns(ctx, &patterns, &mut slots);
        }

        grids::planet_grid(ctx, &mut slots)?;
        grids::houses_grid(ctx, &mut slots)?;
        legend::assemble(ctx, &mut slots)?;

        debug!("Assembled {} template slots", slots.len());
        Ok(slots)
    }

    /// Active bodies of `subject` that take part in aspects and patterns.
    fn eligible_points(subject: &Subject) -> Vec<AspectPoint> {
        subject.aspect_points(|body| is_derived_point(&body.name))
    }

    fn calculator(&self) -> AspectCalculator<'a> {
        let settings = self.ctx.settings();
        AspectCalculator::new(&settings.aspects).with_axes_orb(settings.axes_orb)
    }

    /// Drawn aspects among the primary bodies.
    pub fn natal_aspects(&self) -> Vec<AspectInstance> {
        let points = Self::eligible_points(self.ctx.primary());
        self.calculator().compute_natal_aspects(&points)
    }

    /// Aspects from the primary to `secondary`, computed fresh for every
    /// render.
    pub fn cross_aspects(&self, secondary: &Subject) -> Vec<AspectInstance> {
        let primary = Self::eligible_points(self.ctx.primary());
        let secondary = Self::eligible_points(secondary);
        self.calculator().compute_cross_aspects(&primary, &secondary)
    }

    /// Patterns of the primary subject, matched against the whole catalog
    /// including entries that are not drawn.
    pub fn patterns(&self) -> Vec<Pattern> {
        let ctx = self.ctx;
        let points = Self::eligible_points(ctx.primary());
        let aspects = AspectCalculator::new(&ctx.settings().aspects)
            .including_inactive()
            .compute_natal_aspects(&points);
        let adjacency = AspectAdjacency::from_aspects(&aspects);
        let labels = ctx.primary().labels();
        PatternDetector::new(&adjacency, &labels).detect()
    }
}

/// Point on a ring `inset` units inside the wheel edge.
fn ring_point(inset: f64, angle: f64) -> Point {
    place_inset(WHEEL_RADIUS, inset, angle)
}

/// Zero-padded fragment key.
fn key(prefix: &str, index: usize) -> String {
    format!("{}_{:02}", prefix, index)
}
