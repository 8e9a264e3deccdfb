//! Named template slots filled by the chart assembler.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::TemplateError;
use crate::rendering::primitives::{shapes_to_svg, Shape};

/// Slots every chart template may rely on.
pub const REQUIRED_SLOTS: &[&str] = &[
    "viewbox",
    "chart_width",
    "font",
    "font_name",
    "paper_color_0",
    "paper_color_1",
    "bg_image",
    "bg_image_wheel",
    "c1",
    "c1style",
    "c2",
    "c2style",
    "c3",
    "c3style",
    "transitRing",
    "degreeRing",
    "makeZodiac",
    "makeHouses",
    "makePlanets",
    "makeAspects",
    "makeAspectGrid",
    "makeElements",
    "makePlanetGrid",
    "makeHousesGrid",
    "makePatterns",
    "stringTitle",
    "stringName",
    "stringDateTime",
    "stringLocation",
    "stringLat",
    "stringLon",
    "stringPosition",
    "lunar_phase_fg",
    "lunar_phase_bg",
    "lunar_phase_cx",
    "lunar_phase_r",
    "lunar_phase_outline",
    "lunar_phase_rotate",
];

/// One drawn item inside an aggregate slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub key: String,
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq)]
enum SlotValue {
    Scalar(String),
    Fragments(Vec<Fragment>),
}

/// Slot name to rendered text.
///
/// A slot holds either a scalar or an ordered list of keyed fragments whose
/// joined text is the slot value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentMap {
    slots: BTreeMap<String, SlotValue>,
}

impl FragmentMap {
    /// Empty map with no slots declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar slot, replacing any previous value.
    pub fn set(&mut self, slot: &str, value: impl ToString) {
        self.slots
            .insert(slot.to_string(), SlotValue::Scalar(value.to_string()));
    }

    /// Declare an aggregate slot that may stay empty.
    pub fn open(&mut self, slot: &str) {
        self.slots
            .entry(slot.to_string())
            .or_insert_with(|| SlotValue::Fragments(Vec::new()));
    }

    /// Append a keyed fragment to an aggregate slot.
    pub fn push(&mut self, slot: &str, key: impl Into<String>, shapes: &[Shape]) {
        self.push_raw(slot, key, shapes_to_svg(shapes));
    }

    /// Append already serialized markup to an aggregate slot. A scalar in
    /// the same slot is discarded.
    pub fn push_raw(&mut self, slot: &str, key: impl Into<String>, svg: String) {
        let entry = self
            .slots
            .entry(slot.to_string())
            .or_insert_with(|| SlotValue::Fragments(Vec::new()));
        let fragment = Fragment {
            key: key.into(),
            svg,
        };
        match entry {
            SlotValue::Fragments(items) => items.push(fragment),
            SlotValue::Scalar(_) => *entry = SlotValue::Fragments(vec![fragment]),
        }
    }

    /// Whether the slot was set or opened, even if it is empty.
    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    /// Slot text; aggregate slots are joined in insertion order.
    pub fn get(&self, slot: &str) -> Option<Cow<'_, str>> {
        self.slots.get(slot).map(|value| match value {
            SlotValue::Scalar(text) => Cow::Borrowed(text.as_str()),
            SlotValue::Fragments(items) => {
                Cow::Owned(items.iter().map(|f| f.svg.as_str()).collect::<String>())
            }
        })
    }

    /// Keyed items of an aggregate slot; empty for scalars and unknown slots.
    pub fn fragments(&self, slot: &str) -> &[Fragment] {
        match self.slots.get(slot) {
            Some(SlotValue::Fragments(items)) => items,
            _ => &[],
        }
    }

    /// Names of all filled slots, sorted.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fail on the first [`REQUIRED_SLOTS`] entry that was never filled.
    pub fn check_required(&self) -> Result<(), TemplateError> {
        match REQUIRED_SLOTS.iter().find(|slot| !self.contains(slot)) {
            Some(slot) => Err(TemplateError::MissingSlot {
                name: slot.to_string(),
            }),
            None => Ok(()),
        }
    }
}
