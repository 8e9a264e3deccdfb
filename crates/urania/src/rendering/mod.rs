pub mod fragment;
pub mod primitives;

pub use fragment::{Fragment, FragmentMap, REQUIRED_SLOTS};
pub use primitives::{
    escape_attr, escape_text, fmt_num, shapes_to_svg, PathCommand, Shape, Style, TextAnchor,
    Transform,
};
