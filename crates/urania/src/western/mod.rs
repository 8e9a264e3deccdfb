pub mod elements;
pub mod zodiac;

pub use elements::{ElementPercentages, ElementTally};
pub use zodiac::{element_of, position_in_sign, sign, sign_index, sign_name, Element, SignMeta, SIGNS};
