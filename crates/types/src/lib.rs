//! Shared color types for the tint picker.
//!
//! [`ColorValue`] carries a color together with the shape its owner supplied
//! it in, and [`select_converter`] resolves the converter that edits it in HSV.

pub mod color;
pub mod converter;

pub use color::{ColorError, ColorValue, HUE_MAX, Hsv, PERCENT_MAX, Representation, Rgb};
pub use converter::{Converter, select_converter, to_hsv_all};
