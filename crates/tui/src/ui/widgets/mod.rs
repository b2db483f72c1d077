//! Stateless controls drawn by the color picker.

pub mod hsv_slider;
pub mod swatch_row;

pub use hsv_slider::HsvSlider;
pub use swatch_row::SwatchRow;
