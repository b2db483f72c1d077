//! UI components.

pub mod color_picker;
pub mod component;

pub use component::*;
