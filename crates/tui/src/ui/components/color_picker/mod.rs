//! Collapsible HSV color picker with a developer palette and a persisted
//! user palette.

mod bindings;
mod color_picker_component;
mod state;

pub use bindings::{Channel, PaletteKey, PaletteProps, SliderProps};
pub use color_picker_component::{ColorPickerComponent, PickerFocus};
pub use state::{ChangeHandler, ColorPickerState, PickerConfig, PickerView, Visibility};
