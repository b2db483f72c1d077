//! # tint TUI
//!
//! Terminal front-end for the tint color picker: a collapsible header with a
//! swatch of the current color, an HSV slider, the developer's palette and
//! the user's saved palette.
//!
//! ## Architecture
//!
//! - [`ColorPickerState`] is the state machine: visibility, the owner's
//!   current color, and the user palette written through to a
//!   [`tint_util::PaletteStore`].
//! - [`ColorPickerComponent`] binds that state to the slider and swatch
//!   widgets and translates key and mouse input into state operations.
//! - The runtime owns the terminal and acts as the picker's owner, applying
//!   the colors it reports.

mod app;
mod ui;

use anyhow::Result;
use tint_types::ColorValue;
use tint_util::PaletteStore;

pub use app::{App, Effect};
pub use ui::components::Component;
pub use ui::components::color_picker::{
    Channel, ChangeHandler, ColorPickerComponent, ColorPickerState, PaletteKey, PaletteProps, PickerConfig, PickerFocus,
    PickerView, SliderProps, Visibility,
};
pub use ui::theme::{DraculaTheme, DraculaThemeHighContrast, Theme};

/// Runs the picker until the user quits and returns the final color.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into raw mode or input
/// cannot be read.
pub fn run(config: PickerConfig, store: PaletteStore) -> Result<ColorValue> {
    ui::runtime::run_app(config, store)
}
