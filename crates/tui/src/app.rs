//! Application state for the picker TUI.
//!
//! `App` is the owner of the color picker: it holds the picker state machine
//! and applies the colors the picker reports back through its change handler.

use std::sync::mpsc::Receiver;

use tint_types::ColorValue;
use tracing::debug;

use crate::ui::components::color_picker::ColorPickerState;
use crate::ui::theme::Theme;

/// Side effects requested by components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop.
    Quit,
}

/// Runtime-wide state shared with components.
#[derive(Debug)]
pub struct App {
    pub picker: ColorPickerState,
    pub theme: Box<dyn Theme>,
    pub should_quit: bool,
}

impl App {
    pub fn new(picker: ColorPickerState, theme: Box<dyn Theme>) -> Self {
        Self {
            picker,
            theme,
            should_quit: false,
        }
    }

    /// Apply an effect returned by a component.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Quit => self.should_quit = true,
        }
    }

    /// Take every color the picker reported since the last call and make the
    /// latest one current. Returns `true` when the value changed.
    pub fn accept_changes(&mut self, changes: &Receiver<ColorValue>) -> bool {
        let Some(latest) = changes.try_iter().last() else {
            return false;
        };
        debug!(color = %latest, "owner accepted color change");
        let changed = latest != self.picker.value();
        self.picker.set_value(latest);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::color_picker::PickerConfig;
    use crate::ui::theme::DraculaTheme;
    use std::sync::Arc;
    use std::sync::mpsc;
    use tint_types::{Hsv, Rgb};
    use tint_util::{InMemoryStorage, PaletteStore};

    #[test]
    fn owner_applies_the_latest_reported_color() {
        let (sender, receiver) = mpsc::channel();
        let config = PickerConfig {
            value: ColorValue::RgbArray(Rgb::new(255, 0, 0)),
            ..PickerConfig::default()
        };
        let store = PaletteStore::new(Arc::new(InMemoryStorage::new()));
        let picker = ColorPickerState::new(config, store, move |color| {
            let _ = sender.send(color);
        });
        let mut app = App::new(picker, Box::new(DraculaTheme::new()));

        app.picker.on_color_change(Hsv::new(120.0, 100.0, 100.0));
        app.picker.on_color_change(Hsv::new(240.0, 100.0, 100.0));
        assert!(app.accept_changes(&receiver));
        assert_eq!(app.picker.value(), ColorValue::RgbArray(Rgb::new(0, 0, 255)));
        assert!(!app.accept_changes(&receiver));
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let store = PaletteStore::new(Arc::new(InMemoryStorage::new()));
        let picker = ColorPickerState::without_handler(PickerConfig::default(), store);
        let mut app = App::new(picker, Box::new(DraculaTheme::new()));
        app.apply(Effect::Quit);
        assert!(app.should_quit);
    }
}
