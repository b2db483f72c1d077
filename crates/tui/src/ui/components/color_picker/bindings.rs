//! Inputs handed to the child controls and the callbacks they report back.

use ratatui::style::Style;
use tint_types::{HUE_MAX, Hsv, PERCENT_MAX};

/// Inputs for the HSV slider. Slider edits are routed to
/// `ColorPickerState::on_color_change`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderProps {
    pub style: Style,
    pub value: Hsv,
}

/// Identifies which palette a swatch row displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKey {
    /// Supplied by the integrating application, read-only.
    Developer,
    /// Built and persisted by the end user.
    User,
}

impl PaletteKey {
    pub fn title(self) -> &'static str {
        match self {
            PaletteKey::Developer => "Palette",
            PaletteKey::User => "Saved",
        }
    }
}

/// Inputs for one palette swatch row. Selecting routes to
/// `on_color_change`; deselecting, offered only for the user palette, routes
/// to `on_remove_color`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteProps {
    pub key: PaletteKey,
    pub values: Vec<Hsv>,
    pub deselectable: bool,
}

impl PaletteProps {
    pub fn new(key: PaletteKey, values: Vec<Hsv>) -> Self {
        Self {
            key,
            values,
            deselectable: matches!(key, PaletteKey::User),
        }
    }
}

/// One HSV slider channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Hue,
    Saturation,
    Value,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Hue, Channel::Saturation, Channel::Value];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Hue => "H",
            Channel::Saturation => "S",
            Channel::Value => "V",
        }
    }

    pub fn max(self) -> f64 {
        match self {
            Channel::Hue => HUE_MAX,
            Channel::Saturation | Channel::Value => PERCENT_MAX,
        }
    }

    pub fn read(self, hsv: Hsv) -> f64 {
        match self {
            Channel::Hue => hsv.h,
            Channel::Saturation => hsv.s,
            Channel::Value => hsv.v,
        }
    }

    /// Returns `hsv` with this channel set to `value`, clamped to its range.
    pub fn write(self, hsv: Hsv, value: f64) -> Hsv {
        let value = value.clamp(0.0, self.max());
        match self {
            Channel::Hue => Hsv { h: value, ..hsv },
            Channel::Saturation => Hsv { s: value, ..hsv },
            Channel::Value => Hsv { v: value, ..hsv },
        }
    }

    /// Returns `hsv` moved by `delta` along this channel.
    pub fn nudge(self, hsv: Hsv, delta: f64) -> Hsv {
        self.write(hsv, self.read(hsv) + delta)
    }

    pub fn next(self) -> Self {
        match self {
            Channel::Hue => Channel::Saturation,
            Channel::Saturation => Channel::Value,
            Channel::Value => Channel::Hue,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Channel::Hue => Channel::Value,
            Channel::Saturation => Channel::Hue,
            Channel::Value => Channel::Saturation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_clamps_to_channel_range() {
        let hsv = Hsv::new(355.0, 98.0, 2.0);
        assert_eq!(Channel::Hue.nudge(hsv, 10.0).h, 360.0);
        assert_eq!(Channel::Saturation.nudge(hsv, 10.0).s, 100.0);
        assert_eq!(Channel::Value.nudge(hsv, -10.0).v, 0.0);
    }

    #[test]
    fn only_the_user_palette_is_deselectable() {
        assert!(!PaletteProps::new(PaletteKey::Developer, Vec::new()).deselectable);
        assert!(PaletteProps::new(PaletteKey::User, Vec::new()).deselectable);
    }
}
