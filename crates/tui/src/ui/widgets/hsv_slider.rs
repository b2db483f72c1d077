//! Three-row HSV slider: one gradient bar per channel with a position marker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    widgets::Widget,
};

use crate::ui::components::color_picker::{Channel, SliderProps};
use crate::ui::theme::{Theme, theme_helpers as th};

const LABEL_WIDTH: u16 = 2;
const READOUT_WIDTH: u16 = 6;

/// Renders [`SliderProps`]; `active` marks the channel that arrow keys move.
pub struct HsvSlider<'a> {
    props: &'a SliderProps,
    active: Option<Channel>,
    theme: &'a dyn Theme,
}

impl<'a> HsvSlider<'a> {
    pub fn new(props: &'a SliderProps, theme: &'a dyn Theme) -> Self {
        Self {
            props,
            active: None,
            theme,
        }
    }

    pub fn active(mut self, channel: Option<Channel>) -> Self {
        self.active = channel;
        self
    }

    /// Height needed to draw every channel.
    pub const fn height() -> u16 {
        Channel::ALL.len() as u16
    }

    /// Channel value for a column inside the bar of a slider drawn in `area`.
    pub fn value_at(area: Rect, channel: Channel, column: u16) -> Option<f64> {
        let bar = bar_bounds(area)?;
        if column < bar.0 || column >= bar.0 + bar.1 {
            return None;
        }
        let offset = f64::from(column - bar.0);
        let span = f64::from(bar.1.saturating_sub(1).max(1));
        Some(offset / span * channel.max())
    }
}

/// `(x, width)` of the gradient bar, or `None` when there is no room for one.
fn bar_bounds(area: Rect) -> Option<(u16, u16)> {
    let width = area.width.checked_sub(LABEL_WIDTH + READOUT_WIDTH)?;
    if width == 0 {
        return None;
    }
    Some((area.x + LABEL_WIDTH, width))
}

impl Widget for HsvSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hsv = self.props.value;
        for (row, channel) in Channel::ALL.into_iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }

            let label_style = if self.active == Some(channel) {
                self.theme.accent_emphasis_style()
            } else {
                self.theme.text_secondary_style().patch(self.props.style)
            };
            buf.set_string(area.x, y, channel.label(), label_style);

            let Some((bar_x, bar_width)) = bar_bounds(area) else {
                continue;
            };
            let span = f64::from(bar_width.saturating_sub(1).max(1));
            let marker = (channel.read(hsv) / channel.max() * span).round() as u16;
            for offset in 0..bar_width {
                let sample = channel.write(hsv, f64::from(offset) / span * channel.max());
                if let Some(cell) = buf.cell_mut((bar_x + offset, y)) {
                    cell.set_style(th::swatch_style(sample));
                    cell.set_symbol(if offset == marker { "┃" } else { " " });
                }
            }

            let readout = format!("{:>5.0}", channel.read(hsv));
            let readout_style = self.theme.text_primary_style().add_modifier(Modifier::BOLD);
            buf.set_string(bar_x + bar_width + 1, y, readout, readout_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use ratatui::style::Style;
    use tint_types::Hsv;

    #[test]
    fn draws_one_row_per_channel_with_readouts() {
        let props = SliderProps {
            style: Style::default(),
            value: Hsv::new(120.0, 50.0, 75.0),
        };
        let theme = DraculaTheme::new();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        HsvSlider::new(&props, &theme).render(area, &mut buf);

        let row = |y: u16| (0..20).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>();
        assert!(row(0).starts_with('H'));
        assert!(row(0).ends_with("120"));
        assert!(row(1).ends_with("50"));
        assert!(row(2).ends_with("75"));
    }

    #[test]
    fn maps_bar_columns_to_channel_values() {
        let area = Rect::new(0, 0, 20, 3);
        // Bar spans columns 2..14.
        assert_eq!(HsvSlider::value_at(area, Channel::Value, 2), Some(0.0));
        assert_eq!(HsvSlider::value_at(area, Channel::Value, 13), Some(100.0));
        assert_eq!(HsvSlider::value_at(area, Channel::Hue, 0), None);
        assert_eq!(HsvSlider::value_at(area, Channel::Hue, 14), None);
    }
}
