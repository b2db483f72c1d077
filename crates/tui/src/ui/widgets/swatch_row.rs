//! A single row of palette swatches with a title and an optional cursor.

use std::ops::Range;

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use crate::ui::components::color_picker::PaletteProps;
use crate::ui::theme::{Theme, theme_helpers as th};

const TITLE_WIDTH: u16 = 8;
const SWATCH_WIDTH: u16 = 3;
const SWATCH_STRIDE: u16 = SWATCH_WIDTH + 1;

/// Renders one palette. The swatch under `cursor` carries a marker.
pub struct SwatchRow<'a> {
    props: &'a PaletteProps,
    cursor: Option<usize>,
    theme: &'a dyn Theme,
}

impl<'a> SwatchRow<'a> {
    pub fn new(props: &'a PaletteProps, theme: &'a dyn Theme) -> Self {
        Self {
            props,
            cursor: None,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Palette index drawn at `column` for a row rendered in `area`.
    pub fn index_at(area: Rect, len: usize, cursor: Option<usize>, column: u16) -> Option<usize> {
        let start = area.x + TITLE_WIDTH;
        if column < start {
            return None;
        }
        let slot = usize::from((column - start) / SWATCH_STRIDE);
        let within = (column - start) % SWATCH_STRIDE;
        if within >= SWATCH_WIDTH {
            return None;
        }
        let visible = visible_range(area.width, len, cursor);
        let index = visible.start + slot;
        visible.contains(&index).then_some(index)
    }
}

/// Indices that fit into `width`, scrolled so the cursor stays visible.
fn visible_range(width: u16, len: usize, cursor: Option<usize>) -> Range<usize> {
    let capacity = usize::from(width.saturating_sub(TITLE_WIDTH) / SWATCH_STRIDE);
    if capacity == 0 {
        return 0..0;
    }
    let cursor = cursor.unwrap_or(0).min(len.saturating_sub(1));
    let start = (cursor + 1).saturating_sub(capacity);
    start..len.min(start + capacity)
}

impl Widget for SwatchRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let title_style = if self.cursor.is_some() {
            self.theme.accent_emphasis_style()
        } else {
            self.theme.text_secondary_style()
        };
        buf.set_stringn(area.x, area.y, self.props.key.title(), usize::from(TITLE_WIDTH - 1), title_style);

        if self.props.values.is_empty() {
            let hint = if self.props.deselectable { "(press + to save)" } else { "(empty)" };
            let width = usize::from(area.width.saturating_sub(TITLE_WIDTH));
            buf.set_stringn(area.x + TITLE_WIDTH, area.y, hint, width, self.theme.text_muted_style());
            return;
        }

        let visible = visible_range(area.width, self.props.values.len(), self.cursor);
        for (slot, index) in visible.enumerate() {
            let x = area.x + TITLE_WIDTH + slot as u16 * SWATCH_STRIDE;
            let hsv = self.props.values[index];
            let mut style = th::swatch_style(hsv);
            let symbol = if self.cursor == Some(index) {
                style = style.add_modifier(Modifier::BOLD);
                " ◆ "
            } else {
                "   "
            };
            buf.set_string(x, area.y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::color_picker::PaletteKey;
    use crate::ui::theme::DraculaTheme;
    use ratatui::style::Color;
    use tint_types::Hsv;

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        assert_eq!(visible_range(8 + 4 * 3, 10, Some(0)), 0..3);
        assert_eq!(visible_range(8 + 4 * 3, 10, Some(5)), 3..6);
        assert_eq!(visible_range(8 + 4 * 3, 2, None), 0..2);
        assert_eq!(visible_range(4, 10, Some(5)), 0..0);
    }

    #[test]
    fn hit_testing_skips_gaps_and_title() {
        let area = Rect::new(0, 0, 40, 1);
        assert_eq!(SwatchRow::index_at(area, 3, None, 2), None);
        assert_eq!(SwatchRow::index_at(area, 3, None, 8), Some(0));
        assert_eq!(SwatchRow::index_at(area, 3, None, 11), None);
        assert_eq!(SwatchRow::index_at(area, 3, None, 13), Some(1));
        assert_eq!(SwatchRow::index_at(area, 3, None, 20), None);
    }

    #[test]
    fn paints_each_swatch_with_its_color() {
        let props = PaletteProps::new(
            PaletteKey::Developer,
            vec![Hsv::new(0.0, 100.0, 100.0), Hsv::new(240.0, 100.0, 100.0)],
        );
        let theme = DraculaTheme::new();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        SwatchRow::new(&props, &theme).cursor(Some(1)).render(area, &mut buf);

        assert_eq!(buf[(8, 0)].bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(12, 0)].bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(13, 0)].symbol(), "◆");
    }
}
