use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};
use tint_types::{Hsv, Rgb};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(
            t,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Terminal color for an HSV value.
pub fn hsv_color(hsv: Hsv) -> Color {
    let Rgb { r, g, b } = hsv.to_rgb();
    Color::Rgb(r, g, b)
}

/// Black or white, whichever reads better on top of `hsv`.
pub fn contrast_color(hsv: Hsv) -> Color {
    let Rgb { r, g, b } = hsv.to_rgb();
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 140.0 { Color::Black } else { Color::White }
}

/// Filled swatch style with readable foreground.
pub fn swatch_style(hsv: Hsv) -> Style {
    Style::default().bg(hsv_color(hsv)).fg(contrast_color(hsv))
}

/// Secondary button style (outline-like, rely on border color in Block).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, selected: bool) -> Style {
    let style = Style::default().fg(theme.roles().accent_secondary);
    if selected {
        return style.bg(theme.roles().selection_bg).add_modifier(Modifier::BOLD);
    }
    style
}

/// Key/description pairs rendered as a hint bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}
