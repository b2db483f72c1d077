//! Top-level frame layout: the picker panel above a one-line hint bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::components::color_picker::ColorPickerComponent;
use crate::ui::components::component::Component;

/// Widest the picker panel grows to.
const PANEL_WIDTH: u16 = 64;
/// Borders plus header, slider, two palettes and the add button.
const PANEL_HEIGHT: u16 = 9;

pub fn draw(frame: &mut Frame, app: &mut App, picker: &mut ColorPickerComponent) {
    let [body, hints] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [panel] = Layout::horizontal([Constraint::Max(PANEL_WIDTH)]).flex(Flex::Start).areas(body);
    let panel_height = if app.picker.visibility().is_open() { PANEL_HEIGHT } else { 3 };
    let [panel] = Layout::vertical([Constraint::Length(panel_height)]).flex(Flex::Start).areas(panel);

    picker.render(frame, panel, app);

    let hint_line = Line::from(picker.get_hint_spans(app));
    frame.render_widget(Paragraph::new(hint_line), hints);
}
