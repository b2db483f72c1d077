use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tint_types::Hsv;

use super::bindings::{Channel, PaletteKey};
use super::state::Visibility;
use crate::app::{App, Effect};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::widgets::{HsvSlider, SwatchRow};

const STEP: f64 = 1.0;
const COARSE_STEP: f64 = 10.0;

/// Region of the picker receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerFocus {
    #[default]
    Header,
    Slider,
    DeveloperPalette,
    UserPalette,
    AddButton,
}

impl PickerFocus {
    const RING: [PickerFocus; 5] = [
        PickerFocus::Header,
        PickerFocus::Slider,
        PickerFocus::DeveloperPalette,
        PickerFocus::UserPalette,
        PickerFocus::AddButton,
    ];

    fn position(self) -> usize {
        Self::RING.iter().position(|focus| *focus == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::RING[(self.position() + 1) % Self::RING.len()]
    }

    fn previous(self) -> Self {
        Self::RING[(self.position() + Self::RING.len() - 1) % Self::RING.len()]
    }
}

/// Screen regions from the last render, used for mouse hit testing.
#[derive(Debug, Clone, Copy, Default)]
struct Regions {
    header: Rect,
    slider: Rect,
    developer: Rect,
    user: Rect,
    add_button: Rect,
}

/// Binds [`super::ColorPickerState`] to the slider and palette controls.
///
/// Slider edits and palette selections are forwarded to
/// `on_color_change`, user palette removals to `on_remove_color`, and the
/// add button to `add_current_color`.
#[derive(Debug, Default)]
pub struct ColorPickerComponent {
    focus: PickerFocus,
    channel: Channel,
    developer_cursor: usize,
    user_cursor: usize,
    regions: Regions,
}

impl ColorPickerComponent {
    pub fn focus(&self) -> PickerFocus {
        self.focus
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    fn cycle_focus(&mut self, app: &App, forward: bool) {
        if !app.picker.visibility().is_open() {
            self.focus = PickerFocus::Header;
            return;
        }
        self.focus = if forward { self.focus.next() } else { self.focus.previous() };
    }

    fn toggle(&mut self, app: &mut App) {
        if app.picker.toggle_open() == Visibility::Closed {
            self.focus = PickerFocus::Header;
        }
    }

    fn nudge(&mut self, app: &mut App, direction: f64, coarse: bool) {
        let step = if coarse { COARSE_STEP } else { STEP };
        let hsv = self.channel.nudge(app.picker.current_hsv(), direction * step);
        app.picker.on_color_change(hsv);
    }

    fn set_channel(&mut self, app: &mut App, value: f64) {
        let hsv = self.channel.write(app.picker.current_hsv(), value);
        app.picker.on_color_change(hsv);
    }

    fn cursor_mut(&mut self, key: PaletteKey) -> &mut usize {
        match key {
            PaletteKey::Developer => &mut self.developer_cursor,
            PaletteKey::User => &mut self.user_cursor,
        }
    }

    fn move_cursor(&mut self, app: &App, key: PaletteKey, forward: bool) {
        let len = app.picker.palette_hsv(key).len();
        let cursor = self.cursor_mut(key);
        if len == 0 {
            *cursor = 0;
        } else if forward {
            *cursor = (*cursor + 1).min(len - 1);
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    fn select(&mut self, app: &mut App, key: PaletteKey, index: usize) {
        let values = app.picker.palette_hsv(key);
        if let Some(hsv) = values.get(index).copied() {
            *self.cursor_mut(key) = index;
            app.picker.on_color_change(hsv);
        }
    }

    fn deselect(&mut self, app: &mut App, index: usize) {
        let Some(color) = app.picker.user_palette().get(index).copied() else {
            return;
        };
        app.picker.on_remove_color(color, index);
        let len = app.picker.user_palette().len();
        self.user_cursor = self.user_cursor.min(len.saturating_sub(1));
    }

    fn handle_palette_key(&mut self, app: &mut App, key: PaletteKey, event: KeyEvent) {
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(app, key, false),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(app, key, true),
            KeyCode::Enter if key == PaletteKey::User && event.modifiers.contains(KeyModifiers::SHIFT) => {
                self.deselect(app, self.user_cursor)
            }
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') if key == PaletteKey::User => {
                self.deselect(app, self.user_cursor)
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let index = match key {
                    PaletteKey::Developer => self.developer_cursor,
                    PaletteKey::User => self.user_cursor,
                };
                self.select(app, key, index);
            }
            _ => {}
        }
    }

    fn handle_slider_key(&mut self, app: &mut App, event: KeyEvent) {
        let coarse = event.modifiers.contains(KeyModifiers::SHIFT);
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.channel = self.channel.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.channel = self.channel.next(),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(app, -1.0, coarse),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(app, 1.0, coarse),
            KeyCode::Home => self.set_channel(app, 0.0),
            KeyCode::End => self.set_channel(app, self.channel.max()),
            _ => {}
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, app: &App, hsv: Hsv, swatch_hex: &str) {
        let theme = &*app.theme;
        let caret = if app.picker.visibility().is_open() { "▾ " } else { "▸ " };
        let mut label_style = theme.text_primary_style();
        if self.focus == PickerFocus::Header {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let readout = format!("{swatch_hex}   ");
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(readout.chars().count() as u16)]).areas(area);

        let left = Line::from(vec![
            Span::styled(caret, theme.text_muted_style()),
            Span::styled(app.picker.label().to_string(), label_style),
        ]);
        frame.render_widget(Paragraph::new(left), left_area);

        let right = Line::from(vec![
            Span::styled(swatch_hex.to_string(), theme.text_muted_style()),
            Span::raw(" "),
            Span::styled("  ", th::swatch_style(hsv)),
        ])
        .alignment(Alignment::Right);
        frame.render_widget(Paragraph::new(right), right_area);
    }
}

impl Component for ColorPickerComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return vec![Effect::Quit],
            KeyCode::Tab => {
                self.cycle_focus(app, true);
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.cycle_focus(app, false);
                return Vec::new();
            }
            KeyCode::Char('+') | KeyCode::Char('a') if app.picker.visibility().is_open() => {
                app.picker.add_current_color();
                return Vec::new();
            }
            _ => {}
        }

        match self.focus {
            PickerFocus::Header => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.toggle(app);
                }
            }
            PickerFocus::Slider => self.handle_slider_key(app, key),
            PickerFocus::DeveloperPalette => self.handle_palette_key(app, PaletteKey::Developer, key),
            PickerFocus::UserPalette => self.handle_palette_key(app, PaletteKey::User, key),
            PickerFocus::AddButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    app.picker.add_current_color();
                }
            }
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);
        let regions = self.regions;

        if regions.header.contains(position) {
            self.focus = PickerFocus::Header;
            self.toggle(app);
            return Vec::new();
        }
        if !app.picker.visibility().is_open() {
            return Vec::new();
        }

        if regions.slider.contains(position) {
            self.focus = PickerFocus::Slider;
            let row = usize::from(mouse.row - regions.slider.y);
            if let Some(channel) = Channel::ALL.get(row).copied() {
                self.channel = channel;
                if let Some(value) = HsvSlider::value_at(regions.slider, channel, mouse.column) {
                    self.set_channel(app, value);
                }
            }
        } else if regions.developer.contains(position) {
            self.focus = PickerFocus::DeveloperPalette;
            let len = app.picker.developer_palette().len();
            if let Some(index) = SwatchRow::index_at(regions.developer, len, Some(self.developer_cursor), mouse.column) {
                self.select(app, PaletteKey::Developer, index);
            }
        } else if regions.user.contains(position) {
            self.focus = PickerFocus::UserPalette;
            let len = app.picker.user_palette().len();
            if let Some(index) = SwatchRow::index_at(regions.user, len, Some(self.user_cursor), mouse.column) {
                if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    self.deselect(app, index);
                } else {
                    self.select(app, PaletteKey::User, index);
                }
            }
        } else if regions.add_button.contains(position) {
            self.focus = PickerFocus::AddButton;
            app.picker.add_current_color();
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let view = app.picker.view();
        let theme = &*app.theme;
        let block = th::block(theme, None, true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [header, slider, developer, user, add_button] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(HsvSlider::height()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_header(frame, header, app, view.hsv, &view.swatch_hex);
        if !view.visibility.is_open() {
            self.regions = Regions {
                header,
                ..Regions::default()
            };
            return;
        }
        self.regions = Regions {
            header,
            slider,
            developer,
            user,
            add_button,
        };

        let slider_channel = (self.focus == PickerFocus::Slider).then_some(self.channel);
        frame.render_widget(HsvSlider::new(&view.slider, theme).active(slider_channel), slider);

        let developer_cursor = (self.focus == PickerFocus::DeveloperPalette).then_some(self.developer_cursor);
        frame.render_widget(
            SwatchRow::new(&view.developer_palette, theme).cursor(developer_cursor),
            developer,
        );
        let user_cursor = (self.focus == PickerFocus::UserPalette).then_some(self.user_cursor);
        frame.render_widget(SwatchRow::new(&view.user_palette, theme).cursor(user_cursor), user);

        let button = Span::styled(
            "[+] Save current color",
            th::button_secondary_style(theme, self.focus == PickerFocus::AddButton),
        );
        frame.render_widget(Paragraph::new(Line::from(button)), add_button);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.theme;
        let hints: &[(&str, &str)] = match self.focus {
            PickerFocus::Header => &[(" Enter", " Toggle  "), (" Tab", " Next  "), (" Esc", " Quit ")],
            PickerFocus::Slider => &[
                (" ↑/↓", " Channel  "),
                (" ←/→", " Adjust  "),
                (" Shift", " ×10  "),
                (" +", " Save  "),
                (" Esc", " Quit "),
            ],
            PickerFocus::DeveloperPalette => &[(" ←/→", " Move  "), (" Enter", " Pick  "), (" +", " Save  "), (" Esc", " Quit ")],
            PickerFocus::UserPalette => &[
                (" ←/→", " Move  "),
                (" Enter", " Pick  "),
                (" Del", " Remove  "),
                (" +", " Save  "),
                (" Esc", " Quit "),
            ],
            PickerFocus::AddButton => &[(" Enter", " Save  "), (" Tab", " Next  "), (" Esc", " Quit ")],
        };
        th::build_hint_spans(theme, hints)
    }
}
