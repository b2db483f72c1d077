//! Runtime: terminal lifecycle and the event loop driving the picker.
//!
//! Everything happens on one thread. Input is read with a blocking
//! `crossterm::event::read()`, routed to the picker component, and any
//! colors the picker reported are applied by the owner before the next frame
//! is drawn.

use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tint_types::ColorValue;
use tint_util::PaletteStore;
use tracing::{debug, info};

use crate::app::{App, Effect};
use crate::ui::components::color_picker::{ColorPickerComponent, ColorPickerState, PickerConfig};
use crate::ui::components::component::Component;
use crate::ui::{main, theme};

/// Put the terminal into raw mode and enter the alternate screen.
///
/// Returns a ratatui `Terminal` backed by Crossterm for later drawing.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Route one input event to the picker component.
fn handle_input_event(app: &mut App, picker: &mut ColorPickerComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.is_press() => picker.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => picker.handle_mouse_events(app, mouse_event),
        _ => Vec::new(),
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    picker: &mut ColorPickerComponent,
    changes: &mpsc::Receiver<ColorValue>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| main::draw(frame, app, picker))?;

        let input_event = event::read().context("failed to read terminal input")?;
        for effect in handle_input_event(app, picker, input_event) {
            app.apply(effect);
        }
        if app.accept_changes(changes) {
            debug!(color = %app.picker.value(), "current color updated");
        }
    }
    Ok(())
}

/// Entry point for the TUI runtime: mounts the picker, runs the event loop
/// and restores the terminal. Returns the color current at exit.
pub fn run_app(config: PickerConfig, store: PaletteStore) -> Result<ColorValue> {
    let (sender, changes) = mpsc::channel();
    let state = ColorPickerState::new(config, store, move |color| {
        // The receiver lives for the whole loop; a send can only fail after exit.
        let _ = sender.send(color);
    });
    let mut app = App::new(state, theme::load());
    let mut picker = ColorPickerComponent::default();
    picker.init()?;

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &mut picker, &changes);
    cleanup_terminal(&mut terminal)?;
    outcome?;

    let value = app.picker.value();
    info!(color = %value, "color picker closed");
    Ok(value)
}
