//! Component system for the picker UI.
//!
//! Components own their local UI state (focus, cursors), receive input
//! events, render themselves into a `Rect`, and report side effects back to
//! the runtime as [`Effect`]s instead of acting on the terminal directly.

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::{App, Effect};

/// A UI element with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Initialization**: `init()` is called once before the first frame
/// 2. **Event Handling**: input arrives through `handle_key_events()` and `handle_mouse_events()`
/// 3. **Rendering**: `render()` draws the component from current state
pub trait Component {
    /// Initialize any internal state.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle key events when this component has focus.
    ///
    /// # Returns
    ///
    /// Vector of effects that the runtime should process
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing
    /// and remembering layout for hit testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
