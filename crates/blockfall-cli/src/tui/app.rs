use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the loop starts. Use this to configure rates.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles terminal input (keys, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Advances game logic by one tick.
    fn update(&mut self, runtime: &mut Runtime);
}
