use crossterm::event::Event;
use ratatui::Frame;

use crate::{Runtime, TimerId};

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the tick
    /// rate and render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Advances application state by one tick.
    ///
    /// [`Runtime::clock`] gives the time of this tick.
    fn update(&mut self, runtime: &mut Runtime);

    /// Called once when a timer registered with [`Runtime::schedule_once`]
    /// expires.
    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId);
}
