use std::{io, time::Duration};

use crate::{
    App, TimerId,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime. Its clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic time since the runtime was created.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.events.elapsed()
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Registers a timer that calls [`App::on_timer`] once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.events.schedule_once(delay)
    }

    /// Cancels a timer that has not fired yet. Returns `false` if it already
    /// fired or was cancelled.
    pub fn cancel_timer(&mut self, timer: TimerId) -> bool {
        self.events.cancel_timer(timer)
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Timer`: calls `app.on_timer()`
    ///    - `Event::Tick`: calls `app.update()`
    ///    - `Event::Render`: calls `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Timer(timer) => {
                        app.on_timer(&mut self, timer);
                    }
                    TuiEvent::Tick => {
                        app.update(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
