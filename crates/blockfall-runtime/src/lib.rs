//! Terminal frame driver for the game.
//!
//! [`Runtime::run`] owns the terminal and feeds an [`App`] with ticks, renders,
//! terminal input and one-shot timer callbacks. [`Runtime::clock`] is the
//! monotonic frame clock handed to the game on every tick.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime, timer::TimerId};

mod app;
mod event;
mod event_loop;
mod runtime;
mod timer;
