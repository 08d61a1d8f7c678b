use crossterm::event::Event as CrosstermEvent;

use crate::TimerId;

/// Events processed by the runtime.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update timing (based on `tick_interval`).
    Tick,
    /// Screen render timing.
    Render,
    /// A one-shot timer expired.
    Timer(TimerId),
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
