use serde::{Deserialize, Serialize};

/// Discrete player input delivered by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    RotateClockwise,
    MoveLeft,
    MoveRight,
    SoftDrop,
    RestartGame,
}
