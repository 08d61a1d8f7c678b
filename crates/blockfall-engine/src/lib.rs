pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a [`BoardConfig`] cannot be used to build a [`Board`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BoardConfigError {
    #[display("board needs at least {min} columns, got {columns}")]
    TooFewColumns { columns: usize, min: usize },
    #[display("board needs at least one row")]
    NoRows,
    #[display("spawn column {column} leaves no room for a 4-wide piece on a {columns}-column board")]
    SpawnColumnOutOfRange { column: usize, columns: usize },
    #[display("step interval must be positive")]
    NonPositiveStepInterval,
    #[display("ease factor must be in (0, 1], got {_0}")]
    InvalidEaseFactor(#[error(not(source))] f64),
    #[display("level speed-up factor must be in (0, 1], got {_0}")]
    InvalidLevelSpeedup(#[error(not(source))] f64),
    #[display("rows per level must be positive")]
    NoRowsPerLevel,
}
