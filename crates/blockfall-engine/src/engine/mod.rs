//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`Board`] - Settled grid, active piece, gravity and row removal
//! - [`BoardConfig`] - Board dimensions, timing and scoring parameters
//! - [`Command`] - Discrete player input
//! - [`GameStats`] - Score, level, current step interval and lock counters
//! - [`PieceCatalog`] - Random piece source, reproducible through [`PieceSeed`]
//! - [`DrawPrimitive`] - Read-only scene description for renderers
//!
//! # Game Flow
//!
//! 1. The host calls [`Board::advance_frame`] once per frame with its clock
//! 2. Player input arrives as [`Command`]s through [`Board::handle_command`]
//! 3. When the piece cannot fall further it locks; completed rows are marked
//!    pending and scored, and the frame report asks for a delayed removal
//! 4. The host calls [`Board::remove_completed_rows`] when that delay expires
//! 5. Repeat until a piece locks above the board or a new piece is stuck
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Board, BoardConfig, Command, PieceSeed};
//!
//! let seed = PieceSeed::from_bytes([42; 16]);
//! let mut board = Board::with_seed(BoardConfig::default(), seed).unwrap();
//!
//! board.handle_command(Command::RotateClockwise);
//! board.advance_frame(Duration::ZERO);
//!
//! for primitive in board.draw_primitives() {
//!     // Paint a cell at (primitive.row, primitive.col).
//!     let _ = primitive;
//! }
//! println!("{}", board.caption());
//! ```

pub use self::{board::*, command::*, config::*, game_stats::*, piece_catalog::*, render::*};

mod board;
mod command;
mod config;
mod game_stats;
mod piece_catalog;
mod render;
