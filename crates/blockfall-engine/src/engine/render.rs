use crate::{Board, BoardConfig, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellStyle {
    Filled,
    /// Settled cell in a row waiting for removal.
    Outline,
}

/// One cell to draw, in board cell units.
///
/// `row` and `col` are fractional for the active piece, which is drawn at its
/// animated position. Rows above 0 are off the visible board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPrimitive {
    pub row: f64,
    pub col: f64,
    pub color: Rgb,
    pub style: CellStyle,
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps board cells to pixels for hosts that draw on a pixel surface.
///
/// Cells are laid out on a `cell_size + 2 * padding` pitch; each is drawn as
/// a `cell_size` square at the start of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGeometry {
    pub cell_size: u32,
    pub padding: u32,
}

impl PixelGeometry {
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            padding: config.padding,
        }
    }

    #[must_use]
    pub fn pitch(&self) -> u32 {
        self.cell_size + 2 * self.padding
    }

    #[must_use]
    pub fn pixel_rect(&self, row: f64, col: f64) -> PixelRect {
        let pitch = f64::from(self.pitch());
        PixelRect {
            x: pitch * col,
            y: pitch * row,
            width: f64::from(self.cell_size),
            height: f64::from(self.cell_size),
        }
    }

    /// `(width, height)` of a surface holding the whole board.
    #[must_use]
    pub fn surface_size(&self, columns: usize, rows: usize) -> (u64, u64) {
        let pitch = u64::from(self.pitch());
        (pitch * columns as u64, pitch * rows as u64)
    }
}

impl Board {
    /// Everything a host needs to draw one frame.
    ///
    /// Settled cells come first, top to bottom; cells of pending rows use
    /// [`CellStyle::Outline`]. The active piece follows at its animated
    /// position. Nothing is emitted for the piece once the game is over.
    #[must_use]
    pub fn draw_primitives(&self) -> Vec<DrawPrimitive> {
        let mut primitives = vec![];
        for (row_index, row) in self.grid().rows().enumerate() {
            let style = if self.pending_rows().contains(&row_index) {
                CellStyle::Outline
            } else {
                CellStyle::Filled
            };
            for (col_index, cell) in row.cells().iter().enumerate() {
                if let Some(color) = cell {
                    primitives.push(DrawPrimitive {
                        row: cell_coord(row_index),
                        col: cell_coord(col_index),
                        color: *color,
                        style,
                    });
                }
            }
        }

        if self.is_valid()
            && let Some(piece) = self.active_piece()
        {
            let (x, depth) = piece.animated_position();
            for (r, c) in piece.occupied_cells() {
                primitives.push(DrawPrimitive {
                    row: depth + cell_coord(r),
                    col: x + cell_coord(c),
                    color: piece.color(),
                    style: CellStyle::Filled,
                });
            }
        }
        primitives
    }

    /// Status line: score and level, prefixed with "Game Over" once the game
    /// has ended.
    #[must_use]
    pub fn caption(&self) -> String {
        let status = format!("Score: {} | Level: {}", self.score(), self.level());
        if self.is_valid() {
            status
        } else {
            format!("Game Over | {status}")
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn cell_coord(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{Command, Piece, PieceSeed, ShapeKind};

    fn board() -> Board {
        Board::with_seed(BoardConfig::default(), PieceSeed::from_bytes([3; 16])).unwrap()
    }

    #[test]
    fn test_fresh_board_draws_only_active_piece() {
        let board = board();
        let piece = board.active_piece().unwrap();
        let primitives = board.draw_primitives();
        assert_eq!(primitives.len(), piece.occupied_cells().len());
        assert!(primitives.iter().all(|p| p.style.is_filled()));
        assert!(primitives.iter().all(|p| p.color == piece.color()));
        assert!(primitives.iter().all(|p| p.row < 0.0));
    }

    #[test]
    fn test_pending_rows_are_outlined() {
        let mut board = board();
        let gray = Rgb::new(200, 200, 169);
        for col in 0..8 {
            board.grid_mut().fill(15, col, gray);
        }
        board.grid_mut().fill(14, 2, gray);
        board.process_completed_rows();

        let primitives = board.draw_primitives();
        let settled = &primitives[..9];
        assert_eq!(settled[0].row, 14.0);
        assert_eq!(settled[0].col, 2.0);
        assert!(settled[0].style.is_filled());
        assert!(settled[1..].iter().all(|p| p.row == 15.0 && p.style.is_outline()));

        board.remove_completed_rows();
        let primitives = board.draw_primitives();
        assert_eq!(primitives[0].row, 15.0);
        assert!(primitives[0].style.is_filled());
    }

    #[test]
    fn test_active_piece_drawn_at_animated_position() {
        let mut board = board();
        board.handle_command(Command::MoveRight);
        board.advance_frame(Duration::ZERO);

        let piece = board.active_piece().unwrap();
        let (x, depth) = piece.animated_position();
        let (r, c) = piece.occupied_cells()[0];
        let first = board.draw_primitives()[0];
        assert!((first.col - (x + cell_coord(c))).abs() < 1e-9);
        assert!((first.row - (depth + cell_coord(r))).abs() < 1e-9);
        assert!((x - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_caption() {
        let mut board = board();
        assert_eq!(board.caption(), "Score: 0 | Level: 1");

        let mut piece = Piece::with_shape(ShapeKind::Square, 2, Rgb::new(1, 2, 3));
        piece.set_target(2, -3);
        board.set_active_piece(piece);
        for col in 0..7 {
            board.grid_mut().fill(0, col, Rgb::new(4, 5, 6));
        }
        board.advance_frame(Duration::ZERO);
        assert!(board.advance_frame(Duration::from_secs(1)).game_over);
        assert_eq!(board.caption(), "Game Over | Score: 0 | Level: 1");
        // Only the settled cells remain.
        assert_eq!(board.draw_primitives().len(), 7);
    }

    #[test]
    fn test_pixel_geometry() {
        let geometry = PixelGeometry::from_config(&BoardConfig::default());
        assert_eq!(geometry.pitch(), 32);
        assert_eq!(geometry.pixel_rect(0.0, 0.0), PixelRect {
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 30.0,
        });
        let rect = geometry.pixel_rect(2.5, 3.0);
        assert_eq!((rect.x, rect.y), (96.0, 80.0));
        assert_eq!(geometry.surface_size(8, 16), (256, 512));
    }
}
