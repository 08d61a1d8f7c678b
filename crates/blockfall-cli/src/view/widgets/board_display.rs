use blockfall_engine::Board;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::CellDisplay;

/// Settled grid and active piece, drawn from [`Board::draw_primitives`].
///
/// The active piece is snapped to the nearest cell of its animated position.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        terminal_extent(self.board.grid().columns()) * CellDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        terminal_extent(self.board.grid().row_count()) * CellDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let columns = self.board.grid().columns();
        let rows = self.board.grid().row_count();
        let cell_area = |row: u16, col: u16| {
            Rect::new(
                area.x + col * CellDisplay::WIDTH,
                area.y + row * CellDisplay::HEIGHT,
                CellDisplay::WIDTH,
                CellDisplay::HEIGHT,
            )
            .intersection(area)
        };

        for row in 0..terminal_extent(rows) {
            for col in 0..terminal_extent(columns) {
                CellDisplay::EMPTY.render(cell_area(row, col), buf);
            }
        }
        for primitive in self.board.draw_primitives() {
            let (Some(row), Some(col)) = (
                snap(primitive.row, rows),
                snap(primitive.col, columns),
            ) else {
                continue;
            };
            CellDisplay::from_primitive(&primitive).render(cell_area(row, col), buf);
        }
    }
}

fn terminal_extent(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Nearest cell index, or `None` outside `0..limit`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn snap(value: f64, limit: usize) -> Option<u16> {
    let index = value.round();
    (index >= 0.0 && index < limit as f64).then(|| index as u16)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{BoardConfig, Command, PieceSeed};
    use ratatui::style::Color;

    use super::*;
    use crate::view::widgets::style;

    fn locked_board() -> Board {
        let seed = PieceSeed::from_bytes([5; 16]);
        let mut board = Board::with_seed(BoardConfig::default(), seed).unwrap();
        for _ in 0..40 {
            board.handle_command(Command::SoftDrop);
        }
        board.advance_frame(Duration::ZERO);
        board.advance_frame(Duration::from_secs(1));
        assert_eq!(board.stats().locked_pieces(), 1);
        board
    }

    #[test]
    fn test_size_includes_block_margin() {
        let board = locked_board();
        let display = BoardDisplay::new(&board);
        assert_eq!((display.width(), display.height()), (16, 16));
        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (18, 18));
    }

    #[test]
    fn test_settled_cells_are_drawn() {
        let board = locked_board();
        let area = Rect::new(0, 0, 16, 16);
        let mut buf = Buffer::empty(area);
        BoardDisplay::new(&board).render(area, &mut buf);

        let mut drawn = 0;
        for (row, grid_row) in board.grid().rows().enumerate() {
            for (col, cell) in grid_row.cells().iter().enumerate() {
                let x = u16::try_from(col).unwrap() * CellDisplay::WIDTH;
                let y = u16::try_from(row).unwrap();
                let left = &buf[(x, y)];
                let right = &buf[(x + 1, y)];
                match cell {
                    Some(color) => {
                        drawn += 1;
                        assert_eq!(left.symbol(), "█");
                        assert_eq!(right.symbol(), "█");
                        assert_eq!(left.fg, style::color(*color));
                    }
                    None => {
                        assert_eq!(left.symbol(), " ");
                        assert_eq!(right.symbol(), ".");
                        assert_eq!(right.fg, Color::Rgb(127, 127, 127));
                    }
                }
            }
        }
        assert_eq!(drawn, 4);
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(-0.6, 8), None);
        assert_eq!(snap(-0.4, 8), Some(0));
        assert_eq!(snap(3.5, 8), Some(4));
        assert_eq!(snap(7.4, 8), Some(7));
        assert_eq!(snap(7.5, 8), None);
    }
}
