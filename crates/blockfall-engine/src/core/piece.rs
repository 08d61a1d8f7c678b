use arrayvec::ArrayVec;

use super::{
    color::Rgb,
    shape::{MAX_SHAPE_SIZE, ShapeGrid, ShapeKind},
};

/// Maximum number of occupied cells any shape can have.
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// A falling piece: shape state, logical target position and animated position.
///
/// # Coordinate System
///
/// - `x_target` is the board column of the local frame's left edge
/// - `depth_target` is the board row of the local frame's top edge; it is
///   negative while the piece is still entering from above the board
/// - `(x, depth)` trails the targets and eases toward them once per frame;
///   it only exists for rendering, gameplay logic reads the targets
///
/// Rotation keeps exactly one level of history: the state before the most
/// recent rotation, which [`Piece::undo_rotation`] restores.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, Rgb, ShapeKind};
///
/// let mut piece = Piece::with_shape(ShapeKind::T, 3, Rgb::new(255, 0, 0));
/// let before = *piece.rotation_grid();
/// piece.rotate_clockwise();
/// piece.undo_rotation();
/// assert_eq!(*piece.rotation_grid(), before);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: ShapeKind,
    state: ShapeGrid,
    previous_state: ShapeGrid,
    x_target: i32,
    depth_target: i32,
    x: f64,
    depth: f64,
    color: Rgb,
}

impl Piece {
    /// Creates an unrotated piece fully above the board at the given column.
    #[must_use]
    pub fn with_shape(kind: ShapeKind, column: i32, color: Rgb) -> Self {
        let state = kind.template();
        let depth_target = -shape_size(&state);
        Self {
            kind,
            state,
            previous_state: state,
            x_target: column,
            depth_target,
            x: f64::from(column),
            depth: f64::from(depth_target),
            color,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Side length `N` of the local frame.
    #[must_use]
    pub fn size(&self) -> usize {
        self.state.size()
    }

    #[must_use]
    pub fn rotation_grid(&self) -> &ShapeGrid {
        &self.state
    }

    #[must_use]
    pub fn x_target(&self) -> i32 {
        self.x_target
    }

    #[must_use]
    pub fn depth_target(&self) -> i32 {
        self.depth_target
    }

    /// The animated `(x, depth)` position used for drawing.
    #[must_use]
    pub fn animated_position(&self) -> (f64, f64) {
        (self.x, self.depth)
    }

    /// See [`ShapeGrid::is_occupied`].
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..size`.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.state.is_occupied(row, col)
    }

    /// Occupied `(row, col)` offsets in the local frame.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(usize, usize), MAX_PIECE_CELLS> {
        self.state.occupied_cells().collect()
    }

    /// Occupied `(row, col)` board coordinates at the target position shifted
    /// by `(vertical_step, side_step)`. Rows may be negative.
    pub fn board_cells(
        &self,
        side_step: i32,
        vertical_step: i32,
    ) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.state.occupied_cells().map(move |(r, c)| {
            (
                self.depth_target + local(r) + vertical_step,
                self.x_target + local(c) + side_step,
            )
        })
    }

    /// Returns whether any occupied cell sits above row 0 at the target position.
    #[must_use]
    pub fn is_partially_above_board(&self) -> bool {
        self.board_cells(0, 0).any(|(row, _)| row < 0)
    }

    fn replace_state(&mut self, state: ShapeGrid) {
        self.previous_state = self.state;
        self.state = state;
    }

    pub fn rotate_clockwise(&mut self) {
        self.replace_state(self.state.rotated_clockwise());
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.replace_state(self.state.rotated_counterclockwise());
    }

    pub fn rotate_180(&mut self) {
        self.replace_state(self.state.rotated_180());
    }

    /// Restores the state saved by the most recent rotation.
    pub fn undo_rotation(&mut self) {
        self.state = self.previous_state;
    }

    pub fn move_left(&mut self) {
        self.x_target -= 1;
    }

    pub fn move_right(&mut self) {
        self.x_target += 1;
    }

    pub fn move_down(&mut self) {
        self.depth_target += 1;
    }

    /// Moves the animated position `ease_factor` of the remaining distance
    /// toward the target.
    pub fn advance_animation(&mut self, ease_factor: f64) {
        self.x += ease_factor * (f64::from(self.x_target) - self.x);
        self.depth += ease_factor * (f64::from(self.depth_target) - self.depth);
    }

    #[cfg(test)]
    pub(crate) fn set_target(&mut self, x_target: i32, depth_target: i32) {
        self.x_target = x_target;
        self.depth_target = depth_target;
        self.x = f64::from(x_target);
        self.depth = f64::from(depth_target);
    }
}

#[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn local(offset: usize) -> i32 {
    // offsets are below MAX_SHAPE_SIZE
    offset as i32
}

fn shape_size(grid: &ShapeGrid) -> i32 {
    local(grid.size())
}
