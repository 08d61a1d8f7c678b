use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Side length of the largest shape template.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy bitmap of a piece in its local frame.
///
/// The grid is `size × size` with `size` being 3 or 4; row 0 is the top row.
/// Rotations are pure functions returning a new grid, so one piece can keep an
/// independent copy of its previous state for rollback.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeGrid {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeGrid {
    const fn from_bits<const N: usize>(bits: [[u8; N]; N]) -> Self {
        assert!(N <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size: N, cells }
    }

    /// Side length `N` of the local frame.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the cell at `(row, col)` of the local frame is occupied.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..size`.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {n}x{n} shape",
            n = self.size
        );
        self.cells[row][col]
    }

    /// Iterates over the occupied `(row, col)` offsets in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| self.cells[row][col].then_some((row, col)))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied_cells().count()
    }

    fn remap(&self, source: impl Fn(usize, usize, usize) -> (usize, usize)) -> Self {
        let n = self.size;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                let (sr, sc) = source(n, r, c);
                *cell = self.cells[sr][sc];
            }
        }
        Self { size: n, cells }
    }

    /// Quarter turn clockwise: `new[r][c] = old[N-1-c][r]`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        self.remap(|n, r, c| (n - 1 - c, r))
    }

    /// Quarter turn counterclockwise: `new[r][c] = old[c][N-1-r]`.
    #[must_use]
    pub fn rotated_counterclockwise(&self) -> Self {
        self.remap(|n, r, c| (c, n - 1 - r))
    }

    /// Half turn: `new[r][c] = old[N-1-r][N-1-c]`.
    #[must_use]
    pub fn rotated_180(&self) -> Self {
        self.remap(|n, r, c| (n - 1 - r, n - 1 - c))
    }
}

impl fmt::Debug for ShapeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeGrid(\"{self}\")")
    }
}

/// Rows joined by `/`, `#` for occupied and `.` for empty (e.g. `".#./###/..."`).
impl fmt::Display for ShapeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            if r > 0 {
                f.write_str("/")?;
            }
            for c in 0..self.size {
                f.write_str(if self.cells[r][c] { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// The seven canonical tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    Square = 0,
    Line = 1,
    LeftL = 2,
    RightL = 3,
    LeftS = 4,
    RightS = 5,
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::Square,
        Self::Line,
        Self::LeftL,
        Self::RightL,
        Self::LeftS,
        Self::RightS,
        Self::T,
    ];

    /// The immutable spawn-orientation template of this shape.
    #[must_use]
    pub const fn template(self) -> ShapeGrid {
        SHAPE_TEMPLATES[self as usize]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Line => "line",
            Self::LeftL => "left-L",
            Self::RightL => "right-L",
            Self::LeftS => "left-S",
            Self::RightS => "right-S",
            Self::T => "T",
        }
    }
}

const SHAPE_TEMPLATES: [ShapeGrid; ShapeKind::LEN] = [
    // Square
    ShapeGrid::from_bits([[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    // Line
    ShapeGrid::from_bits([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // LeftL
    ShapeGrid::from_bits([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
    // RightL
    ShapeGrid::from_bits([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
    // LeftS
    ShapeGrid::from_bits([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    // RightS
    ShapeGrid::from_bits([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    // T
    ShapeGrid::from_bits([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
];
