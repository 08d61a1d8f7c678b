use std::time::Duration;

use crate::{
    BoardConfig, BoardConfigError, Command, GameStats, Piece, PieceCatalog, PieceSeed, SettledGrid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Running,
    GameOver,
}

/// Result of trying to move the active piece one row down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    Moved,
    /// The row below is taken. `above_board` is set while some occupied cell
    /// of the piece is still above row 0.
    Blocked { above_board: bool },
}

/// Asks the host for one delayed, non-repeating call to
/// [`Board::remove_completed_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRemovalRequest {
    pub delay: Duration,
}

/// What happened during one [`Board::advance_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// The gravity interval elapsed and a step was attempted.
    pub stepped: bool,
    /// The active piece was copied into the settled grid.
    pub locked: bool,
    /// Rows newly marked for removal by the lock.
    pub rows_completed: usize,
    /// Set when the host must schedule a row removal.
    pub row_removal: Option<RowRemovalRequest>,
    /// The game ended during this frame.
    pub game_over: bool,
}

/// The game engine: settled grid, active piece, scoring and gravity.
///
/// Completed rows are removed in two phases so the host can show them before
/// they disappear: locking marks them pending and returns a
/// [`RowRemovalRequest`]; the host calls [`Board::remove_completed_rows`] once
/// the requested delay has passed.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Board, BoardConfig, Command};
///
/// let mut board = Board::new(BoardConfig::default()).unwrap();
/// board.handle_command(Command::MoveLeft);
///
/// let mut now = Duration::ZERO;
/// for _ in 0..10 {
///     let report = board.advance_frame(now);
///     if report.row_removal.is_some() {
///         // A real host calls this once the requested delay has passed.
///         board.remove_completed_rows();
///     }
///     now += Duration::from_millis(500);
/// }
/// assert!(board.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    grid: SettledGrid,
    piece: Option<Piece>,
    catalog: PieceCatalog,
    stats: GameStats,
    last_step: Option<Duration>,
    pending_rows: Vec<usize>,
    state: GameState,
}

impl Board {
    /// Creates a board with a randomly seeded piece catalog.
    pub fn new(config: BoardConfig) -> Result<Self, BoardConfigError> {
        Self::with_catalog(config, PieceCatalog::new())
    }

    /// Like [`Self::new`], but with a reproducible piece sequence.
    pub fn with_seed(config: BoardConfig, seed: PieceSeed) -> Result<Self, BoardConfigError> {
        Self::with_catalog(config, PieceCatalog::with_seed(seed))
    }

    pub fn with_catalog(
        config: BoardConfig,
        catalog: PieceCatalog,
    ) -> Result<Self, BoardConfigError> {
        config.validate()?;
        let mut board = Self {
            grid: SettledGrid::new(config.columns, config.rows),
            piece: None,
            catalog,
            stats: GameStats::new(&config),
            last_step: None,
            pending_rows: vec![],
            state: GameState::Running,
            config,
        };
        board.spawn_piece();
        Ok(board)
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &SettledGrid {
        &self.grid
    }

    /// The falling piece; `None` once the game is over.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.stats.step_interval()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns `true` until the game is over.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.is_running()
    }

    /// Rows waiting for removal, top to bottom.
    #[must_use]
    pub fn pending_rows(&self) -> &[usize] {
        &self.pending_rows
    }

    /// Checks whether `piece`, shifted by the given steps from its target
    /// position, would leave the column range, reach past the bottom row, or
    /// overlap a settled cell. Cells above row 0 never hit settled cells.
    #[must_use]
    pub fn collides(&self, piece: &Piece, side_step: i32, vertical_step: i32) -> bool {
        let columns = grid_extent(self.grid.columns());
        let rows = grid_extent(self.grid.row_count());
        piece
            .board_cells(side_step, vertical_step)
            .any(|(row, col)| {
                col < 0
                    || col >= columns
                    || row >= rows
                    || (row >= 0 && self.grid.is_occupied(row, col))
            })
    }

    /// [`Self::collides`] for the active piece; `false` when there is none.
    #[must_use]
    pub fn detect_collision(&self, side_step: i32, vertical_step: i32) -> bool {
        self.piece
            .as_ref()
            .is_some_and(|piece| self.collides(piece, side_step, vertical_step))
    }

    /// Moves the active piece one column left unless that would collide.
    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    /// Moves the active piece one column right unless that would collide.
    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, side_step: i32) -> bool {
        if self.detect_collision(side_step, 0) {
            return false;
        }
        let Some(piece) = &mut self.piece else {
            return false;
        };
        if side_step < 0 {
            piece.move_left();
        } else {
            piece.move_right();
        }
        true
    }

    /// Moves the active piece one row down, or reports why it cannot.
    ///
    /// Never locks or ends the game by itself; see [`Self::advance_frame`].
    pub fn move_down(&mut self) -> DropOutcome {
        let blocked = self.detect_collision(0, 1);
        let Some(piece) = &mut self.piece else {
            return DropOutcome::Blocked { above_board: false };
        };
        if blocked {
            return DropOutcome::Blocked {
                above_board: piece.is_partially_above_board(),
            };
        }
        piece.move_down();
        DropOutcome::Moved
    }

    /// Rotates the active piece clockwise in place, undoing the rotation if
    /// the new orientation collides. No wall kicks are tried.
    pub fn rotate(&mut self) -> bool {
        let Some(mut piece) = self.piece.take() else {
            return false;
        };
        piece.rotate_clockwise();
        let rotated = !self.collides(&piece, 0, 0);
        if !rotated {
            piece.undo_rotation();
        }
        self.piece = Some(piece);
        rotated
    }

    /// Copies the active piece into the settled grid, marks completed rows
    /// pending and scores them.
    ///
    /// Cells above row 0 are dropped. Returns a removal request when new rows
    /// were completed.
    pub fn lock_and_clear(&mut self) -> Option<RowRemovalRequest> {
        let piece = self.piece.take()?;
        for (row, col) in piece.board_cells(0, 0) {
            // Row removals may have shifted the pile into the piece's cells.
            if self.grid.is_occupied(row, col) {
                continue;
            }
            let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
                continue;
            };
            self.grid.fill(row, col, piece.color());
        }
        let rows = self.scan_completed_rows();
        self.stats.record_lock(rows);
        self.removal_request(rows)
    }

    /// Marks every newly completed row as pending and scores it.
    ///
    /// Rows that are already pending keep their place and are not scored again.
    pub fn process_completed_rows(&mut self) -> Option<RowRemovalRequest> {
        let rows = self.scan_completed_rows();
        self.stats.record_rows(rows);
        self.removal_request(rows)
    }

    fn scan_completed_rows(&mut self) -> usize {
        let found: Vec<usize> = self
            .grid
            .filled_rows()
            .filter(|row| !self.pending_rows.contains(row))
            .collect();
        self.pending_rows.extend(&found);
        self.pending_rows.sort_unstable();
        found.len()
    }

    fn removal_request(&self, new_rows: usize) -> Option<RowRemovalRequest> {
        (new_rows > 0).then_some(RowRemovalRequest {
            delay: self.config.row_clear_delay,
        })
    }

    /// Removes every pending row and clears the pending set.
    ///
    /// Pending rows are removed top to bottom; removing a row only shifts the
    /// rows above it, so the remaining (lower) indices stay valid.
    pub fn apply_pending_removal(&mut self) {
        for row in self.pending_rows.drain(..) {
            self.grid.remove_row(row);
        }
    }

    /// Timer callback for a [`RowRemovalRequest`]: applies the pending
    /// removal, then re-scans for completed rows.
    pub fn remove_completed_rows(&mut self) -> Option<RowRemovalRequest> {
        self.apply_pending_removal();
        self.process_completed_rows()
    }

    /// Runs one frame at time `now` (elapsed time on the host's clock).
    ///
    /// When the step interval has passed since the last gravity step, the
    /// piece moves down one row; if it cannot, it locks and a new piece
    /// spawns. The game ends if the locked piece had not fully entered the
    /// board or the new piece cannot move down. The first call only starts
    /// the gravity clock. The animated position advances on every call.
    pub fn advance_frame(&mut self, now: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        if self.state.is_running() {
            match self.last_step {
                None => self.last_step = Some(now),
                Some(last) if now.saturating_sub(last) >= self.stats.step_interval() => {
                    report.stepped = true;
                    if let DropOutcome::Blocked { above_board } = self.move_down() {
                        self.settle(above_board, &mut report);
                    }
                    self.last_step = Some(now);
                }
                Some(_) => {}
            }
        }
        if let Some(piece) = &mut self.piece {
            piece.advance_animation(self.config.ease_factor);
        }
        report
    }

    fn settle(&mut self, above_board: bool, report: &mut FrameReport) {
        let rows_before = self.pending_rows.len();
        report.locked = true;
        report.row_removal = self.lock_and_clear();
        report.rows_completed = self.pending_rows.len() - rows_before;
        if above_board {
            self.game_over();
            report.game_over = true;
            return;
        }
        self.spawn_piece();
        if self.detect_collision(0, 1) {
            self.game_over();
            report.game_over = true;
        }
    }

    fn spawn_piece(&mut self) {
        let column = grid_extent(self.config.spawn_column());
        self.piece = Some(self.catalog.spawn(column));
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        self.piece = None;
    }

    /// Resets the board to a new game. The piece catalog keeps its sequence.
    pub fn restart(&mut self) {
        self.grid = SettledGrid::new(self.config.columns, self.config.rows);
        self.stats = GameStats::new(&self.config);
        self.last_step = None;
        self.pending_rows.clear();
        self.state = GameState::Running;
        self.spawn_piece();
    }

    /// Applies one player command. Everything but [`Command::RestartGame`]
    /// is ignored once the game is over.
    pub fn handle_command(&mut self, command: Command) {
        if command == Command::RestartGame {
            self.restart();
            return;
        }
        if self.state.is_game_over() {
            return;
        }
        match command {
            Command::RotateClockwise => {
                self.rotate();
            }
            Command::MoveLeft => {
                self.move_left();
            }
            Command::MoveRight => {
                self.move_right();
            }
            Command::SoftDrop => {
                self.move_down();
            }
            Command::RestartGame => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut SettledGrid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_active_piece(&mut self, piece: Piece) {
        self.piece = Some(piece);
    }

    /// Transition-function form of [`Self::handle_command`].
    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.handle_command(command);
        self
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn grid_extent(n: usize) -> i32 {
    n as i32
}
