use std::time::Duration;

use crate::BoardConfig;

/// Score, level and gravity speed of one game.
///
/// - **Score**: one point per completed row
/// - **Level**: starts at 1, +1 each time the score reaches the next multiple
///   of `rows_per_level`
/// - **Step interval**: multiplied by `level_speedup` on every level-up, so
///   after the k-th level-up it is `initial * speedup^k`
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{BoardConfig, GameStats};
///
/// let mut stats = GameStats::new(&BoardConfig::default());
/// stats.record_lock(2);
/// stats.record_lock(8);
///
/// assert_eq!(stats.score(), 10);
/// assert_eq!(stats.level(), 2);
/// assert_eq!(stats.step_interval(), Duration::from_millis(450));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameStats {
    score: usize,
    level: usize,
    step_interval: Duration,
    rows_per_level: usize,
    level_speedup: f64,
    locked_pieces: usize,
    rows_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            step_interval: config.step_interval,
            rows_per_level: config.rows_per_level,
            level_speedup: config.level_speedup,
            locked_pieces: 0,
            rows_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Current gravity period.
    #[must_use]
    pub const fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Number of pieces locked into the pile so far.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Histogram of rows completed per lock; index 4 also counts larger clears.
    #[must_use]
    pub const fn rows_cleared_counter(&self) -> &[usize; 5] {
        &self.rows_cleared_counter
    }

    /// Records one locked piece that completed `rows` rows.
    pub fn record_lock(&mut self, rows: usize) {
        self.locked_pieces += 1;
        self.rows_cleared_counter[rows.min(4)] += 1;
        self.record_rows(rows);
    }

    /// Adds one point per completed row, leveling up as thresholds are crossed.
    pub fn record_rows(&mut self, rows: usize) {
        self.score += rows;
        while self.score >= self.level * self.rows_per_level {
            self.level += 1;
            self.step_interval = self.step_interval.mul_f64(self.level_speedup);
        }
    }
}
