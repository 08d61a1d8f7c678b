use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BoardConfigError;

/// Widest shape template; the spawn column must leave this much room.
const MIN_COLUMNS: usize = 4;

/// Construction-time settings of a [`Board`](crate::Board).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use blockfall_engine::BoardConfig;
///
/// let config: BoardConfig = serde_json::from_str(r#"{ "columns": 10 }"#).unwrap();
/// assert_eq!(config.columns, 10);
/// assert_eq!(config.rows, 16);
/// assert_eq!(config.spawn_column(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
    /// Edge length of one drawn cell, in pixels.
    pub cell_size: u32,
    /// Gap around each drawn cell, in pixels.
    pub padding: u32,
    /// Gravity period at level 1.
    #[serde(rename = "step_interval_ms", with = "duration_millis")]
    pub step_interval: Duration,
    /// Delay between detecting completed rows and removing them.
    #[serde(rename = "row_clear_delay_ms", with = "duration_millis")]
    pub row_clear_delay: Duration,
    /// Column of the spawn frame's left edge; `None` centers it.
    pub spawn_column: Option<usize>,
    /// Fraction of the remaining distance the animated position covers per frame.
    pub ease_factor: f64,
    /// Factor applied to the step interval on every level-up.
    pub level_speedup: f64,
    /// Score points needed per level.
    pub rows_per_level: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 16,
            cell_size: 30,
            padding: 1,
            step_interval: Duration::from_millis(500),
            row_clear_delay: Duration::from_millis(200),
            spawn_column: None,
            ease_factor: 0.2,
            level_speedup: 0.9,
            rows_per_level: 10,
        }
    }
}

impl BoardConfig {
    /// Returns the effective spawn column.
    #[must_use]
    pub fn spawn_column(&self) -> usize {
        self.spawn_column.unwrap_or_else(|| {
            (self.columns / 2)
                .saturating_sub(1)
                .min(self.columns.saturating_sub(MIN_COLUMNS))
        })
    }

    /// Checks that a board can be built from this configuration.
    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.columns < MIN_COLUMNS {
            return Err(BoardConfigError::TooFewColumns {
                columns: self.columns,
                min: MIN_COLUMNS,
            });
        }
        if self.rows == 0 {
            return Err(BoardConfigError::NoRows);
        }
        let column = self.spawn_column();
        if column + MIN_COLUMNS > self.columns {
            return Err(BoardConfigError::SpawnColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        if self.step_interval.is_zero() {
            return Err(BoardConfigError::NonPositiveStepInterval);
        }
        if !(self.ease_factor > 0.0 && self.ease_factor <= 1.0) {
            return Err(BoardConfigError::InvalidEaseFactor(self.ease_factor));
        }
        if !(self.level_speedup > 0.0 && self.level_speedup <= 1.0) {
            return Err(BoardConfigError::InvalidLevelSpeedup(self.level_speedup));
        }
        if self.rows_per_level == 0 {
            return Err(BoardConfigError::NoRowsPerLevel);
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
