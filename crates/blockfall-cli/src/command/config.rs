use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use blockfall_engine::BoardConfig;

use crate::util;

/// Board configuration sources. Command line values override the file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Board configuration file (JSON)
    #[clap(long = "config", value_name = "FILE")]
    config_path: Option<PathBuf>,
    /// Number of columns
    #[clap(long)]
    columns: Option<usize>,
    /// Number of rows
    #[clap(long)]
    rows: Option<usize>,
    /// Initial gravity step interval in seconds
    #[clap(long, value_name = "SECS")]
    step_interval: Option<f64>,
    /// Delay before completed rows are removed, in milliseconds
    #[clap(long, value_name = "MS")]
    row_clear_delay_ms: Option<u64>,
}

impl ConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<BoardConfig> {
        let Self {
            config_path,
            columns,
            rows,
            step_interval,
            row_clear_delay_ms,
        } = self;

        let mut config = match config_path {
            Some(path) => {
                eprintln!("Loading board configuration from {}", path.display());
                util::read_json_file::<BoardConfig, _>("board configuration", path)?
            }
            None => BoardConfig::default(),
        };
        if let Some(columns) = columns {
            config.columns = *columns;
        }
        if let Some(rows) = rows {
            config.rows = *rows;
        }
        if let Some(secs) = step_interval {
            config.step_interval = Duration::try_from_secs_f64(*secs)
                .with_context(|| format!("Invalid step interval: {secs}"))?;
        }
        if let Some(ms) = row_clear_delay_ms {
            config.row_clear_delay = Duration::from_millis(*ms);
        }
        config
            .validate()
            .context("Invalid board configuration")?;
        Ok(config)
    }
}

pub(crate) fn show(arg: &ConfigArg) -> anyhow::Result<()> {
    let config = arg.load()?;
    util::print_json(&config)
}
