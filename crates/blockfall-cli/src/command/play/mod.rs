use blockfall_engine::{Board, PieceSeed};
use blockfall_runtime::Runtime;

use self::app::PlayApp;
use crate::command::config::ConfigArg;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Piece sequence seed (32 hex digits); random if omitted
    #[clap(long, value_name = "HEX", value_parser = PieceSeed::from_hex)]
    seed: Option<PieceSeed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, seed } = arg;

    let config = config.load()?;
    let board = match seed {
        Some(seed) => Board::with_seed(config, *seed)?,
        None => Board::new(config)?,
    };

    let mut app = PlayApp::new(board);
    Runtime::new().run(&mut app)?;

    let board = app.board();
    let stats = board.stats();
    eprintln!(
        "{} | Pieces: {} | Rows cleared: {}",
        board.caption(),
        stats.locked_pieces(),
        stats.score()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        play: PlayArg,
    }

    #[test]
    fn test_parse_play_arguments() {
        let args = TestArgs::try_parse_from([
            "blockfall",
            "--columns",
            "10",
            "--step-interval",
            "0.25",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap();
        let config = args.play.config.load().unwrap();
        assert_eq!(config.columns, 10);
        assert_eq!(config.step_interval.as_millis(), 250);
        assert_eq!(
            args.play.seed.unwrap().to_hex(),
            "000102030405060708090a0b0c0d0e0f"
        );
    }

    #[test]
    fn test_seed_is_optional() {
        let args = TestArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.play.seed.is_none());
    }
}
