use std::io;

use clap::Parser;
use gambit::session::{self, Session};
use log::LevelFilter;

/// Checks and plays chess moves read from the standard input.
///
/// Commands: "move e2e4", "check e2e4", "moves g1", "position startpos",
/// "position fen <placement> [w|b]", "new", "status", "d", "quit".
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Piece placement field of FEN to start from instead of the standard
    /// initial layout.
    #[arg(long)]
    fen: Option<String>,
    /// Side to move first: 'w' or 'b'.
    #[arg(long, default_value = "w")]
    side: String,
    /// Verbosity of the logs written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn setup_logging(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_logging(config.log_level)?;
    gambit::log_binary_info();
    log::debug!("{config:?}");
    let game = session::parse_game(config.fen.as_deref(), Some(config.side.as_str()))?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Session::new(game, &mut input, &mut output).run()
}
