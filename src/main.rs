//! tripletile: headless host for the match-3 and collector board.

mod app;
mod command;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripletile::{AutoMode, Game, GameSettings};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let settings = args.settings()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(?settings, seed, "starting game");

    let game = Game::new(settings, seed).context("filling the board")?;
    let mut app = App::new(game, args.auto.into(), args.script);
    app.run()?;
    Ok(())
}

/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG` wins over `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Match-3 board with a bottom collector lane, driven by text commands.
#[derive(Debug, Parser)]
#[command(
    name = "tripletile",
    version,
    about = "Match-3 board with a bottom collector lane, driven by text commands.",
    long_about = "Tripletile runs a match-3 board headless. Swap neighbours to line up three or more \
        of a kind, or tap tokens down into the collector lane where three of a kind clear. \
        Clearing the board wins; filling the lane loses.\n\n\
        COMMANDS (one per line, from --script or stdin):\n  swap X1 Y1 X2 Y2   collect X Y   hint   shuffle\n  pause   resume   show   quit\n\n\
        Coordinates start at the bottom-left cell (0, 0). Lines starting with # are ignored."
)]
pub struct Args {
    /// Settings file (setting[key]=\"value\" lines). Flags override its values.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Board width in columns.
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Board height in rows.
    #[arg(long, value_name = "ROWS")]
    pub height: Option<usize>,

    /// Shortest run that counts as a match.
    #[arg(long, value_name = "N")]
    pub match_min: Option<usize>,

    /// Collector lane capacity.
    #[arg(long, value_name = "N")]
    pub bottom_cells: Option<usize>,

    /// Number of token kinds in play (2-7).
    #[arg(long, value_name = "N")]
    pub types: Option<usize>,

    /// RNG seed; random if not set.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play the collector automatically instead of reading commands.
    #[arg(short, long, default_value = "none")]
    pub auto: AutoArg,

    /// Read commands from this file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. info, debug, tripletile=trace).
    #[arg(long, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,
}

impl Args {
    /// Settings file (or defaults) with flag overrides applied, validated.
    fn settings(&self) -> Result<GameSettings> {
        let mut settings = GameSettings::load(self.settings.as_deref())
            .with_context(|| format!("loading settings {:?}", self.settings))?;
        let overrides = [
            (&mut settings.board_size_x, self.width),
            (&mut settings.board_size_y, self.height),
            (&mut settings.matches_min, self.match_min),
            (&mut settings.bottom_cell_count, self.bottom_cells),
            (&mut settings.type_count, self.types),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AutoArg {
    #[default]
    None,
    Win,
    Lose,
}

impl From<AutoArg> for AutoMode {
    fn from(arg: AutoArg) -> Self {
        match arg {
            AutoArg::None => Self::None,
            AutoArg::Win => Self::Win,
            AutoArg::Lose => Self::Lose,
        }
    }
}
