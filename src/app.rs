//! App: headless host loop. Reads commands, applies them to the game, prints outcomes.

use crate::command::{Command, parse_command};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tripletile::{AutoMode, CollectOutcome, Game, GameStatus, Pos, SwapOutcome};

pub struct App {
    game: Game,
    auto: AutoMode,
    script: Option<PathBuf>,
}

impl App {
    pub fn new(game: Game, auto: AutoMode, script: Option<PathBuf>) -> Self {
        Self { game, auto, script }
    }

    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.auto != AutoMode::None {
            return self.auto_play(&mut out);
        }
        match self.script.clone() {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("opening script {}", path.display()))?;
                self.run_with(BufReader::new(file), &mut out)
            }
            None => self.run_with(io::stdin().lock(), &mut out),
        }
    }

    fn auto_play<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let status = self.game.run_auto(self.auto)?;
        write!(out, "{}", self.game.board())?;
        match status {
            GameStatus::GameWin => writeln!(out, "WIN")?,
            GameStatus::GameOver => writeln!(out, "LOSE")?,
            GameStatus::Started | GameStatus::Paused => writeln!(out, "stopped: nothing left to collect")?,
        }
        Ok(())
    }

    /// Process command lines until `quit`, end of input, or a finished game.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "{}", self.game.board())?;
        for (n, line) in input.lines().enumerate() {
            let line = line.context("reading command")?;
            let command = match parse_command(&line) {
                Ok(c) => c,
                Err(e) => {
                    warn!(line = n + 1, "{e}");
                    writeln!(out, "error: {e}")?;
                    continue;
                }
            };
            debug!(?command, "command");
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.apply(command, out) {
                writeln!(out, "error: {e}")?;
            }
            if self.game.is_over() {
                let verdict = if self.game.status() == GameStatus::GameWin { "WIN" } else { "LOSE" };
                writeln!(out, "{verdict}")?;
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Swap(a, b) => match self.game.swap(a, b)? {
                SwapOutcome::Reverted => writeln!(out, "swap {a} {b}: no match, reverted")?,
                SwapOutcome::Resolved(report) => {
                    writeln!(
                        out,
                        "swap {a} {b}: {} exploded, {} bonus",
                        report.exploded(),
                        report.bonuses().len()
                    )?;
                    if report.is_stuck() {
                        writeln!(out, "no moves left")?;
                    }
                }
            },
            Command::Collect(pos) => match self.game.collect(pos)? {
                CollectOutcome::Ignored => writeln!(out, "collect {pos}: ignored")?,
                CollectOutcome::Collected {
                    placement,
                    settlement,
                    ..
                } => {
                    write!(
                        out,
                        "collect {pos}: {} into slot {}",
                        placement.item.letter(),
                        placement.index
                    )?;
                    if settlement.cleared_from.is_some() {
                        write!(out, ", triplet cleared")?;
                    }
                    writeln!(out)?;
                }
            },
            Command::Hint => {
                let hint = self.game.hint()?;
                if hint.is_empty() {
                    writeln!(out, "hint: no moves")?;
                } else {
                    let cells: Vec<String> = hint.iter().map(Pos::to_string).collect();
                    writeln!(out, "hint: {}", cells.join(" "))?;
                }
            }
            Command::Shuffle => {
                self.game.shuffle()?;
                writeln!(out, "shuffled")?;
            }
            Command::Pause => {
                self.game.pause();
                writeln!(out, "paused")?;
            }
            Command::Resume => {
                self.game.resume();
                writeln!(out, "resumed")?;
            }
            Command::Show => write!(out, "{}", self.game.board())?,
            Command::Quit | Command::None => {}
        }
        Ok(())
    }
}
