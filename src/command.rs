//! Host commands: one per line, from a script file or stdin.

use thiserror::Error;
use tripletile::Pos;

/// Action from a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swap(Pos, Pos),
    Collect(Pos),
    Hint,
    Shuffle,
    Pause,
    Resume,
    Show,
    Quit,
    /// Blank line or `#` comment.
    None,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command} expects {expected} coordinates, got {got}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("bad coordinate: {0}")]
    Coordinate(String),
}

fn coords(command: &'static str, args: &[&str], expected: usize) -> Result<Vec<usize>, CommandError> {
    if args.len() != expected {
        return Err(CommandError::Arity {
            command,
            expected,
            got: args.len(),
        });
    }
    args.iter()
        .map(|a| a.parse().map_err(|_| CommandError::Coordinate((*a).to_string())))
        .collect()
}

/// Map one input line to a command. Keywords are case-insensitive.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Command::None);
    }
    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();
    let bare = |command: Command| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::Unknown(line.to_string()))
        }
    };
    match keyword.as_str() {
        "swap" | "s" => {
            let c = coords("swap", &args, 4)?;
            Ok(Command::Swap(Pos::new(c[0], c[1]), Pos::new(c[2], c[3])))
        }
        "collect" | "c" => {
            let c = coords("collect", &args, 2)?;
            Ok(Command::Collect(Pos::new(c[0], c[1])))
        }
        "hint" => bare(Command::Hint),
        "shuffle" => bare(Command::Shuffle),
        "pause" | "p" => bare(Command::Pause),
        "resume" => bare(Command::Resume),
        "show" => bare(Command::Show),
        "quit" | "q" | "exit" => bare(Command::Quit),
        _ => Err(CommandError::Unknown(line.to_string())),
    }
}
