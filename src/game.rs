//! Game state: one board plus the play status, move count, and auto-play.

use crate::board::{Board, CollectOutcome, Signal, SwapOutcome};
use crate::error::BoardError;
use crate::grid::Pos;
use crate::settings::GameSettings;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Started,
    Paused,
    GameOver,
    GameWin,
}

/// Scripted collector play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoMode {
    #[default]
    None,
    /// Collect in an order that clears triplets before the lane fills.
    Win,
    /// Collect kinds the lane does not hold yet until it fills.
    Lose,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
    /// Resolved swaps.
    pub moves: u32,
}

impl Game {
    /// Fill a new board and start playing.
    pub fn new(settings: GameSettings, seed: u64) -> Result<Self, BoardError> {
        let mut board = Board::new(settings, seed);
        board.fill()?;
        Ok(Self::with_board(board))
    }

    /// Start playing on a prepared board.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Started,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::GameWin)
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Started {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Started;
        }
    }

    fn ensure_playing(&self) -> Result<(), BoardError> {
        if self.status == GameStatus::Started {
            Ok(())
        } else {
            Err(BoardError::NotPlaying)
        }
    }

    fn apply_signal(&mut self, signal: Option<Signal>) {
        match signal {
            Some(Signal::Win) => {
                self.status = GameStatus::GameWin;
                info!(moves = self.moves, "game won");
            }
            Some(Signal::Lose) => {
                self.status = GameStatus::GameOver;
                info!(moves = self.moves, "game lost");
            }
            None => {}
        }
    }

    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome, BoardError> {
        self.ensure_playing()?;
        let outcome = self.board.swap(a, b)?;
        if matches!(outcome, SwapOutcome::Resolved(_)) {
            self.moves += 1;
        }
        Ok(outcome)
    }

    pub fn collect(&mut self, pos: Pos) -> Result<CollectOutcome, BoardError> {
        self.ensure_playing()?;
        let outcome = self.board.remove_to_collector(pos)?;
        self.apply_signal(outcome.signal());
        Ok(outcome)
    }

    /// Cells of a potential match. Reshuffles first if the board has none; still
    /// empty afterwards means reshuffling gave up.
    pub fn hint(&mut self) -> Result<Vec<Pos>, BoardError> {
        self.ensure_playing()?;
        let hint = self.board.potential_matches();
        if !hint.is_empty() {
            return Ok(hint);
        }
        Ok(self.board.shuffle()?.hint().to_vec())
    }

    pub fn shuffle(&mut self) -> Result<(), BoardError> {
        self.ensure_playing()?;
        self.board.shuffle()?;
        Ok(())
    }

    /// One auto-play collection. `Ignored` means no token could be moved.
    pub fn auto_step(&mut self, mode: AutoMode) -> Result<CollectOutcome, BoardError> {
        self.ensure_playing()?;
        let board = &mut self.board;
        let outcome = match mode {
            AutoMode::None => CollectOutcome::Ignored,
            AutoMode::Win => {
                let free = board.bottom_cell_count() - board.total_bottom_item();
                let outcome = match board.bottom_item_type(0) {
                    Some(first) if free <= 2 => board.put_identical(first)?,
                    _ => board.put_first_item()?,
                };
                if outcome.is_ignored() {
                    board.put_first_item()?
                } else {
                    outcome
                }
            }
            AutoMode::Lose => {
                let outcome = if board.total_bottom_item() == 0 {
                    board.put_first_item()?
                } else {
                    board.put_unique()?
                };
                if outcome.is_ignored() {
                    board.put_first_item()?
                } else {
                    outcome
                }
            }
        };
        self.apply_signal(outcome.signal());
        Ok(outcome)
    }

    /// Auto-play until the game ends or no token can be collected.
    pub fn run_auto(&mut self, mode: AutoMode) -> Result<GameStatus, BoardError> {
        while self.status == GameStatus::Started && self.board.remained_board_item() > 0 {
            if self.auto_step(mode)?.is_ignored() {
                break;
            }
        }
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(bottom: usize) -> GameSettings {
        GameSettings {
            bottom_cell_count: bottom,
            ..GameSettings::default()
        }
    }

    #[test]
    fn paused_game_refuses_actions() {
        let mut game = Game::new(settings(7), 5).unwrap();
        game.pause();
        assert_eq!(game.status(), GameStatus::Paused);
        assert_eq!(game.collect(Pos::new(0, 0)), Err(BoardError::NotPlaying));
        game.resume();
        assert!(game.collect(Pos::new(0, 0)).is_ok());
    }

    /// 36 cells: every kind comes in a multiple of three.
    fn six_by_six() -> GameSettings {
        GameSettings {
            board_size_x: 6,
            board_size_y: 6,
            ..settings(7)
        }
    }

    #[test]
    fn auto_win_clears_a_fresh_board() {
        let mut game = Game::new(six_by_six(), 17).unwrap();
        assert_eq!(game.run_auto(AutoMode::Win), Ok(GameStatus::GameWin));
        assert_eq!(game.board().remained_board_item(), 0);
        assert_eq!(game.board().total_bottom_item(), 0);
    }

    #[test]
    fn auto_lose_fills_the_lane() {
        let mut game = Game::new(six_by_six(), 17).unwrap();
        assert_eq!(game.run_auto(AutoMode::Lose), Ok(GameStatus::GameOver));
        assert_eq!(game.board().total_bottom_item(), 7);
    }

    #[test]
    fn hint_reshuffles_a_board_without_moves() {
        let board = Board::from_rows(settings(7), &["AB.", ".BA", "A.A"], 4).unwrap();
        assert!(board.potential_matches().is_empty());
        let mut game = Game::with_board(board);
        let hint = game.hint().unwrap();
        assert_eq!(hint.len(), 3);
        assert_eq!(game.board().potential_matches(), hint);
        assert_eq!(game.board().grid().occupied_count(), 6);
    }

    #[test]
    fn finished_game_stays_finished() {
        let board = Board::from_rows(settings(3), &["ABC"], 1).unwrap();
        let mut game = Game::with_board(board);
        for x in 0..3 {
            game.collect(Pos::new(x, 0)).unwrap();
        }
        assert_eq!(game.status(), GameStatus::GameOver);
        game.resume();
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.hint(), Err(BoardError::NotPlaying));
    }
}
