use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use sudoku_engine::{
    Board, Difficulty, GenerateError, Generator, Move, MoveError, Position,
};

/// A single game session: the board, its move history, and timing.
///
/// The session walks New -> InProgress -> (Paused <-> InProgress) ->
/// Complete. Pausing suspends the clock; edits on a paused or completed
/// session are silent no-ops since that input is suppressed, not invalid.
pub struct Game {
    board: Board,
    /// Undo stack, oldest move first.
    history: Vec<Move>,
    difficulty: Difficulty,
    start_time: Instant,
    elapsed: Duration,
    paused: bool,
    completed: bool,
}

impl Game {
    /// Starts a new game at the given difficulty. A seed makes the puzzle
    /// reproducible.
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Result<Self, GenerateError> {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        let board = generator.generate(difficulty)?;
        Ok(Self {
            board,
            history: Vec::new(),
            difficulty,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
        })
    }

    /// Restores a session from a saved snapshot. The game resumes paused;
    /// the player unpauses deliberately.
    pub fn from_saved(saved: SavedGame) -> Self {
        Self {
            board: saved.board,
            history: saved.history,
            difficulty: saved.difficulty,
            start_time: Instant::now(),
            elapsed: Duration::from_secs(saved.elapsed_secs),
            paused: true,
            completed: false,
        }
    }

    /// Snapshot for persistence.
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            board: self.board.clone(),
            history: self.history.clone(),
            difficulty: self.difficulty,
            elapsed_secs: self.elapsed().as_secs(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Time played so far; frozen while paused and after completion.
    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }
        if self.paused {
            self.start_time = Instant::now();
        } else {
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    /// Places a digit, recording the move for undo. Flips the session to
    /// Complete when the board is correctly filled.
    pub fn place(&mut self, pos: Position, digit: u8) -> Result<(), MoveError> {
        if self.paused || self.completed {
            return Ok(());
        }
        let mv = self.board.place(pos, digit)?;
        self.history.push(mv);
        if self.board.is_complete() {
            self.completed = true;
            self.elapsed += self.start_time.elapsed();
        }
        Ok(())
    }

    /// Erases a cell's value and notes, recording the move.
    pub fn clear(&mut self, pos: Position) -> Result<(), MoveError> {
        if self.paused || self.completed {
            return Ok(());
        }
        let mv = self.board.clear(pos)?;
        self.history.push(mv);
        Ok(())
    }

    /// Toggles a candidate note, recording the move.
    pub fn toggle_note(&mut self, pos: Position, digit: u8) -> Result<(), MoveError> {
        if self.paused || self.completed {
            return Ok(());
        }
        let mv = self.board.toggle_note(pos, digit)?;
        self.history.push(mv);
        Ok(())
    }

    /// Reverts the most recent move. Returns `false` when there is nothing
    /// to undo or the session does not accept input.
    pub fn undo(&mut self) -> bool {
        if self.paused || self.completed {
            return false;
        }
        match self.history.pop() {
            Some(mv) => {
                self.board.revert(&mv);
                true
            }
            None => false,
        }
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }
}

/// Persisted form of an in-progress game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub history: Vec<Move>,
    pub difficulty: Difficulty,
    pub elapsed_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Solved grid with two cells blanked: (0,0)=5 and (0,1)=3.
    const TWO_LEFT: &str =
        "004678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn game_from(line: &str) -> Game {
        Game::from_saved(SavedGame {
            board: Board::from_string(line).unwrap(),
            history: Vec::new(),
            difficulty: Difficulty::Easy,
            elapsed_secs: 0,
        })
    }

    #[test]
    fn place_then_undo_restores_board() {
        let mut game = game_from(TWO_LEFT);
        game.toggle_pause(); // saved games resume paused
        let before = game.board().clone();

        let pos = Position::new(0, 0);
        game.toggle_note(pos, 5).unwrap();
        game.place(pos, 5).unwrap();
        assert_eq!(game.moves_made(), 2);

        assert!(game.undo());
        assert!(game.undo());
        assert_eq!(*game.board(), before);
        assert!(!game.undo(), "empty history undo reports a no-op");
    }

    #[test]
    fn paused_session_ignores_edits() {
        let mut game = game_from(TWO_LEFT);
        assert!(game.is_paused());
        let before = game.board().clone();

        game.place(Position::new(0, 0), 5).unwrap();
        game.toggle_note(Position::new(0, 0), 5).unwrap();
        assert!(!game.undo());
        assert_eq!(*game.board(), before);
        assert_eq!(game.moves_made(), 0);
    }

    #[test]
    fn completing_the_board_finishes_the_session() {
        let mut game = game_from(TWO_LEFT);
        game.toggle_pause();
        game.place(Position::new(0, 0), 5).unwrap();
        assert!(!game.is_completed());

        game.place(Position::new(0, 1), 3).unwrap();
        assert!(game.is_completed());

        // Completed sessions freeze time and reject further edits.
        let frozen = game.elapsed();
        assert!(!game.undo());
        game.toggle_pause();
        assert!(!game.is_paused());
        assert_eq!(game.elapsed(), frozen);
    }

    #[test]
    fn saved_game_round_trips_through_json() {
        let mut game = game_from(TWO_LEFT);
        game.toggle_pause();
        game.toggle_note(Position::new(0, 0), 5).unwrap();

        let saved = game.to_saved();
        let json = serde_json::to_string(&saved).unwrap();
        let restored: SavedGame = serde_json::from_str(&json).unwrap();
        let resumed = Game::from_saved(restored);

        assert_eq!(*resumed.board(), *game.board());
        assert_eq!(resumed.moves_made(), 1);
        assert_eq!(resumed.difficulty(), Difficulty::Easy);
        assert!(resumed.is_paused());
    }

    #[test]
    fn fresh_games_match_their_difficulty() {
        let game = Game::new(Difficulty::Medium, Some(9)).unwrap();
        assert_eq!(game.board().given_count(), Difficulty::Medium.clue_count());
        assert!(!game.is_paused());
        assert!(!game.is_completed());
    }
}
