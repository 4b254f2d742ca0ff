//! Sudoku board engine.
//!
//! Owns the 9x9 grid state, generates solvable puzzles, validates moves
//! against Sudoku rules, and produces [`Move`] records for undo. The engine
//! is UI-agnostic and locale-agnostic; frontends layer session state
//! (timing, pause, persistence) on top of it.

mod board;
mod generator;
mod solver;

pub use board::{Board, Cell, Move, MoveError, NoteSet, Position};
pub use generator::{GenerateError, Generator, GeneratorConfig, RemovalPolicy};
pub use solver::Solver;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Puzzle difficulty level.
///
/// Each level maps to a fixed number of given clues; the generator removes
/// cells from a solved grid until exactly that many remain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Number of given clues a generated puzzle of this level carries.
    pub fn clue_count(self) -> usize {
        match self {
            Difficulty::Easy => 46,
            Difficulty::Medium => 38,
            Difficulty::Hard => 26,
            Difficulty::Expert => 21,
        }
    }

    /// Number of cells removed from a solved grid for this level.
    pub fn removal_count(self) -> usize {
        81 - self.clue_count()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing a difficulty name fails.
#[derive(Debug, Display, Error)]
#[display("unknown difficulty '{name}' (expected easy, medium, hard, or expert)")]
pub struct ParseDifficultyError {
    /// The rejected input.
    pub name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(ParseDifficultyError { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clue_counts_match_removals() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.clue_count() + difficulty.removal_count(), 81);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for difficulty in Difficulty::ALL {
            let parsed: Difficulty = difficulty.to_string().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
    }
}
