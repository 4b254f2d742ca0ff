use crate::solver::Search;
use crate::{Board, Difficulty, Position, Solver};
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// How cells are removed from a solved grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Remove exactly the difficulty's removal count. The puzzle is always
    /// solvable (it came from a full solution) but may admit more than one
    /// solution.
    #[default]
    Solvable,
    /// Only remove a cell if the puzzle keeps exactly one solution,
    /// retrying whole generations until the target clue count is reached.
    Unique,
}

/// Puzzle generation settings.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub policy: RemovalPolicy,
    /// Generation attempts before giving up. Only the `Unique` policy can
    /// exhaust this in practice.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            policy: RemovalPolicy::default(),
            max_attempts: 50,
        }
    }
}

/// Generation failed after exhausting the attempt budget.
#[derive(Debug, Clone, Copy, Display, Error)]
#[display("puzzle generation failed after {attempts} attempts")]
pub struct GenerateError {
    pub attempts: usize,
}

/// Sudoku puzzle generator.
///
/// Fills the three diagonal boxes with shuffled digits (they constrain
/// each other not at all), completes the grid by backtracking with a
/// randomized digit order per cell, then removes cells per the configured
/// policy.
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic generator: the same seed and difficulty always
    /// produce the same puzzle.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a puzzle whose given-clue count matches `difficulty`.
    pub fn generate(&mut self, difficulty: Difficulty) -> Result<Board, GenerateError> {
        let attempts = self.config.max_attempts.max(1);
        for _ in 0..attempts {
            let solved = self.solved_values();
            let board = match self.config.policy {
                RemovalPolicy::Solvable => Some(self.remove_solvable(solved, difficulty)),
                RemovalPolicy::Unique => self.remove_unique(solved, difficulty),
            };
            if let Some(board) = board {
                return Ok(board);
            }
        }
        Err(GenerateError { attempts })
    }

    /// Produces a complete valid grid.
    fn solved_values(&mut self) -> [[u8; 9]; 9] {
        loop {
            let mut search = Search::new();
            for band in [0, 3, 6] {
                self.fill_box(&mut search, band, band);
            }
            if self.fill_from(&mut search, 0) {
                return search.values;
            }
            // Dead end cannot actually happen from diagonal boxes alone,
            // but a fresh shuffle costs nothing.
        }
    }

    /// Fills one 3x3 box with a random permutation of 1-9.
    fn fill_box(&mut self, search: &mut Search, start_row: usize, start_col: usize) {
        let mut digits: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        digits.shuffle(&mut self.rng);
        let mut idx = 0;
        for row in start_row..start_row + 3 {
            for col in start_col..start_col + 3 {
                search.place(row, col, digits[idx]);
                idx += 1;
            }
        }
    }

    /// Backtracking fill over the remaining cells, digits tried in a
    /// randomized order per cell.
    fn fill_from(&mut self, search: &mut Search, index: usize) -> bool {
        if index == 81 {
            return true;
        }
        let (row, col) = (index / 9, index % 9);
        if search.values[row][col] != 0 {
            return self.fill_from(search, index + 1);
        }
        let cand = search.candidates(row, col);
        let mut digits: Vec<u8> = (1..=9).filter(|&d| cand & (1 << (d - 1)) != 0).collect();
        digits.shuffle(&mut self.rng);
        for digit in digits {
            search.place(row, col, digit);
            if self.fill_from(search, index + 1) {
                return true;
            }
            search.remove(row, col, digit);
        }
        false
    }

    /// Blanks exactly `removal_count` random cells.
    fn remove_solvable(&mut self, mut values: [[u8; 9]; 9], difficulty: Difficulty) -> Board {
        let mut positions: Vec<Position> = Position::all().collect();
        positions.shuffle(&mut self.rng);
        for pos in positions.into_iter().take(difficulty.removal_count()) {
            values[pos.row][pos.col] = 0;
        }
        Board::from_values(&values)
    }

    /// Blanks cells only while the puzzle keeps a unique solution. Returns
    /// `None` if this pass could not reach the target clue count.
    fn remove_unique(&mut self, mut values: [[u8; 9]; 9], difficulty: Difficulty) -> Option<Board> {
        let solver = Solver::new();
        let target = difficulty.clue_count();
        let mut clues = 81;

        let mut positions: Vec<Position> = Position::all().collect();
        positions.shuffle(&mut self.rng);

        for pos in positions {
            if clues == target {
                break;
            }
            let removed = values[pos.row][pos.col];
            values[pos.row][pos.col] = 0;
            if solver.count_solutions(&Board::from_values(&values), 2) == 1 {
                clues -= 1;
            } else {
                values[pos.row][pos.col] = removed;
            }
        }

        (clues == target).then(|| Board::from_values(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_givens_consistent(board: &Board) {
        for pos in Position::all() {
            assert_eq!(board.cell(pos).is_given(), board.cell(pos).is_filled());
            assert!(!board.has_conflict(pos), "conflict at {}", pos);
        }
    }

    #[test]
    fn clue_count_matches_difficulty() {
        let mut generator = Generator::with_seed(42);
        for difficulty in Difficulty::ALL {
            let board = generator.generate(difficulty).unwrap();
            assert_eq!(board.given_count(), difficulty.clue_count());
            assert_eq!(board.empty_count(), difficulty.removal_count());
            assert_all_givens_consistent(&board);
        }
    }

    #[test]
    fn generated_puzzles_are_solvable() {
        let mut generator = Generator::with_seed(7);
        let solver = Solver::new();
        for difficulty in Difficulty::ALL {
            let board = generator.generate(difficulty).unwrap();
            assert!(solver.is_solvable(&board));
        }
    }

    #[test]
    fn unique_policy_guarantees_single_solution() {
        let config = GeneratorConfig {
            policy: RemovalPolicy::Unique,
            max_attempts: 50,
        };
        let mut generator = Generator::with_config_and_seed(config, 42);
        let board = generator.generate(Difficulty::Easy).unwrap();
        assert_eq!(board.given_count(), Difficulty::Easy.clue_count());
        assert_eq!(Solver::new().count_solutions(&board, 2), 1);
    }

    #[test]
    fn same_seed_produces_same_puzzle() {
        let a = Generator::with_seed(123).generate(Difficulty::Medium).unwrap();
        let b = Generator::with_seed(123).generate(Difficulty::Medium).unwrap();
        assert_eq!(a.to_line(), b.to_line());
    }

    #[test]
    fn different_seeds_produce_different_puzzles() {
        let a = Generator::with_seed(1).generate(Difficulty::Easy).unwrap();
        let b = Generator::with_seed(2).generate(Difficulty::Easy).unwrap();
        assert_ne!(a.to_line(), b.to_line());
    }
}
