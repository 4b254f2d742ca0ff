use crate::{Board, Position};

const ALL_DIGITS: u16 = 0x1FF;

/// Backtracking solver backing puzzle generation and uniqueness checks.
///
/// Always branches on the most constrained empty cell, which keeps the
/// search shallow on the boards the generator produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solves the board, returning a filled copy. Player-entered values are
    /// treated as constraints just like given clues.
    pub fn solve(&self, board: &Board) -> Option<Board> {
        let mut search = Search::from_board(board)?;
        if !search.solve_first() {
            return None;
        }
        let mut solved = board.clone();
        for pos in Position::all() {
            if solved.cell(pos).is_empty() {
                solved.set_value_unchecked(pos, Some(search.values[pos.row][pos.col]));
            }
        }
        Some(solved)
    }

    /// Counts solutions, stopping early once `limit` is reached. A return
    /// of `0` means unsolvable; `1` with `limit >= 2` proves uniqueness.
    pub fn count_solutions(&self, board: &Board, limit: usize) -> usize {
        let Some(mut search) = Search::from_board(board) else {
            return 0;
        };
        let mut found = 0;
        search.count(limit, &mut found);
        found
    }

    pub fn is_solvable(&self, board: &Board) -> bool {
        self.count_solutions(board, 1) > 0
    }
}

/// Working state for the search: values plus one used-digit bitmask per
/// row, column, and box.
pub(crate) struct Search {
    pub(crate) values: [[u8; 9]; 9],
    rows: [u16; 9],
    cols: [u16; 9],
    boxes: [u16; 9],
}

impl Search {
    pub(crate) fn new() -> Self {
        Self {
            values: [[0; 9]; 9],
            rows: [0; 9],
            cols: [0; 9],
            boxes: [0; 9],
        }
    }

    /// Returns `None` if the board's existing values already conflict.
    fn from_board(board: &Board) -> Option<Self> {
        let mut search = Search::new();
        for pos in Position::all() {
            if let Some(digit) = board.value(pos) {
                let bit = 1u16 << (digit - 1);
                if search.used_at(pos.row, pos.col) & bit != 0 {
                    return None;
                }
                search.place(pos.row, pos.col, digit);
            }
        }
        Some(search)
    }

    fn used_at(&self, row: usize, col: usize) -> u16 {
        self.rows[row] | self.cols[col] | self.boxes[(row / 3) * 3 + col / 3]
    }

    /// Digits still legal at (row, col), as a bitmask.
    pub(crate) fn candidates(&self, row: usize, col: usize) -> u16 {
        !self.used_at(row, col) & ALL_DIGITS
    }

    pub(crate) fn place(&mut self, row: usize, col: usize, digit: u8) {
        let bit = 1u16 << (digit - 1);
        self.values[row][col] = digit;
        self.rows[row] |= bit;
        self.cols[col] |= bit;
        self.boxes[(row / 3) * 3 + col / 3] |= bit;
    }

    pub(crate) fn remove(&mut self, row: usize, col: usize, digit: u8) {
        let bit = 1u16 << (digit - 1);
        self.values[row][col] = 0;
        self.rows[row] &= !bit;
        self.cols[col] &= !bit;
        self.boxes[(row / 3) * 3 + col / 3] &= !bit;
    }

    /// Empty cell with the fewest candidates, or `None` when the grid is
    /// full. Dead ends surface as a cell with an empty candidate mask.
    fn best_cell(&self) -> Option<(usize, usize, u16)> {
        let mut best: Option<(usize, usize, u16)> = None;
        for row in 0..9 {
            for col in 0..9 {
                if self.values[row][col] != 0 {
                    continue;
                }
                let cand = self.candidates(row, col);
                let count = cand.count_ones();
                if count == 0 {
                    return Some((row, col, 0));
                }
                if best.map_or(true, |(_, _, b)| count < b.count_ones()) {
                    best = Some((row, col, cand));
                }
            }
        }
        best
    }

    fn solve_first(&mut self) -> bool {
        let Some((row, col, mut cand)) = self.best_cell() else {
            return true;
        };
        while cand != 0 {
            let digit = cand.trailing_zeros() as u8 + 1;
            cand &= cand - 1;
            self.place(row, col, digit);
            if self.solve_first() {
                return true;
            }
            self.remove(row, col, digit);
        }
        false
    }

    fn count(&mut self, limit: usize, found: &mut usize) {
        if *found >= limit {
            return;
        }
        let Some((row, col, mut cand)) = self.best_cell() else {
            *found += 1;
            return;
        };
        while cand != 0 && *found < limit {
            let digit = cand.trailing_zeros() as u8 + 1;
            cand &= cand - 1;
            self.place(row, col, digit);
            self.count(limit, found);
            self.remove(row, col, digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn solves_known_puzzle() {
        let board = Board::from_string(PUZZLE).unwrap();
        let solved = Solver::new().solve(&board).unwrap();
        assert_eq!(solved.to_line(), SOLUTION);
        assert!(solved.is_complete());
    }

    #[test]
    fn known_puzzle_has_unique_solution() {
        let board = Board::from_string(PUZZLE).unwrap();
        assert_eq!(Solver::new().count_solutions(&board, 2), 1);
    }

    #[test]
    fn empty_board_has_many_solutions() {
        let board = Board::new();
        assert_eq!(Solver::new().count_solutions(&board, 2), 2);
    }

    #[test]
    fn conflicting_board_is_unsolvable() {
        // Two 5s in the first row.
        let mut line = String::from("55");
        line.push_str(&".".repeat(79));
        let board = Board::from_string(&line).unwrap();
        assert_eq!(Solver::new().count_solutions(&board, 2), 0);
        assert!(Solver::new().solve(&board).is_none());
    }

    #[test]
    fn solved_board_counts_once() {
        let board = Board::from_string(SOLUTION).unwrap();
        assert_eq!(Solver::new().count_solutions(&board, 2), 1);
        assert!(Solver::new().is_solvable(&board));
    }
}
