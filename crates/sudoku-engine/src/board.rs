use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 0-based (row, column) coordinate on the 9x9 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < 9 && self.col < 9
    }

    /// Index of the 3x3 box containing this position (0..9, row-major).
    pub fn box_index(self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(|i| Position::new(i / 9, i % 9))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Candidate notes for a single cell, one bit per digit 1-9.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSet(u16);

impl NoteSet {
    pub const EMPTY: NoteSet = NoteSet(0);

    pub fn contains(self, digit: u8) -> bool {
        (1..=9).contains(&digit) && self.0 & (1 << (digit - 1)) != 0
    }

    pub fn insert(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.0 |= 1 << (digit - 1);
        }
    }

    pub fn remove(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.0 &= !(1 << (digit - 1));
        }
    }

    pub fn toggle(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.0 ^= 1 << (digit - 1);
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Noted digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

/// A single cell: optional value, fixed-clue flag, and candidate notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<u8>,
    given: bool,
    notes: NoteSet,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    /// Whether this cell is a fixed clue set by the generator.
    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    pub fn notes(&self) -> NoteSet {
        self.notes
    }
}

/// A reversible player action: what a cell held before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pos: Position,
    pub prev_value: Option<u8>,
    pub prev_notes: NoteSet,
    pub new_value: Option<u8>,
}

/// Reason a move was rejected. Rejections never mutate the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Coordinate outside the 9x9 board.
    #[display("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    /// The target cell is a fixed clue.
    #[display("cell ({row}, {col}) is a given clue")]
    FixedCell { row: usize, col: usize },
    /// Digit outside 1-9.
    #[display("digit {digit} is not in 1..=9")]
    InvalidDigit { digit: u8 },
    /// Nothing to erase.
    #[display("cell ({row}, {col}) is already empty")]
    CellEmpty { row: usize, col: usize },
    /// Notes cannot be edited on a filled cell.
    #[display("cell ({row}, {col}) already holds a value")]
    CellFilled { row: usize, col: usize },
}

/// The 9x9 Sudoku board.
///
/// The board accepts rule-breaking player entries; conflicts are surfaced
/// through [`Board::has_conflict`] and block completion, matching how the
/// game presents mistakes instead of refusing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 9]; 9],
}

impl Board {
    /// An empty board with no clues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a value grid, marking every non-zero cell as a
    /// given clue. Used by the generator.
    pub(crate) fn from_values(values: &[[u8; 9]; 9]) -> Self {
        let mut board = Board::new();
        for pos in Position::all() {
            let v = values[pos.row][pos.col];
            if v != 0 {
                board.cells[pos.row][pos.col] = Cell {
                    value: Some(v),
                    given: true,
                    notes: NoteSet::EMPTY,
                };
            }
        }
        board
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn value(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col].value
    }

    pub(crate) fn set_value_unchecked(&mut self, pos: Position, value: Option<u8>) {
        self.cells[pos.row][pos.col].value = value;
    }

    /// Number of fixed clues on the board.
    pub fn given_count(&self) -> usize {
        Position::all().filter(|&p| self.cell(p).is_given()).count()
    }

    /// Number of empty cells on the board.
    pub fn empty_count(&self) -> usize {
        Position::all().filter(|&p| self.cell(p).is_empty()).count()
    }

    /// Whether placing `digit` at `pos` would conflict with an existing
    /// value in the same row, column, or box. Does not mutate state.
    ///
    /// Returns `false` for out-of-range coordinates or digits.
    pub fn is_valid_placement(&self, pos: Position, digit: u8) -> bool {
        if !pos.in_bounds() || !(1..=9).contains(&digit) {
            return false;
        }
        for col in 0..9 {
            if col != pos.col && self.cells[pos.row][col].value == Some(digit) {
                return false;
            }
        }
        for row in 0..9 {
            if row != pos.row && self.cells[row][pos.col].value == Some(digit) {
                return false;
            }
        }
        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                if (row, col) != (pos.row, pos.col) && self.cells[row][col].value == Some(digit) {
                    return false;
                }
            }
        }
        true
    }

    /// Writes `digit` into a player cell, clearing its notes.
    ///
    /// Returns the [`Move`] capturing the prior state for undo.
    pub fn place(&mut self, pos: Position, digit: u8) -> Result<Move, MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { row: pos.row, col: pos.col });
        }
        if !(1..=9).contains(&digit) {
            return Err(MoveError::InvalidDigit { digit });
        }
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given {
            return Err(MoveError::FixedCell { row: pos.row, col: pos.col });
        }
        let mv = Move {
            pos,
            prev_value: cell.value,
            prev_notes: cell.notes,
            new_value: Some(digit),
        };
        cell.value = Some(digit);
        cell.notes.clear();
        Ok(mv)
    }

    /// Erases a player cell's value and notes.
    pub fn clear(&mut self, pos: Position) -> Result<Move, MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { row: pos.row, col: pos.col });
        }
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given {
            return Err(MoveError::FixedCell { row: pos.row, col: pos.col });
        }
        if cell.value.is_none() && cell.notes.is_empty() {
            return Err(MoveError::CellEmpty { row: pos.row, col: pos.col });
        }
        let mv = Move {
            pos,
            prev_value: cell.value,
            prev_notes: cell.notes,
            new_value: None,
        };
        cell.value = None;
        cell.notes.clear();
        Ok(mv)
    }

    /// Adds or removes a candidate note on an empty player cell.
    pub fn toggle_note(&mut self, pos: Position, digit: u8) -> Result<Move, MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { row: pos.row, col: pos.col });
        }
        if !(1..=9).contains(&digit) {
            return Err(MoveError::InvalidDigit { digit });
        }
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given {
            return Err(MoveError::FixedCell { row: pos.row, col: pos.col });
        }
        if cell.value.is_some() {
            return Err(MoveError::CellFilled { row: pos.row, col: pos.col });
        }
        let mv = Move {
            pos,
            prev_value: cell.value,
            prev_notes: cell.notes,
            new_value: None,
        };
        cell.notes.toggle(digit);
        Ok(mv)
    }

    /// Restores the cell recorded in `mv` to its previous value and notes.
    pub fn revert(&mut self, mv: &Move) {
        let cell = &mut self.cells[mv.pos.row][mv.pos.col];
        cell.value = mv.prev_value;
        cell.notes = mv.prev_notes;
    }

    /// Whether the filled value at `pos` duplicates another value in its
    /// row, column, or box.
    pub fn has_conflict(&self, pos: Position) -> bool {
        match self.value(pos) {
            Some(digit) => !self.is_valid_placement(pos, digit),
            None => false,
        }
    }

    /// True iff every cell is filled and no row, column, or box contains a
    /// duplicate.
    pub fn is_complete(&self) -> bool {
        Position::all().all(|p| self.cell(p).is_filled() && !self.has_conflict(p))
    }

    /// Digits that appear nine times with no conflicts. Drives the
    /// frontend's "digit done" indicator.
    pub fn completed_digits(&self) -> [bool; 9] {
        let mut counts = [0u8; 9];
        let mut clean = [true; 9];
        for pos in Position::all() {
            if let Some(digit) = self.value(pos) {
                counts[(digit - 1) as usize] += 1;
                if self.has_conflict(pos) {
                    clean[(digit - 1) as usize] = false;
                }
            }
        }
        std::array::from_fn(|i| counts[i] == 9 && clean[i])
    }

    /// Parses an 81-character puzzle line. `0` and `.` mark empty cells;
    /// every digit becomes a given clue.
    pub fn from_string(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 81 {
            return None;
        }
        let mut values = [[0u8; 9]; 9];
        for (i, c) in chars.iter().enumerate() {
            values[i / 9][i % 9] = match c {
                '0' | '.' => 0,
                '1'..='9' => *c as u8 - b'0',
                _ => return None,
            };
        }
        Some(Board::from_values(&values))
    }

    /// Serializes the current values as an 81-character line, `.` for empty.
    pub fn to_line(&self) -> String {
        Position::all()
            .map(|p| match self.value(p) {
                Some(d) => (b'0' + d) as char,
                None => '.',
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col].value {
                    Some(d) => write!(f, "{} ", d)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A solved grid with the top-left cell blanked out.
    const NEARLY_DONE: &str =
        "034678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn empty_pos() -> Position {
        Position::new(0, 0)
    }

    #[test]
    fn validate_rejects_row_column_and_box_duplicates() {
        let board = Board::from_string(NEARLY_DONE).unwrap();
        let pos = empty_pos();
        // Row 0 already holds 3, column 0 holds 6, box 0 holds 7.
        assert!(!board.is_valid_placement(pos, 3));
        assert!(!board.is_valid_placement(pos, 6));
        assert!(!board.is_valid_placement(pos, 7));
        assert!(board.is_valid_placement(pos, 5));
    }

    #[test]
    fn validate_rejects_out_of_range_input() {
        let board = Board::new();
        assert!(!board.is_valid_placement(Position::new(9, 0), 1));
        assert!(!board.is_valid_placement(Position::new(0, 0), 0));
        assert!(!board.is_valid_placement(Position::new(0, 0), 10));
    }

    #[test]
    fn place_then_revert_restores_exact_state() {
        let mut board = Board::new();
        let pos = Position::new(4, 4);
        board.toggle_note(pos, 2).unwrap();
        board.toggle_note(pos, 8).unwrap();
        let before = board.clone();

        let mv = board.place(pos, 5).unwrap();
        assert_eq!(board.value(pos), Some(5));
        assert!(board.cell(pos).notes().is_empty());

        board.revert(&mv);
        assert_eq!(board, before);
    }

    #[test]
    fn place_rejects_fixed_clues_without_mutation() {
        let mut board = Board::from_string(NEARLY_DONE).unwrap();
        let before = board.clone();
        let err = board.place(Position::new(0, 1), 9).unwrap_err();
        assert_eq!(err, MoveError::FixedCell { row: 0, col: 1 });
        assert_eq!(board, before);
    }

    #[test]
    fn place_rejects_out_of_bounds_and_bad_digits() {
        let mut board = Board::new();
        assert_eq!(
            board.place(Position::new(3, 9), 1),
            Err(MoveError::OutOfBounds { row: 3, col: 9 })
        );
        assert_eq!(
            board.place(Position::new(3, 3), 0),
            Err(MoveError::InvalidDigit { digit: 0 })
        );
    }

    #[test]
    fn toggle_note_twice_restores_original_set() {
        let mut board = Board::new();
        let pos = Position::new(2, 7);
        board.toggle_note(pos, 4).unwrap();
        let original = board.cell(pos).notes();

        board.toggle_note(pos, 9).unwrap();
        board.toggle_note(pos, 9).unwrap();
        assert_eq!(board.cell(pos).notes(), original);
    }

    #[test]
    fn toggle_note_rejects_filled_and_given_cells() {
        let mut board = Board::from_string(NEARLY_DONE).unwrap();
        assert_eq!(
            board.toggle_note(Position::new(0, 1), 5),
            Err(MoveError::FixedCell { row: 0, col: 1 })
        );

        let pos = empty_pos();
        board.place(pos, 5).unwrap();
        assert_eq!(
            board.toggle_note(pos, 5),
            Err(MoveError::CellFilled { row: 0, col: 0 })
        );
    }

    #[test]
    fn clear_erases_value_and_notes() {
        let mut board = Board::new();
        let pos = Position::new(6, 2);
        board.place(pos, 3).unwrap();
        let mv = board.clear(pos).unwrap();
        assert!(board.cell(pos).is_empty());
        assert_eq!(mv.prev_value, Some(3));

        assert_eq!(
            board.clear(pos),
            Err(MoveError::CellEmpty { row: 6, col: 2 })
        );
    }

    #[test]
    fn completion_requires_fill_and_no_duplicates() {
        let mut board = Board::from_string(NEARLY_DONE).unwrap();
        assert!(!board.is_complete());

        // Wrong digit fills the board but introduces a conflict.
        board.place(empty_pos(), 9).unwrap();
        assert!(!board.is_complete());
        assert!(board.has_conflict(empty_pos()));

        board.place(empty_pos(), 5).unwrap();
        assert!(board.is_complete());
    }

    #[test]
    fn completed_digits_tracks_fully_placed_numbers() {
        let mut board = Board::from_string(NEARLY_DONE).unwrap();
        let done = board.completed_digits();
        // 5 is missing once (the blanked cell); every other digit is complete.
        assert!(!done[4]);
        assert!(done[0] && done[8]);

        board.place(empty_pos(), 5).unwrap();
        assert_eq!(board.completed_digits(), [true; 9]);
    }

    #[test]
    fn string_codec_round_trips() {
        let board = Board::from_string(NEARLY_DONE).unwrap();
        let line = board.to_line();
        assert_eq!(line.len(), 81);
        assert_eq!(Board::from_string(&line).unwrap().to_line(), line);
        assert_eq!(board.given_count(), 80);
        assert_eq!(board.empty_count(), 1);
    }

    #[test]
    fn board_serde_round_trips() {
        let mut board = Board::from_string(NEARLY_DONE).unwrap();
        board.toggle_note(empty_pos(), 5).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }
}
