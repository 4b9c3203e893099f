use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::{Side, Square};

pub const BOARD_SIZE: usize = 8;
const DARK_ROWS: std::ops::Range<i32> = 0..3;
const LIGHT_ROWS: std::ops::Range<i32> = 5..8;
const DARK_CROWN_ROW: i32 = BOARD_SIZE as i32 - 1;
const LIGHT_CROWN_ROW: i32 = 0;

/// Wire encoding of a whole board: `cells[row][col]`.
pub type BoardArray = [[u8; BOARD_SIZE]; BOARD_SIZE];

static PLAYABLE: Lazy<Vec<Square>> = Lazy::new(|| {
    (0..BOARD_SIZE as u8)
        .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
        .filter(|sq| is_playable(sq.row as i32, sq.col as i32))
        .collect()
});

/// The 32 dark squares pieces may stand on, row-major.
pub fn playable_squares() -> &'static [Square] {
    &PLAYABLE
}

/// Contents of one square.
///
/// Serialized as its wire code:
/// 0=empty, 1=dark man, 2=dark king, 3=light man, 4=light king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Empty,
    DarkMan,
    DarkKing,
    LightMan,
    LightKing,
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::DarkMan => 1,
            Self::DarkKing => 2,
            Self::LightMan => 3,
            Self::LightKing => 4,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::DarkMan | Self::DarkKing)
    }

    pub fn is_light(self) -> bool {
        matches!(self, Self::LightMan | Self::LightKing)
    }

    pub fn is_king(self) -> bool {
        matches!(self, Self::DarkKing | Self::LightKing)
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Self::DarkMan | Self::DarkKing => Some(Side::Dark),
            Self::LightMan | Self::LightKing => Some(Side::Light),
            Self::Empty => None,
        }
    }

    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

impl TryFrom<u8> for Cell {
    type Error = BoardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::DarkMan),
            2 => Ok(Self::DarkKing),
            3 => Ok(Self::LightMan),
            4 => Ok(Self::LightKing),
            _ => Err(BoardError::InvalidCode(code)),
        }
    }
}

/// 8x8 draughts board.
///
/// Plain value type: `clone()` (or a copy) never shares state with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoardArray", try_from = "BoardArray")]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the opening layout:
    /// dark men on rows 0-2, light men on rows 5-7, playable squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for sq in playable_squares() {
            let (row, col) = sq.signed();
            if DARK_ROWS.contains(&row) {
                board.set(row, col, Cell::DarkMan);
            } else if LIGHT_ROWS.contains(&row) {
                board.set(row, col, Cell::LightMan);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn is_valid(row: i32, col: i32) -> bool {
        in_bounds(row, col)
    }

    /// Returns `None` for off-board coordinates.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if in_bounds(row, col) {
            Some(self.cells[row as usize][col as usize])
        } else {
            None
        }
    }

    /// Overwrites the square. Off-board coordinates are ignored.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if in_bounds(row, col) {
            self.cells[row as usize][col as usize] = cell;
        }
    }

    /// Unchecked counterpart of [`Board::get`]; `sq` must be on the board.
    pub(crate) fn at(&self, sq: Square) -> Cell {
        self.cells[sq.row as usize][sq.col as usize]
    }

    pub(crate) fn put(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row as usize][sq.col as usize] = cell;
    }

    /// Crowns a dark man on row 7 or a light man on row 0.
    /// Returns `false` without touching the board for anything else, kings included.
    pub fn promote(&mut self, row: i32, col: i32) -> bool {
        let crowned = match self.get(row, col) {
            Some(Cell::DarkMan) if row == DARK_CROWN_ROW => Cell::DarkKing,
            Some(Cell::LightMan) if row == LIGHT_CROWN_ROW => Cell::LightKing,
            _ => return false,
        };
        self.set(row, col, crowned);
        true
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(dark, light), cell| match cell.side() {
                Some(Side::Dark) => (dark + 1, light),
                Some(Side::Light) => (dark, light + 1),
                None => (dark, light),
            })
    }

    pub fn to_array(&self) -> BoardArray {
        let mut out = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for (out_row, row) in out.iter_mut().zip(self.cells.iter()) {
            for (code, cell) in out_row.iter_mut().zip(row.iter()) {
                *code = cell.code();
            }
        }
        out
    }

    pub fn from_array(codes: &BoardArray) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for (row, codes_row) in codes.iter().enumerate() {
            for (col, &code) in codes_row.iter().enumerate() {
                let cell = Cell::try_from(code).map_err(|_| BoardError::InvalidCell {
                    row: row as u8,
                    col: col as u8,
                    code,
                })?;
                board.cells[row][col] = cell;
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for BoardArray {
    fn from(board: Board) -> Self {
        board.to_array()
    }
}

impl TryFrom<BoardArray> for Board {
    type Error = BoardError;

    fn try_from(codes: BoardArray) -> Result<Self, Self::Error> {
        Self::from_array(&codes)
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

fn is_playable(row: i32, col: i32) -> bool {
    (row + col) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t01_initial_layout_has_twelve_men_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.count(), (12, 12));
        for row in 0..8 {
            for col in 0..8 {
                let cell = board.get(row, col).unwrap();
                if !is_playable(row, col) || (3..5).contains(&row) {
                    assert_eq!(cell, Cell::Empty, "({row}, {col})");
                } else if row < 3 {
                    assert_eq!(cell, Cell::DarkMan, "({row}, {col})");
                } else {
                    assert_eq!(cell, Cell::LightMan, "({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn out_of_range_access_is_inert() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, 8), None);
        assert!(!Board::is_valid(8, 8));

        board.set(8, 0, Cell::DarkKing);
        board.set(0, -1, Cell::DarkKing);
        assert_eq!(board, before);
    }

    #[test]
    fn classification_predicates() {
        assert!(Cell::DarkMan.is_dark() && Cell::DarkKing.is_dark());
        assert!(Cell::LightMan.is_light() && Cell::LightKing.is_light());
        assert!(Cell::DarkKing.is_king() && Cell::LightKing.is_king());
        assert!(!Cell::DarkMan.is_king() && !Cell::Empty.is_dark() && !Cell::Empty.is_light());
    }

    #[test]
    fn promote_crowns_only_men_on_the_far_row() {
        let mut board = Board::empty();
        board.set(7, 0, Cell::DarkMan);
        board.set(0, 1, Cell::LightMan);
        board.set(6, 1, Cell::DarkMan);
        board.set(7, 2, Cell::LightMan);

        assert!(board.promote(7, 0));
        assert_eq!(board.get(7, 0), Some(Cell::DarkKing));
        assert!(board.promote(0, 1));
        assert_eq!(board.get(0, 1), Some(Cell::LightKing));

        assert!(!board.promote(7, 0), "already a king");
        assert!(!board.promote(6, 1));
        assert!(!board.promote(7, 2), "light men crown on row 0");
        assert!(!board.promote(3, 3));
        assert_eq!(board.get(6, 1), Some(Cell::DarkMan));
        assert_eq!(board.get(7, 2), Some(Cell::LightMan));
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::new();
        let mut copy = original.clone();

        copy.set(2, 1, Cell::Empty);

        assert_eq!(original.get(2, 1), Some(Cell::DarkMan));
        assert_eq!(copy.get(2, 1), Some(Cell::Empty));
    }

    #[test]
    fn wire_encoding_uses_fixed_codes() {
        let mut board = Board::empty();
        board.set(0, 1, Cell::DarkMan);
        board.set(0, 3, Cell::DarkKing);
        board.set(7, 0, Cell::LightMan);
        board.set(7, 2, Cell::LightKing);

        let codes = board.to_array();
        assert_eq!(codes[0], [0, 1, 0, 2, 0, 0, 0, 0]);
        assert_eq!(codes[7], [3, 0, 4, 0, 0, 0, 0, 0]);
        assert_eq!(Board::from_array(&codes).unwrap(), board);

        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[[0,1,0,2,0,0,0,0],"));
    }

    #[test]
    fn invalid_cell_code_is_rejected_with_location() {
        let mut codes = Board::new().to_array();
        codes[4][3] = 9;

        let err = Board::from_array(&codes).unwrap_err();

        assert_eq!(
            err,
            BoardError::InvalidCell {
                row: 4,
                col: 3,
                code: 9
            }
        );
    }

    #[test]
    fn playable_squares_are_the_thirty_two_dark_squares() {
        let squares = playable_squares();

        assert_eq!(squares.len(), 32);
        assert!(squares.iter().all(|sq| (sq.row + sq.col) % 2 == 1));
        assert_eq!(squares[0], Square { row: 0, col: 1 });
    }
}
