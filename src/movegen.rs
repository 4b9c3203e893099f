//! Legal move generation over a bare [`Board`].
//!
//! Every function recomputes from the board it is given; nothing is cached.

use crate::board::{Board, Cell, playable_squares};
use crate::types::{Move, Side, Square};

const DARK_MAN_DIRECTIONS: [(i32, i32); 2] = [(1, -1), (1, 1)];
const LIGHT_MAN_DIRECTIONS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
const KING_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn directions(cell: Cell) -> &'static [(i32, i32)] {
    match cell {
        Cell::DarkMan => &DARK_MAN_DIRECTIONS,
        Cell::LightMan => &LIGHT_MAN_DIRECTIONS,
        Cell::DarkKing | Cell::LightKing => &KING_DIRECTIONS,
        Cell::Empty => &[],
    }
}

/// Legal moves for the piece on `from`, with `side` to move.
///
/// Empty when the square is off the board, empty, or holds the other side's piece.
/// When the piece can capture, only captures are returned.
pub fn square_moves(board: &Board, side: Side, from: Square) -> Vec<Move> {
    let (row, col) = from.signed();
    let Some(piece) = board.get(row, col).filter(|cell| cell.belongs_to(side)) else {
        return Vec::new();
    };

    let mut steps = Vec::new();
    let mut captures = Vec::new();

    for &(dr, dc) in directions(piece) {
        let Some(next) = from.offset(dr, dc) else {
            continue;
        };
        let target = board.at(next);

        if target.is_empty() {
            steps.push(Move {
                from,
                to: next,
                captured: None,
            });
        } else if target.belongs_to(side.opponent())
            && let Some(landing) = next.offset(dr, dc)
            && board.at(landing).is_empty()
        {
            captures.push(Move {
                from,
                to: landing,
                captured: Some(next),
            });
        }
    }

    if captures.is_empty() { steps } else { captures }
}

/// Capturing moves only, for the piece on `from`.
pub fn square_captures(board: &Board, side: Side, from: Square) -> Vec<Move> {
    let mut moves = square_moves(board, side, from);
    moves.retain(Move::is_capture);
    moves
}

/// Every legal move for `side`. Forced capture applies board-wide:
/// if any piece can capture, no simple move is returned.
pub fn side_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut steps = Vec::new();
    let mut captures = Vec::new();

    for &sq in playable_squares() {
        for mv in square_moves(board, side, sq) {
            if mv.is_capture() {
                captures.push(mv);
            } else {
                steps.push(mv);
            }
        }
    }

    if captures.is_empty() { steps } else { captures }
}
