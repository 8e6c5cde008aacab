//! Static evaluation
//!
//! Material plus a handful of positional terms: knights and bishops dislike
//! the board edge, pawns like advancing and dislike being doubled, and the
//! side to move gets a small tempo bonus. Duck chess values knights above
//! bishops, since a single duck placement shuts a bishop down.

use crate::board::Board;
use crate::types::{Coord, Phase, Piece, Value};

const TEMPO_BONUS: i32 = 12;

#[derive(Debug, Default)]
pub struct Evaluator {
    evaluated_positions: u64,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator::default()
    }

    /// Number of static evaluations performed so far.
    pub fn evaluated_positions(&self) -> u64 {
        self.evaluated_positions
    }

    /// Flat score from white's point of view, without the tempo term.
    pub fn evaluate(&mut self, board: &Board) -> Value {
        self.evaluated_positions += 1;
        let mut score = 0;
        Coord::for_each(|pos| {
            score += piece_score(board, pos);
        });
        Value::new(score)
    }

    /// Score from the perspective of the side whose piece move it is. Only
    /// meaningful in piece phases; the search never evaluates mid-round.
    pub fn side_relative(&mut self, board: &Board) -> Value {
        let score = self.evaluate(board).raw();
        match board.phase() {
            Phase::WhitePieceMove => Value::new(score + TEMPO_BONUS),
            Phase::BlackPieceMove => Value::new(-score + TEMPO_BONUS),
            phase => unreachable!("static evaluation in duck phase {phase:?}"),
        }
    }
}

fn piece_score(board: &Board, pos: Coord) -> i32 {
    match board.get(pos) {
        Piece::WHITE_PAWN => 100 + white_pawn_position_score(board, pos),
        Piece::WHITE_BISHOP => 300 + bishop_position_score(pos),
        Piece::WHITE_KNIGHT => 400 + knight_position_score(pos),
        Piece::WHITE_ROOK => 500,
        Piece::WHITE_QUEEN => 900,
        Piece::BLACK_PAWN => -100 - black_pawn_position_score(board, pos),
        Piece::BLACK_BISHOP => -300 - bishop_position_score(pos),
        Piece::BLACK_KNIGHT => -400 - knight_position_score(pos),
        Piece::BLACK_ROOK => -500,
        Piece::BLACK_QUEEN => -900,
        _ => 0,
    }
}

fn knight_position_score(pos: Coord) -> i32 {
    let col = pos.col().0;
    let row = pos.row().0;
    let mut penalty = 0;
    if col == 0 || col == 7 {
        penalty += 10;
    } else if col == 1 || col == 6 {
        penalty += 5;
    }
    if row == 0 || row == 7 {
        penalty += 10;
    } else if row == 1 || row == 6 {
        penalty += 5;
    }
    -penalty
}

fn bishop_position_score(pos: Coord) -> i32 {
    let col = pos.col().0;
    let row = pos.row().0;
    let mut penalty = 0;
    if col == 0 || col == 7 {
        penalty += 10;
    }
    if row == 0 || row == 7 {
        penalty += 10;
    }
    -penalty
}

fn white_pawn_position_score(board: &Board, pos: Coord) -> i32 {
    let row = pos.row().0 as i32;
    if row >= 6 {
        return 30;
    }
    let mut score = row;
    if board.get(pos.one_up()) == Piece::WHITE_PAWN {
        score -= 17;
    } else if row < 5 && board.get(pos.two_up()) == Piece::WHITE_PAWN {
        score -= 16;
    }
    score
}

fn black_pawn_position_score(board: &Board, pos: Coord) -> i32 {
    let row = pos.row().0 as i32;
    if row <= 1 {
        return 30;
    }
    let mut score = 7 - row;
    if board.get(pos.one_down()) == Piece::BLACK_PAWN {
        score -= 17;
    } else if row > 2 && board.get(pos.two_down()) == Piece::BLACK_PAWN {
        score -= 16;
    }
    score
}
