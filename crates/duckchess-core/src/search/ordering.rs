//! Move ordering heuristic
//!
//! Rough strength guesses so promising moves get searched first and produce
//! early cutoffs. Pawn captures rank highest among equal captures because the
//! pawn risks the least; knight moves toward the enemy get a nudge.

use crate::board::Board;
use crate::moves::Move;
use crate::types::Piece;

pub fn move_strength_estimation(mv: Move, board: &Board, white: bool) -> i32 {
    match mv {
        Move::PawnCapture { to, .. } => match board.get(to) {
            Piece::WHITE_PAWN | Piece::BLACK_PAWN => 100,
            Piece::WHITE_KING | Piece::BLACK_KING => 1000,
            _ => 200,
        },
        Move::DiagonalCapture { .. } | Move::StraightCapture { .. } => 50,
        Move::Promotion { .. } => 200,
        Move::CapturePromotion { .. } => 300,
        Move::KnightCapture { .. } => 20,
        Move::PawnTwoStep { .. } => 7,
        Move::KnightSlide { from, to } => {
            let retreating = to.row() < from.row();
            if white != retreating {
                15
            } else {
                -2
            }
        }
        Move::WhiteShortCastle | Move::BlackShortCastle => 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_position, parse_board};
    use crate::types::Coord;

    #[test]
    fn test_pawn_captures_rank_by_victim() {
        let board = parse_board(
            "
            -----------------
            | | | | |k| | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | |q|n| | | |
            -----------------
            | | | | |P| | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | |K| | | |
            ----------------- * ep: -1",
        )
        .unwrap();
        let queen_grab = Move::PawnCapture { from: Coord::E4, to: Coord::D5 };
        assert_eq!(move_strength_estimation(queen_grab, &board, true), 200);
    }

    #[test]
    fn test_knight_prefers_forward_moves() {
        let board = initial_position();
        let forward = Move::KnightSlide { from: Coord::B1, to: Coord::C3 };
        assert_eq!(move_strength_estimation(forward, &board, true), 15);

        let backward = Move::KnightSlide { from: Coord::C3, to: Coord::B1 };
        assert_eq!(move_strength_estimation(backward, &board, true), -2);
        // The same hop is forward progress for black.
        assert_eq!(move_strength_estimation(backward, &board, false), 15);
    }

    #[test]
    fn test_quiet_moves_are_neutral() {
        let board = initial_position();
        let push = Move::PawnOneStep { from: Coord::E2, to: Coord::E3 };
        assert_eq!(move_strength_estimation(push, &board, true), 0);
        let double = Move::PawnTwoStep { from: Coord::E2, to: Coord::E4 };
        assert_eq!(move_strength_estimation(double, &board, true), 7);
    }
}
