//! Canned positions

use crate::board::Board;
use crate::types::{Coord, Phase, Piece};

/// The standard chess starting position; no duck on the board yet (the duck
/// enters with white's first duck move).
pub fn initial_position() -> Board {
    let mut pieces = Vec::with_capacity(32);
    let back_ranks = [
        (Piece::WHITE_ROOK, Piece::BLACK_ROOK),
        (Piece::WHITE_KNIGHT, Piece::BLACK_KNIGHT),
        (Piece::WHITE_BISHOP, Piece::BLACK_BISHOP),
        (Piece::WHITE_QUEEN, Piece::BLACK_QUEEN),
        (Piece::WHITE_KING, Piece::BLACK_KING),
        (Piece::WHITE_BISHOP, Piece::BLACK_BISHOP),
        (Piece::WHITE_KNIGHT, Piece::BLACK_KNIGHT),
        (Piece::WHITE_ROOK, Piece::BLACK_ROOK),
    ];
    for (col, &(white, black)) in back_ranks.iter().enumerate() {
        let col = col as u8;
        pieces.push((Coord::new(0, col), white));
        pieces.push((Coord::new(1, col), Piece::WHITE_PAWN));
        pieces.push((Coord::new(6, col), Piece::BLACK_PAWN));
        pieces.push((Coord::new(7, col), black));
    }
    Board::from_pieces(&pieces, Phase::WhitePieceMove)
}
