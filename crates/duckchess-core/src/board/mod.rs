//! Board state
//!
//! A board is the full game state: 64 cells, the phase of the round, castling
//! rights, the en-passant column, the duck position and the game result. Every
//! mutation goes through hash-updating setters so the Zobrist fingerprint
//! stays in sync with the state it covers.

mod parsing;
mod positions;

pub use parsing::{parse_board, ParseError};
pub use positions::initial_position;

use crate::types::{Coord, GameResult, Phase, Piece, Row};
use crate::zobrist::{self, ZobristHash};

/// White may still castle short (king on E1, rook on H1 untouched).
pub const WHITE_SHORT_CASTLE: u8 = 1;
pub const WHITE_LONG_CASTLE: u8 = 2;
pub const BLACK_SHORT_CASTLE: u8 = 4;
pub const BLACK_LONG_CASTLE: u8 = 8;

/// Full game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; Coord::NUM],
    phase: Phase,
    result: GameResult,
    castling: u8,
    en_passant: Option<u8>,
    duck: Option<Coord>,
    pieces_left: u32,
    hash: ZobristHash,
}

impl Board {
    /// Builds a board from a piece placement list. Castling rights are granted
    /// wherever king and rook still stand on their home squares; the duck
    /// position is taken from the placement.
    pub fn from_pieces(pieces: &[(Coord, Piece)], phase: Phase) -> Board {
        let mut board = Board {
            cells: [Piece::EMPTY; Coord::NUM],
            phase: Phase::WhitePieceMove,
            result: GameResult::Undecided,
            castling: 0,
            en_passant: None,
            duck: None,
            pieces_left: 0,
            hash: zobrist::empty_board_hash(),
        };

        for &(coord, piece) in pieces {
            board.set(coord, piece);
            if piece != Piece::EMPTY && piece != Piece::DUCK {
                board.pieces_left += 1;
            }
        }

        let mut castling = 0;
        if board.get(Coord::E1) == Piece::WHITE_KING {
            if board.get(Coord::H1) == Piece::WHITE_ROOK {
                castling |= WHITE_SHORT_CASTLE;
            }
            if board.get(Coord::A1) == Piece::WHITE_ROOK {
                castling |= WHITE_LONG_CASTLE;
            }
        }
        if board.get(Coord::E8) == Piece::BLACK_KING {
            if board.get(Coord::H8) == Piece::BLACK_ROOK {
                castling |= BLACK_SHORT_CASTLE;
            }
            if board.get(Coord::A8) == Piece::BLACK_ROOK {
                castling |= BLACK_LONG_CASTLE;
            }
        }
        board.set_castling_bits(castling);

        board.duck = Coord::first_matching(|c| board.get(c) == Piece::DUCK);
        board.set_phase(phase);
        board
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Piece {
        self.cells[coord.index()]
    }

    /// Writes a cell and folds the change into the hash. Duck position and
    /// piece count are not touched; callers that move the duck or capture a
    /// piece maintain those separately.
    #[inline]
    pub fn set(&mut self, coord: Coord, piece: Piece) {
        let original = self.cells[coord.index()];
        self.cells[coord.index()] = piece;
        self.hash.update_piece(coord, original, piece);
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn set_phase(&mut self, phase: Phase) {
        self.hash.update_phase(self.phase, phase);
        self.phase = phase;
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: GameResult) {
        self.result = result;
    }

    #[inline]
    pub fn castling_bits(&self) -> u8 {
        self.castling
    }

    #[inline]
    pub fn set_castling_bits(&mut self, bits: u8) {
        if bits != self.castling {
            self.hash.update_castling(self.castling, bits);
            self.castling = bits;
        }
    }

    #[inline]
    pub fn clear_castling_bits(&mut self, bits: u8) {
        self.set_castling_bits(self.castling & !bits);
    }

    #[inline]
    pub fn white_short_castling_allowed(&self) -> bool {
        self.castling & WHITE_SHORT_CASTLE != 0
    }

    #[inline]
    pub fn white_long_castling_allowed(&self) -> bool {
        self.castling & WHITE_LONG_CASTLE != 0
    }

    #[inline]
    pub fn black_short_castling_allowed(&self) -> bool {
        self.castling & BLACK_SHORT_CASTLE != 0
    }

    #[inline]
    pub fn black_long_castling_allowed(&self) -> bool {
        self.castling & BLACK_LONG_CASTLE != 0
    }

    /// Column of the pawn that just made a two-step move, if any.
    #[inline]
    pub fn en_passant_col(&self) -> Option<u8> {
        self.en_passant
    }

    #[inline]
    pub fn set_en_passant_col(&mut self, col: Option<u8>) {
        self.hash.update_en_passant(self.en_passant, col);
        self.en_passant = col;
    }

    #[inline]
    pub fn duck_position(&self) -> Option<Coord> {
        self.duck
    }

    #[inline]
    pub(crate) fn set_duck_position(&mut self, duck: Option<Coord>) {
        self.duck = duck;
    }

    /// Number of colored pieces still on the board.
    #[inline]
    pub fn pieces_left(&self) -> u32 {
        self.pieces_left
    }

    #[inline]
    pub(crate) fn dec_pieces_left(&mut self) {
        self.pieces_left -= 1;
    }

    #[inline]
    pub(crate) fn inc_pieces_left(&mut self) {
        self.pieces_left += 1;
    }

    #[inline]
    pub fn hash(&self) -> ZobristHash {
        self.hash
    }

    /// Takes the duck off the board, returning where it stood. The search
    /// analyses piece moves on duckless boards and puts the duck back
    /// afterwards with [`Board::restore_duck`].
    pub(crate) fn remove_duck(&mut self) -> Option<Coord> {
        let duck = self.duck.take();
        if let Some(coord) = duck {
            self.set(coord, Piece::EMPTY);
        }
        duck
    }

    pub(crate) fn restore_duck(&mut self, duck: Option<Coord>) {
        if let Some(coord) = duck {
            self.set(coord, Piece::DUCK);
            self.duck = Some(coord);
        }
    }

    /// ASCII rendering; inverse of [`parse_board`]. An asterisk after the top
    /// or bottom border marks the side to move (top for black, bottom for
    /// white), and the bottom border carries the en-passant column.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(17 * 18);
        for row in (0..8u8).rev() {
            out.push_str(&"-".repeat(17));
            if row == 7 && self.phase == Phase::BlackPieceMove {
                out.push_str(" *");
            }
            out.push('\n');
            for col in 0..8u8 {
                out.push('|');
                let piece = self.get(Coord::new(row, col));
                out.push(if piece == Piece::EMPTY { ' ' } else { piece.letter() });
            }
            out.push_str("|\n");
        }
        out.push_str(&"-".repeat(17));
        if self.phase == Phase::WhitePieceMove {
            out.push_str(" *");
        }
        let ep = self.en_passant.map_or(-1, |c| c as i32);
        out.push_str(&format!(" ep: {ep}"));
        out.push('\n');
        out
    }

    pub(crate) fn piece_at(&self, row: Row, col: u8) -> Piece {
        self.cells[(row.0 * 8 + col) as usize]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pieces_grants_castling_from_occupancy() {
        let board = Board::from_pieces(
            &[
                (Coord::E1, Piece::WHITE_KING),
                (Coord::H1, Piece::WHITE_ROOK),
                (Coord::E8, Piece::BLACK_KING),
                (Coord::A8, Piece::BLACK_ROOK),
            ],
            Phase::WhitePieceMove,
        );
        assert!(board.white_short_castling_allowed());
        assert!(!board.white_long_castling_allowed());
        assert!(!board.black_short_castling_allowed());
        assert!(board.black_long_castling_allowed());
        assert_eq!(board.pieces_left(), 4);
    }

    #[test]
    fn test_set_keeps_hash_in_sync() {
        let mut board = initial_position();
        let fresh = zobrist::full_hash(
            &std::array::from_fn(|i| board.get(Coord::from_index(i))),
            board.phase(),
            board.castling_bits(),
            board.en_passant_col(),
        );
        assert_eq!(board.hash(), fresh);

        board.set(Coord::E2, Piece::EMPTY);
        board.set(Coord::E4, Piece::WHITE_PAWN);
        board.set_phase(Phase::WhiteDuckMove);
        board.set_en_passant_col(Some(4));
        let fresh = zobrist::full_hash(
            &std::array::from_fn(|i| board.get(Coord::from_index(i))),
            board.phase(),
            board.castling_bits(),
            board.en_passant_col(),
        );
        assert_eq!(board.hash(), fresh);
    }

    #[test]
    fn test_remove_and_restore_duck() {
        let mut board = Board::from_pieces(
            &[(Coord::D4, Piece::DUCK), (Coord::E1, Piece::WHITE_KING)],
            Phase::WhitePieceMove,
        );
        let original = board.clone();

        let duck = board.remove_duck();
        assert_eq!(duck, Some(Coord::D4));
        assert_eq!(board.get(Coord::D4), Piece::EMPTY);
        assert_eq!(board.duck_position(), None);

        board.restore_duck(duck);
        assert_eq!(board, original);
    }

    #[test]
    fn test_render_marks_side_to_move() {
        let board = initial_position();
        let text = board.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert!(lines[16].contains('*'));
        assert!(lines[16].contains("ep: -1"));
        assert!(!lines[0].contains('*'));
        assert_eq!(lines[1], "|r|n|b|q|k|b|n|r|");
        assert_eq!(lines[15], "|R|N|B|Q|K|B|N|R|");
    }
}
