//! Incremental position hash
//!
//! A Zobrist-style 64-bit fingerprint: every (square, piece) pair, every
//! phase, every castling-rights bitmask and every en-passant file has a fixed
//! random key, and the board hash is the XOR of the keys of its current
//! features. State mutations XOR the old feature key out and the new one in,
//! so the hash never needs recomputation from scratch.
//!
//! The key table is seeded, so hashes are reproducible across runs. This is a
//! position fingerprint, not a cryptographic hash; rare collisions are an
//! accepted risk.

use std::sync::LazyLock;

use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{Coord, Phase, Piece};

struct ZobristKeys {
    piece_on_square: [[u64; Piece::NUM]; Coord::NUM],
    phase: [u64; Phase::NUM],
    castling: [u64; 16],
    // Files 0..8, plus "no en-passant" at index 8.
    en_passant: [u64; 9],
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x00D0_C755_0B1A_5ED5);
    let mut keys = ZobristKeys {
        piece_on_square: [[0; Piece::NUM]; Coord::NUM],
        phase: [0; Phase::NUM],
        castling: [0; 16],
        en_passant: [0; 9],
    };
    for square in keys.piece_on_square.iter_mut() {
        for key in square.iter_mut() {
            *key = rng.next_u64();
        }
    }
    for key in keys.phase.iter_mut() {
        *key = rng.next_u64();
    }
    for key in keys.castling.iter_mut() {
        *key = rng.next_u64();
    }
    for key in keys.en_passant.iter_mut() {
        *key = rng.next_u64();
    }
    keys
});

/// The running hash of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZobristHash(u64);

impl ZobristHash {
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn update_piece(&mut self, coord: Coord, from: Piece, to: Piece) {
        let square = &KEYS.piece_on_square[coord.index()];
        self.0 ^= square[from.code() as usize] ^ square[to.code() as usize];
    }

    #[inline]
    pub fn update_phase(&mut self, from: Phase, to: Phase) {
        self.0 ^= KEYS.phase[from.index()] ^ KEYS.phase[to.index()];
    }

    #[inline]
    pub fn update_castling(&mut self, from: u8, to: u8) {
        self.0 ^= KEYS.castling[from as usize] ^ KEYS.castling[to as usize];
    }

    #[inline]
    pub fn update_en_passant(&mut self, from: Option<u8>, to: Option<u8>) {
        self.0 ^= en_passant_key(from) ^ en_passant_key(to);
    }
}

#[inline]
fn en_passant_key(col: Option<u8>) -> u64 {
    KEYS.en_passant[col.map_or(8, |c| c as usize)]
}

/// Hash of a board state computed feature by feature, for cross-checking the
/// incrementally maintained value.
pub fn full_hash(
    cells: &[Piece; Coord::NUM],
    phase: Phase,
    castling: u8,
    en_passant: Option<u8>,
) -> ZobristHash {
    let mut hash = 0u64;
    for (index, piece) in cells.iter().enumerate() {
        hash ^= KEYS.piece_on_square[index][piece.code() as usize];
    }
    hash ^= KEYS.phase[phase.index()];
    hash ^= KEYS.castling[castling as usize];
    hash ^= en_passant_key(en_passant);
    ZobristHash(hash)
}

/// The hash of an empty board in the white piece phase with no rights set.
/// Mirrors [`full_hash`] over the all-empty feature set.
pub fn empty_board_hash() -> ZobristHash {
    full_hash(&[Piece::EMPTY; Coord::NUM], Phase::WhitePieceMove, 0, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_piece_round_trip() {
        let mut hash = empty_board_hash();
        let original = hash;

        hash.update_piece(Coord::E2, Piece::EMPTY, Piece::WHITE_PAWN);
        assert_ne!(hash, original);
        hash.update_piece(Coord::E2, Piece::WHITE_PAWN, Piece::EMPTY);
        assert_eq!(hash, original);
    }

    #[test]
    fn test_phase_and_flags_feed_the_hash() {
        let mut hash = empty_board_hash();
        let original = hash;

        hash.update_phase(Phase::WhitePieceMove, Phase::BlackPieceMove);
        assert_ne!(hash, original);

        hash.update_castling(0, 0b1111);
        hash.update_en_passant(None, Some(4));
        assert_ne!(hash, original);

        hash.update_en_passant(Some(4), None);
        hash.update_castling(0b1111, 0);
        hash.update_phase(Phase::BlackPieceMove, Phase::WhitePieceMove);
        assert_eq!(hash, original);
    }

    #[test]
    fn test_matches_full_recomputation() {
        let mut cells = [Piece::EMPTY; Coord::NUM];
        let mut hash = empty_board_hash();

        cells[Coord::D1.index()] = Piece::WHITE_QUEEN;
        hash.update_piece(Coord::D1, Piece::EMPTY, Piece::WHITE_QUEEN);
        cells[Coord::D4.index()] = Piece::DUCK;
        hash.update_piece(Coord::D4, Piece::EMPTY, Piece::DUCK);
        hash.update_phase(Phase::WhitePieceMove, Phase::BlackPieceMove);
        hash.update_castling(0, 0b0011);
        hash.update_en_passant(None, Some(2));

        assert_eq!(hash, full_hash(&cells, Phase::BlackPieceMove, 0b0011, Some(2)));
    }
}
