//! Moves and their application
//!
//! A move knows how to apply itself to a board and how to take itself back.
//! `apply` returns an [`Undo`] record with the state a later [`Move::undo`]
//! cannot reconstruct (castling rights, en-passant column, phase, result, the
//! captured piece, the duck's previous square).
//!
//! `to` of an en-passant move is the square of the captured pawn; the
//! capturing pawn lands one rank beyond it.

use std::sync::LazyLock;

use crate::board::{
    Board, BLACK_LONG_CASTLE, BLACK_SHORT_CASTLE, WHITE_LONG_CASTLE, WHITE_SHORT_CASTLE,
};
use crate::types::{Coord, GameResult, Phase, Piece};

/// One piece move or duck relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    DiagonalSlide { from: Coord, to: Coord },
    DiagonalCapture { from: Coord, to: Coord },
    StraightSlide { from: Coord, to: Coord },
    StraightCapture { from: Coord, to: Coord },
    KnightSlide { from: Coord, to: Coord },
    KnightCapture { from: Coord, to: Coord },
    KingSlide { from: Coord, to: Coord },
    KingCapture { from: Coord, to: Coord },
    PawnOneStep { from: Coord, to: Coord },
    PawnTwoStep { from: Coord, to: Coord },
    PawnCapture { from: Coord, to: Coord },
    /// `to` is the captured pawn's square, not the destination.
    EnPassant { from: Coord, to: Coord },
    Promotion { from: Coord, to: Coord, piece: Piece },
    CapturePromotion { from: Coord, to: Coord, piece: Piece },
    WhiteShortCastle,
    WhiteLongCastle,
    BlackShortCastle,
    BlackLongCastle,
    DuckTo { to: Coord },
}

/// State a move application destroys, needed to take the move back.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    castling: u8,
    en_passant: Option<u8>,
    phase: Phase,
    result: GameResult,
    captured: Piece,
    duck_from: Option<Coord>,
}

impl Move {
    /// Applies the move, advancing the phase, and returns the undo record.
    pub fn apply(self, board: &mut Board) -> Undo {
        let mut undo = Undo {
            castling: board.castling_bits(),
            en_passant: board.en_passant_col(),
            phase: board.phase(),
            result: board.result(),
            captured: Piece::EMPTY,
            duck_from: None,
        };

        // The en-passant window stays open across the duck relocation that
        // completes the same player's round.
        if !matches!(self, Move::DuckTo { .. }) {
            board.set_en_passant_col(None);
        }
        board.set_phase(undo.phase.next());

        match self {
            Move::DiagonalSlide { from, to }
            | Move::StraightSlide { from, to }
            | Move::KnightSlide { from, to }
            | Move::KingSlide { from, to }
            | Move::PawnOneStep { from, to } => {
                let piece = board.get(from);
                board.set(from, Piece::EMPTY);
                board.set(to, piece);
                update_castling_rights(board, from);
            }
            Move::DiagonalCapture { from, to }
            | Move::StraightCapture { from, to }
            | Move::KnightCapture { from, to }
            | Move::KingCapture { from, to }
            | Move::PawnCapture { from, to } => {
                let piece = board.get(from);
                undo.captured = board.get(to);
                board.set(from, Piece::EMPTY);
                board.set(to, piece);
                board.set_result(result_after_capture(undo.captured));
                update_castling_rights(board, from);
                update_castling_rights(board, to);
                board.dec_pieces_left();
            }
            Move::PawnTwoStep { from, to } => {
                let piece = board.get(from);
                board.set(from, Piece::EMPTY);
                board.set(to, piece);
                board.set_en_passant_col(Some(from.col().0));
            }
            Move::EnPassant { from, to } => {
                let piece = board.get(from);
                undo.captured = board.get(to);
                board.set(from, Piece::EMPTY);
                board.set(to, Piece::EMPTY);
                board.set(en_passant_destination(piece, to), piece);
                board.dec_pieces_left();
            }
            Move::Promotion { from, to, piece } => {
                board.set(from, Piece::EMPTY);
                board.set(to, piece);
            }
            Move::CapturePromotion { from, to, piece } => {
                undo.captured = board.get(to);
                board.set(from, Piece::EMPTY);
                board.set(to, piece);
                board.set_result(result_after_capture(undo.captured));
                update_castling_rights(board, to);
                board.dec_pieces_left();
            }
            Move::WhiteShortCastle => {
                board.set(Coord::E1, Piece::EMPTY);
                board.set(Coord::F1, Piece::WHITE_ROOK);
                board.set(Coord::G1, Piece::WHITE_KING);
                board.set(Coord::H1, Piece::EMPTY);
                board.clear_castling_bits(WHITE_SHORT_CASTLE | WHITE_LONG_CASTLE);
            }
            Move::WhiteLongCastle => {
                board.set(Coord::A1, Piece::EMPTY);
                board.set(Coord::C1, Piece::WHITE_KING);
                board.set(Coord::D1, Piece::WHITE_ROOK);
                board.set(Coord::E1, Piece::EMPTY);
                board.clear_castling_bits(WHITE_SHORT_CASTLE | WHITE_LONG_CASTLE);
            }
            Move::BlackShortCastle => {
                board.set(Coord::E8, Piece::EMPTY);
                board.set(Coord::F8, Piece::BLACK_ROOK);
                board.set(Coord::G8, Piece::BLACK_KING);
                board.set(Coord::H8, Piece::EMPTY);
                board.clear_castling_bits(BLACK_SHORT_CASTLE | BLACK_LONG_CASTLE);
            }
            Move::BlackLongCastle => {
                board.set(Coord::A8, Piece::EMPTY);
                board.set(Coord::C8, Piece::BLACK_KING);
                board.set(Coord::D8, Piece::BLACK_ROOK);
                board.set(Coord::E8, Piece::EMPTY);
                board.clear_castling_bits(BLACK_SHORT_CASTLE | BLACK_LONG_CASTLE);
            }
            Move::DuckTo { to } => {
                undo.duck_from = board.duck_position();
                if let Some(duck) = undo.duck_from {
                    board.set(duck, Piece::EMPTY);
                }
                board.set(to, Piece::DUCK);
                board.set_duck_position(Some(to));
            }
        }

        undo
    }

    /// Takes the move back, restoring the board to the state `apply` saw.
    pub fn undo(self, board: &mut Board, undo: Undo) {
        match self {
            Move::DiagonalSlide { from, to }
            | Move::StraightSlide { from, to }
            | Move::KnightSlide { from, to }
            | Move::KingSlide { from, to }
            | Move::PawnOneStep { from, to }
            | Move::PawnTwoStep { from, to } => {
                let piece = board.get(to);
                board.set(to, Piece::EMPTY);
                board.set(from, piece);
            }
            Move::DiagonalCapture { from, to }
            | Move::StraightCapture { from, to }
            | Move::KnightCapture { from, to }
            | Move::KingCapture { from, to }
            | Move::PawnCapture { from, to } => {
                let piece = board.get(to);
                board.set(to, undo.captured);
                board.set(from, piece);
                board.inc_pieces_left();
            }
            Move::EnPassant { from, to } => {
                let dest = en_passant_destination(
                    if undo.captured == Piece::WHITE_PAWN {
                        Piece::BLACK_PAWN
                    } else {
                        Piece::WHITE_PAWN
                    },
                    to,
                );
                let piece = board.get(dest);
                board.set(dest, Piece::EMPTY);
                board.set(from, piece);
                board.set(to, undo.captured);
                board.inc_pieces_left();
            }
            Move::Promotion { from, to, piece } => {
                board.set(to, Piece::EMPTY);
                board.set(from, pawn_of_same_color(piece));
            }
            Move::CapturePromotion { from, to, piece } => {
                board.set(to, undo.captured);
                board.set(from, pawn_of_same_color(piece));
                board.inc_pieces_left();
            }
            Move::WhiteShortCastle => {
                board.set(Coord::E1, Piece::WHITE_KING);
                board.set(Coord::F1, Piece::EMPTY);
                board.set(Coord::G1, Piece::EMPTY);
                board.set(Coord::H1, Piece::WHITE_ROOK);
            }
            Move::WhiteLongCastle => {
                board.set(Coord::A1, Piece::WHITE_ROOK);
                board.set(Coord::C1, Piece::EMPTY);
                board.set(Coord::D1, Piece::EMPTY);
                board.set(Coord::E1, Piece::WHITE_KING);
            }
            Move::BlackShortCastle => {
                board.set(Coord::E8, Piece::BLACK_KING);
                board.set(Coord::F8, Piece::EMPTY);
                board.set(Coord::G8, Piece::EMPTY);
                board.set(Coord::H8, Piece::BLACK_ROOK);
            }
            Move::BlackLongCastle => {
                board.set(Coord::A8, Piece::BLACK_ROOK);
                board.set(Coord::C8, Piece::EMPTY);
                board.set(Coord::D8, Piece::EMPTY);
                board.set(Coord::E8, Piece::BLACK_KING);
            }
            Move::DuckTo { to } => {
                board.set(to, Piece::EMPTY);
                if let Some(duck) = undo.duck_from {
                    board.set(duck, Piece::DUCK);
                }
                board.set_duck_position(undo.duck_from);
            }
        }

        board.set_castling_bits(undo.castling);
        board.set_en_passant_col(undo.en_passant);
        board.set_phase(undo.phase);
        board.set_result(undo.result);
    }

    /// Would a duck standing on `duck` make this move illegal?
    pub fn blocked_by_duck_at(self, duck: Coord) -> bool {
        match self {
            Move::DiagonalSlide { from, to }
            | Move::DiagonalCapture { from, to }
            | Move::StraightSlide { from, to }
            | Move::StraightCapture { from, to } => slide_blocked(from, to, duck),
            Move::KnightSlide { to, .. }
            | Move::KingSlide { to, .. }
            | Move::PawnOneStep { to, .. }
            | Move::Promotion { to, .. } => duck == to,
            Move::PawnTwoStep { from, to } => {
                duck == to || duck.index() == (from.index() + to.index()) / 2
            }
            Move::EnPassant { to, .. } => {
                // Capturer and captured pawn share a rank; only the landing
                // square beyond the captured pawn can be duck-blocked.
                let piece = if to.row().0 == 4 { Piece::WHITE_PAWN } else { Piece::BLACK_PAWN };
                duck == en_passant_destination(piece, to)
            }
            Move::WhiteShortCastle => duck == Coord::F1 || duck == Coord::G1,
            Move::WhiteLongCastle => {
                duck == Coord::B1 || duck == Coord::C1 || duck == Coord::D1
            }
            Move::BlackShortCastle => duck == Coord::F8 || duck == Coord::G8,
            Move::BlackLongCastle => {
                duck == Coord::B8 || duck == Coord::C8 || duck == Coord::D8
            }
            // Capture destinations are occupied, so the duck cannot stand
            // there; duck relocations target empty squares by construction.
            _ => false,
        }
    }

    /// Slides of non-pawn pieces can be taken back next round; everything
    /// else resets the repetition horizon.
    #[inline]
    pub fn is_reversible(self) -> bool {
        matches!(
            self,
            Move::DiagonalSlide { .. }
                | Move::StraightSlide { .. }
                | Move::KnightSlide { .. }
                | Move::KingSlide { .. }
        )
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        matches!(
            self,
            Move::DiagonalCapture { .. }
                | Move::StraightCapture { .. }
                | Move::KnightCapture { .. }
                | Move::KingCapture { .. }
                | Move::PawnCapture { .. }
                | Move::EnPassant { .. }
                | Move::CapturePromotion { .. }
        )
    }

    /// Captures and promotions; these get searched a little deeper near the
    /// horizon.
    #[inline]
    pub fn is_tactical(self) -> bool {
        self.is_capture() || matches!(self, Move::Promotion { .. })
    }

    /// Human-readable notation, looking up the moving piece on `board`.
    /// Captures use `X`, en-passant a trailing `ep`, castles `0-0`/`0-0-0`.
    pub fn text(self, board: &Board) -> String {
        let simple = |from: Coord, to: Coord| {
            format!("{}{}-{}", board.get(from).letter(), from.text(), to.text())
        };
        let capture = |from: Coord, to: Coord| {
            format!("{}{}X{}", board.get(from).letter(), from.text(), to.text())
        };
        match self {
            Move::DiagonalSlide { from, to }
            | Move::StraightSlide { from, to }
            | Move::KnightSlide { from, to }
            | Move::KingSlide { from, to }
            | Move::PawnOneStep { from, to }
            | Move::PawnTwoStep { from, to } => simple(from, to),
            Move::DiagonalCapture { from, to }
            | Move::StraightCapture { from, to }
            | Move::KnightCapture { from, to }
            | Move::KingCapture { from, to }
            | Move::PawnCapture { from, to } => capture(from, to),
            Move::EnPassant { from, to } => {
                format!("{}{}x{}ep", board.get(from).letter(), from.text(), to.text())
            }
            Move::Promotion { from, to, piece } => {
                format!("{}{}", simple(from, to), piece.letter())
            }
            Move::CapturePromotion { from, to, piece } => {
                format!("{}{}", capture(from, to), piece.letter())
            }
            Move::WhiteShortCastle | Move::BlackShortCastle => "0-0".to_string(),
            Move::WhiteLongCastle | Move::BlackLongCastle => "0-0-0".to_string(),
            Move::DuckTo { to } => format!("{}{}", Piece::DUCK.letter(), to.text()),
        }
    }
}

/// Capturing a king decides the game.
#[inline]
fn result_after_capture(captured: Piece) -> GameResult {
    match captured {
        Piece::BLACK_KING => GameResult::WhiteWon,
        Piece::WHITE_KING => GameResult::BlackWon,
        _ => GameResult::Undecided,
    }
}

/// Where the capturing pawn lands: one rank beyond the captured pawn.
#[inline]
fn en_passant_destination(capturer: Piece, captured_square: Coord) -> Coord {
    if capturer == Piece::WHITE_PAWN {
        captured_square.one_up()
    } else {
        captured_square.one_down()
    }
}

fn update_castling_rights(board: &mut Board, touched: Coord) {
    match touched {
        Coord::A1 => board.clear_castling_bits(WHITE_LONG_CASTLE),
        Coord::E1 => board.clear_castling_bits(WHITE_SHORT_CASTLE | WHITE_LONG_CASTLE),
        Coord::H1 => board.clear_castling_bits(WHITE_SHORT_CASTLE),
        Coord::A8 => board.clear_castling_bits(BLACK_LONG_CASTLE),
        Coord::E8 => board.clear_castling_bits(BLACK_SHORT_CASTLE | BLACK_LONG_CASTLE),
        Coord::H8 => board.clear_castling_bits(BLACK_SHORT_CASTLE),
        _ => {}
    }
}

#[inline]
fn pawn_of_same_color(promoted: Piece) -> Piece {
    if promoted.is_white() {
        Piece::WHITE_PAWN
    } else {
        Piece::BLACK_PAWN
    }
}

#[inline]
fn slide_blocked(from: Coord, to: Coord, duck: Coord) -> bool {
    SLIDE_BLOCKS[(from.index() * 64 + to.index()) * 64 + duck.index()]
}

/// For every sliding (from, to) pair, the squares a duck would block it from:
/// everything strictly between them plus the destination itself.
static SLIDE_BLOCKS: LazyLock<Box<[bool]>> = LazyLock::new(|| {
    let mut blocked = vec![false; 64 * 64 * 64].into_boxed_slice();
    let rays: [fn(Coord, &mut dyn FnMut(Coord) -> bool); 8] = [
        |c, f| c.ray_up_right(f),
        |c, f| c.ray_up_left(f),
        |c, f| c.ray_down_right(f),
        |c, f| c.ray_down_left(f),
        |c, f| c.ray_up(f),
        |c, f| c.ray_down(f),
        |c, f| c.ray_left(f),
        |c, f| c.ray_right(f),
    ];
    Coord::for_each(|from| {
        for ray in rays {
            ray(from, &mut |duck| {
                ray(duck, &mut |to| {
                    blocked[(from.index() * 64 + to.index()) * 64 + duck.index()] = true;
                    true
                });
                blocked[(from.index() * 64 + duck.index()) * 64 + duck.index()] = true;
                true
            });
        }
    });
    blocked
});
