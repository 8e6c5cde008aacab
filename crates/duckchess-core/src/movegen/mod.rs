//! Move generation
//!
//! Pseudo-legality is the same as legality here: there is no check concept,
//! so every generated move may be played. The duck blocks like a wall that
//! belongs to neither side. Duck phases generate one relocation per empty
//! square.

use smallvec::SmallVec;

use crate::board::Board;
use crate::moves::Move;
use crate::types::{Coord, Phase, Piece};

/// Upper bound on moves in one phase; duck phases can reach 63.
pub const MAX_MOVES: usize = 128;

pub type MoveList = SmallVec<[Move; MAX_MOVES]>;

pub fn generate_moves(board: &Board, consumer: &mut impl FnMut(Move)) {
    match board.phase() {
        Phase::WhitePieceMove => piece_moves(board, true, consumer),
        Phase::BlackPieceMove => piece_moves(board, false, consumer),
        Phase::WhiteDuckMove | Phase::BlackDuckMove => duck_moves(board, consumer),
    }
}

/// All moves of the current phase as a list.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    generate_moves(board, &mut |mv| moves.push(mv));
    moves
}

fn duck_moves(board: &Board, consumer: &mut impl FnMut(Move)) {
    Coord::for_each(|to| {
        if board.get(to) == Piece::EMPTY {
            consumer(Move::DuckTo { to });
        }
    });
}

fn piece_moves(board: &Board, white: bool, consumer: &mut impl FnMut(Move)) {
    Coord::for_each(|from| {
        let piece = board.get(from);
        if white {
            match piece {
                Piece::WHITE_BISHOP => bishop_moves(board, from, white, consumer),
                Piece::WHITE_ROOK => rook_moves(board, from, white, consumer),
                Piece::WHITE_QUEEN => {
                    bishop_moves(board, from, white, consumer);
                    rook_moves(board, from, white, consumer);
                }
                Piece::WHITE_KING => king_moves(board, from, white, consumer),
                Piece::WHITE_KNIGHT => knight_moves(board, from, white, consumer),
                Piece::WHITE_PAWN => white_pawn_moves(board, from, consumer),
                _ => {}
            }
        } else {
            match piece {
                Piece::BLACK_BISHOP => bishop_moves(board, from, white, consumer),
                Piece::BLACK_ROOK => rook_moves(board, from, white, consumer),
                Piece::BLACK_QUEEN => {
                    bishop_moves(board, from, white, consumer);
                    rook_moves(board, from, white, consumer);
                }
                Piece::BLACK_KING => king_moves(board, from, white, consumer),
                Piece::BLACK_KNIGHT => knight_moves(board, from, white, consumer),
                Piece::BLACK_PAWN => black_pawn_moves(board, from, consumer),
                _ => {}
            }
        }
    });

    en_passant_moves(board, white, consumer);
    castling_moves(board, white, consumer);
}

/// Emits a slide or a capture for one ray square; returns whether the ray
/// continues past it.
#[inline]
fn slide_through(
    board: &Board,
    from: Coord,
    to: Coord,
    white: bool,
    slide: fn(Coord, Coord) -> Move,
    capture: fn(Coord, Coord) -> Move,
    consumer: &mut impl FnMut(Move),
) -> bool {
    let destination = board.get(to);
    if destination == Piece::EMPTY {
        consumer(slide(from, to));
        true
    } else {
        if (white && destination.is_black()) || (!white && destination.is_white()) {
            consumer(capture(from, to));
        }
        false
    }
}

fn bishop_moves(board: &Board, from: Coord, white: bool, consumer: &mut impl FnMut(Move)) {
    let slide = |from, to| Move::DiagonalSlide { from, to };
    let capture = |from, to| Move::DiagonalCapture { from, to };
    from.ray_up_right(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_up_left(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_down_left(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_down_right(|to| slide_through(board, from, to, white, slide, capture, consumer));
}

fn rook_moves(board: &Board, from: Coord, white: bool, consumer: &mut impl FnMut(Move)) {
    let slide = |from, to| Move::StraightSlide { from, to };
    let capture = |from, to| Move::StraightCapture { from, to };
    from.ray_right(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_left(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_up(|to| slide_through(board, from, to, white, slide, capture, consumer));
    from.ray_down(|to| slide_through(board, from, to, white, slide, capture, consumer));
}

fn king_moves(board: &Board, from: Coord, white: bool, consumer: &mut impl FnMut(Move)) {
    from.neighbours(|to| {
        let destination = board.get(to);
        if destination == Piece::EMPTY {
            consumer(Move::KingSlide { from, to });
        } else if (white && destination.is_black()) || (!white && destination.is_white()) {
            consumer(Move::KingCapture { from, to });
        }
    });
}

fn knight_moves(board: &Board, from: Coord, white: bool, consumer: &mut impl FnMut(Move)) {
    for &to in from.knight_targets() {
        let destination = board.get(to);
        if destination == Piece::EMPTY {
            consumer(Move::KnightSlide { from, to });
        } else if (white && destination.is_black()) || (!white && destination.is_white()) {
            consumer(Move::KnightCapture { from, to });
        }
    }
}

fn white_pawn_moves(board: &Board, from: Coord, consumer: &mut impl FnMut(Move)) {
    let one_up = from.one_up();
    if from.is_second_row() {
        if board.get(one_up) == Piece::EMPTY {
            consumer(Move::PawnOneStep { from, to: one_up });
            let two_up = from.two_up();
            if board.get(two_up) == Piece::EMPTY {
                consumer(Move::PawnTwoStep { from, to: two_up });
            }
        }
    } else if !from.is_seventh_row() {
        if board.get(one_up) == Piece::EMPTY {
            consumer(Move::PawnOneStep { from, to: one_up });
        }
    } else {
        // There is never a reason to promote to a rook or a bishop.
        if board.get(one_up) == Piece::EMPTY {
            consumer(Move::Promotion { from, to: one_up, piece: Piece::WHITE_QUEEN });
            consumer(Move::Promotion { from, to: one_up, piece: Piece::WHITE_KNIGHT });
        }
        from.white_pawn_captures(|to| {
            if board.get(to).is_black() {
                consumer(Move::CapturePromotion { from, to, piece: Piece::WHITE_QUEEN });
                consumer(Move::CapturePromotion { from, to, piece: Piece::WHITE_KNIGHT });
            }
        });
    }

    if !from.is_seventh_row() {
        from.white_pawn_captures(|to| {
            if board.get(to).is_black() {
                consumer(Move::PawnCapture { from, to });
            }
        });
    }
}

fn black_pawn_moves(board: &Board, from: Coord, consumer: &mut impl FnMut(Move)) {
    let one_down = from.one_down();
    if from.is_seventh_row() {
        if board.get(one_down) == Piece::EMPTY {
            consumer(Move::PawnOneStep { from, to: one_down });
            let two_down = from.two_down();
            if board.get(two_down) == Piece::EMPTY {
                consumer(Move::PawnTwoStep { from, to: two_down });
            }
        }
    } else if !from.is_second_row() {
        if board.get(one_down) == Piece::EMPTY {
            consumer(Move::PawnOneStep { from, to: one_down });
        }
    } else {
        if board.get(one_down) == Piece::EMPTY {
            consumer(Move::Promotion { from, to: one_down, piece: Piece::BLACK_QUEEN });
            consumer(Move::Promotion { from, to: one_down, piece: Piece::BLACK_KNIGHT });
        }
        from.black_pawn_captures(|to| {
            if board.get(to).is_white() {
                consumer(Move::CapturePromotion { from, to, piece: Piece::BLACK_QUEEN });
                consumer(Move::CapturePromotion { from, to, piece: Piece::BLACK_KNIGHT });
            }
        });
    }

    if !from.is_second_row() {
        from.black_pawn_captures(|to| {
            if board.get(to).is_white() {
                consumer(Move::PawnCapture { from, to });
            }
        });
    }
}

fn en_passant_moves(board: &Board, white: bool, consumer: &mut impl FnMut(Move)) {
    let Some(col) = board.en_passant_col() else { return };
    // The victim sits where its two-step ended: rank 5 when white captures,
    // rank 4 when black does. The capturer stands beside it on the same rank.
    let (row, pawn) = if white { (4, Piece::WHITE_PAWN) } else { (3, Piece::BLACK_PAWN) };
    let to = Coord::new(row, col);
    let landing = if white { to.one_up() } else { to.one_down() };
    if board.get(landing) != Piece::EMPTY {
        return;
    }
    if col > 0 {
        let from = Coord::new(row, col - 1);
        if board.get(from) == pawn {
            consumer(Move::EnPassant { from, to });
        }
    }
    if col < 7 {
        let from = Coord::new(row, col + 1);
        if board.get(from) == pawn {
            consumer(Move::EnPassant { from, to });
        }
    }
}

fn castling_moves(board: &Board, white: bool, consumer: &mut impl FnMut(Move)) {
    if white {
        if board.white_short_castling_allowed() {
            assert!(
                board.get(Coord::E1) == Piece::WHITE_KING
                    && board.get(Coord::H1) == Piece::WHITE_ROOK,
                "castling rights out of sync with the board"
            );
            if board.get(Coord::F1) == Piece::EMPTY && board.get(Coord::G1) == Piece::EMPTY {
                consumer(Move::WhiteShortCastle);
            }
        }
        if board.white_long_castling_allowed() {
            assert!(
                board.get(Coord::E1) == Piece::WHITE_KING
                    && board.get(Coord::A1) == Piece::WHITE_ROOK,
                "castling rights out of sync with the board"
            );
            if board.get(Coord::B1) == Piece::EMPTY
                && board.get(Coord::C1) == Piece::EMPTY
                && board.get(Coord::D1) == Piece::EMPTY
            {
                consumer(Move::WhiteLongCastle);
            }
        }
    } else {
        if board.black_short_castling_allowed() {
            assert!(
                board.get(Coord::E8) == Piece::BLACK_KING
                    && board.get(Coord::H8) == Piece::BLACK_ROOK,
                "castling rights out of sync with the board"
            );
            if board.get(Coord::F8) == Piece::EMPTY && board.get(Coord::G8) == Piece::EMPTY {
                consumer(Move::BlackShortCastle);
            }
        }
        if board.black_long_castling_allowed() {
            assert!(
                board.get(Coord::E8) == Piece::BLACK_KING
                    && board.get(Coord::A8) == Piece::BLACK_ROOK,
                "castling rights out of sync with the board"
            );
            if board.get(Coord::B8) == Piece::EMPTY
                && board.get(Coord::C8) == Piece::EMPTY
                && board.get(Coord::D8) == Piece::EMPTY
            {
                consumer(Move::BlackLongCastle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_position, parse_board};
    use crate::types::Phase;

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let moves = legal_moves(&initial_position());
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&Move::PawnTwoStep { from: Coord::E2, to: Coord::E4 }));
        assert!(moves.contains(&Move::KnightSlide { from: Coord::G1, to: Coord::H3 }));
    }

    #[test]
    fn test_duck_phase_offers_every_empty_square() {
        let mut board = initial_position();
        Move::PawnTwoStep { from: Coord::E2, to: Coord::E4 }.apply(&mut board);
        let moves = legal_moves(&board);
        assert_eq!(board.phase(), Phase::WhiteDuckMove);
        assert_eq!(moves.len(), 32);
        assert!(moves.iter().all(|mv| matches!(mv, Move::DuckTo { .. })));

        // Once placed, the duck's own square is excluded: empties minus one.
        Move::DuckTo { to: Coord::E6 }.apply(&mut board);
        board.set_phase(Phase::BlackDuckMove);
        assert_eq!(legal_moves(&board).len(), 31);
    }

    #[test]
    fn test_duck_blocks_slides_and_is_never_captured() {
        let board = parse_board(
            "
            -----------------
            | | | | |k| | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | |X| | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            |R| | | |K| | | |
            ----------------- * ep: -1",
        )
        .unwrap();
        let moves = legal_moves(&board);
        // Rook on A1: the A-file ray stops short of the duck on D4.
        assert!(moves.contains(&Move::StraightSlide { from: Coord::A1, to: Coord::A4 }));
        assert!(!moves.iter().any(|mv| matches!(mv, Move::StraightCapture { to, .. } if *to == Coord::D4)));
        assert!(!moves.iter().any(|mv| matches!(mv, Move::StraightSlide { to, .. } if *to == Coord::D4)));
    }

    #[test]
    fn test_en_passant_generation() {
        let mut board = parse_board(
            "
            ----------------- *
            | | | | |k| | | |
            -----------------
            | | | |p| | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | |P| | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | |K| | | |
            ----------------- ep: -1",
        )
        .unwrap();
        Move::PawnTwoStep { from: Coord::D7, to: Coord::D5 }.apply(&mut board);
        board.set_phase(Phase::WhitePieceMove);

        let moves = legal_moves(&board);
        assert!(moves.contains(&Move::EnPassant { from: Coord::E5, to: Coord::D5 }));

        // No window, no capture.
        board.set_en_passant_col(None);
        assert!(!legal_moves(&board).iter().any(|mv| matches!(mv, Move::EnPassant { .. })));
    }

    #[test]
    fn test_en_passant_blocked_by_duck_on_landing_square() {
        let mut board = parse_board(
            "
            ----------------- *
            | | | | |k| | | |
            -----------------
            | | | |p| | | | |
            -----------------
            | | | |X| | | | |
            -----------------
            | | | | |P| | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | |K| | | |
            ----------------- ep: -1",
        )
        .unwrap();
        // Hand-crafted: black just played D7-D5 around the duck on D6.
        board.set(Coord::D7, Piece::EMPTY);
        board.set(Coord::D5, Piece::BLACK_PAWN);
        board.set_phase(Phase::WhitePieceMove);
        board.set_en_passant_col(Some(3));

        assert!(!legal_moves(&board).iter().any(|mv| matches!(mv, Move::EnPassant { .. })));
    }

    #[test]
    fn test_castling_generation_requires_empty_path_only() {
        let board = parse_board(
            "
            -----------------
            |r| | | |k| | |r|
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            |R| |X| |K| | |R|
            ----------------- * ep: -1",
        )
        .unwrap();
        let moves = legal_moves(&board);
        // The duck on C1 blocks the long castle; the short path is clear.
        assert!(moves.contains(&Move::WhiteShortCastle));
        assert!(!moves.contains(&Move::WhiteLongCastle));
    }

    #[test]
    fn test_promotion_moves() {
        let board = parse_board(
            "
            -----------------
            | | | |n|k| | | |
            -----------------
            | | |P| | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | |K| | | |
            ----------------- * ep: -1",
        )
        .unwrap();
        let moves = legal_moves(&board);
        let promotions: Vec<&Move> = moves
            .iter()
            .filter(|mv| {
                matches!(mv, Move::Promotion { .. } | Move::CapturePromotion { .. })
            })
            .collect();
        // Queen and knight each, straight ahead and capturing on D8.
        assert_eq!(promotions.len(), 4);
        assert!(moves.contains(&Move::CapturePromotion {
            from: Coord::C7,
            to: Coord::D8,
            piece: Piece::WHITE_KNIGHT,
        }));
    }

    #[test]
    fn test_king_capture_is_generated() {
        let board = parse_board(
            "
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | | | | | | |
            -----------------
            | | | |k| | | | |
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
        assert!(legal_moves(&board)
            .contains(&Move::PawnCapture { from: Coord::E4, to: Coord::D5 }));
    }
}
