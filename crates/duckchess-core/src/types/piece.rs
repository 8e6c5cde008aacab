//! Piece codes
//!
//! 14 codes: empty, the neutral duck, and the 12 colored pieces. White codes
//! are even, black codes odd (above the duck), which makes the color tests
//! single bit operations.

/// A cell content code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of distinct codes.
    pub const NUM: usize = 14;

    pub const EMPTY: Piece = Piece(0);
    pub const DUCK: Piece = Piece(1);
    pub const WHITE_BISHOP: Piece = Piece(2);
    pub const BLACK_BISHOP: Piece = Piece(3);
    pub const WHITE_KNIGHT: Piece = Piece(4);
    pub const BLACK_KNIGHT: Piece = Piece(5);
    pub const WHITE_QUEEN: Piece = Piece(6);
    pub const BLACK_QUEEN: Piece = Piece(7);
    pub const WHITE_KING: Piece = Piece(8);
    pub const BLACK_KING: Piece = Piece(9);
    pub const WHITE_ROOK: Piece = Piece(10);
    pub const BLACK_ROOK: Piece = Piece(11);
    pub const WHITE_PAWN: Piece = Piece(12);
    pub const BLACK_PAWN: Piece = Piece(13);

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        self.0 > 1 && self.0 & 1 == 0
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        self.0 > 1 && self.0 & 1 == 1
    }

    /// Board-notation letter (uppercase white, lowercase black, `X` duck).
    pub const fn letter(self) -> char {
        match self {
            Piece::DUCK => 'X',
            Piece::WHITE_BISHOP => 'B',
            Piece::BLACK_BISHOP => 'b',
            Piece::WHITE_PAWN => 'P',
            Piece::BLACK_PAWN => 'p',
            Piece::WHITE_KNIGHT => 'N',
            Piece::BLACK_KNIGHT => 'n',
            Piece::WHITE_ROOK => 'R',
            Piece::BLACK_ROOK => 'r',
            Piece::WHITE_QUEEN => 'Q',
            Piece::BLACK_QUEEN => 'q',
            Piece::WHITE_KING => 'K',
            Piece::BLACK_KING => 'k',
            _ => ' ',
        }
    }

    /// Inverse of [`Piece::letter`]; `None` for an unknown letter.
    pub const fn from_letter(letter: char) -> Option<Piece> {
        Some(match letter {
            ' ' => Piece::EMPTY,
            'X' => Piece::DUCK,
            'B' => Piece::WHITE_BISHOP,
            'b' => Piece::BLACK_BISHOP,
            'P' => Piece::WHITE_PAWN,
            'p' => Piece::BLACK_PAWN,
            'N' => Piece::WHITE_KNIGHT,
            'n' => Piece::BLACK_KNIGHT,
            'R' => Piece::WHITE_ROOK,
            'r' => Piece::BLACK_ROOK,
            'Q' => Piece::WHITE_QUEEN,
            'q' => Piece::BLACK_QUEEN,
            'K' => Piece::WHITE_KING,
            'k' => Piece::BLACK_KING,
            _ => return None,
        })
    }
}
