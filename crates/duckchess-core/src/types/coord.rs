//! Board coordinates
//!
//! Squares are numbered 0..64, row-major from A1. `Coord` carries the raw
//! index; ray walks and the knight-offset table live here as pure geometry,
//! with no knowledge of piece placement.

use std::sync::LazyLock;

/// A rank (0 = rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row(pub u8);

impl Row {
    pub fn text(self) -> String {
        format!("{}", self.0 + 1)
    }
}

/// A file (0 = file A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Col(pub u8);

impl Col {
    pub fn text(self) -> String {
        ((b'A' + self.0) as char).to_string()
    }
}

/// A square index (0..64), row-major from A1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(u8);

macro_rules! coords {
    ($($name:ident = $idx:expr),+ $(,)?) => {
        $(pub const $name: Coord = Coord($idx);)+
    };
}

impl Coord {
    /// Number of squares on the board.
    pub const NUM: usize = 64;

    #[rustfmt::skip]
    coords! {
        A1 = 0,  B1 = 1,  C1 = 2,  D1 = 3,  E1 = 4,  F1 = 5,  G1 = 6,  H1 = 7,
        A2 = 8,  B2 = 9,  C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
        A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
        A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
        A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
        A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
        A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
        A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
    }

    #[inline]
    pub const fn from_index(index: usize) -> Coord {
        debug_assert!(index < Coord::NUM);
        Coord(index as u8)
    }

    #[inline]
    pub const fn new(row: u8, col: u8) -> Coord {
        Coord(row * 8 + col)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn row(self) -> Row {
        Row(self.0 / 8)
    }

    #[inline]
    pub const fn col(self) -> Col {
        Col(self.0 % 8)
    }

    pub fn text(self) -> String {
        format!("{}{}", self.col().text(), self.row().text())
    }

    /// Visits every square in index order.
    #[inline]
    pub fn for_each(mut block: impl FnMut(Coord)) {
        for i in 0..Coord::NUM {
            block(Coord(i as u8));
        }
    }

    /// First square satisfying the predicate, in index order.
    pub fn first_matching(mut predicate: impl FnMut(Coord) -> bool) -> Option<Coord> {
        (0..Coord::NUM).map(|i| Coord(i as u8)).find(|c| predicate(*c))
    }

    /// Visits the up-to-eight king neighbours.
    #[inline]
    pub fn neighbours(self, mut block: impl FnMut(Coord)) {
        let col = self.0 % 8;
        if self.0 < Coord::A8.0 {
            if col > 0 {
                block(Coord(self.0 + 7));
            }
            block(Coord(self.0 + 8));
            if col < 7 {
                block(Coord(self.0 + 9));
            }
        }
        if col > 0 {
            block(Coord(self.0 - 1));
        }
        if col < 7 {
            block(Coord(self.0 + 1));
        }
        if self.0 > Coord::H1.0 {
            if col > 0 {
                block(Coord(self.0 - 9));
            }
            block(Coord(self.0 - 8));
            if col < 7 {
                block(Coord(self.0 - 7));
            }
        }
    }

    /// Knight destinations from this square (precomputed).
    #[inline]
    pub fn knight_targets(self) -> &'static [Coord] {
        let (targets, n) = &KNIGHT_TARGETS[self.index()];
        &targets[..*n]
    }

    // Ray walks. `block` returns false to stop (blocked square reached).

    #[inline]
    pub fn ray_up_right(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let mut row = self.0 / 8;
        while row < 7 && col < 7 {
            col += 1;
            row += 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_up_left(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let mut row = self.0 / 8;
        while row < 7 && col > 0 {
            col -= 1;
            row += 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_down_right(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let mut row = self.0 / 8;
        while row > 0 && col < 7 {
            col += 1;
            row -= 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_down_left(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let mut row = self.0 / 8;
        while row > 0 && col > 0 {
            col -= 1;
            row -= 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_right(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let row = self.0 / 8;
        while col < 7 {
            col += 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_left(self, mut block: impl FnMut(Coord) -> bool) {
        let mut col = self.0 % 8;
        let row = self.0 / 8;
        while col > 0 {
            col -= 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_up(self, mut block: impl FnMut(Coord) -> bool) {
        let col = self.0 % 8;
        let mut row = self.0 / 8;
        while row < 7 {
            row += 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub fn ray_down(self, mut block: impl FnMut(Coord) -> bool) {
        let col = self.0 % 8;
        let mut row = self.0 / 8;
        while row > 0 {
            row -= 1;
            if !block(Coord(row * 8 + col)) {
                break;
            }
        }
    }

    #[inline]
    pub const fn one_up(self) -> Coord {
        Coord(self.0 + 8)
    }

    #[inline]
    pub const fn two_up(self) -> Coord {
        Coord(self.0 + 16)
    }

    #[inline]
    pub const fn one_down(self) -> Coord {
        Coord(self.0 - 8)
    }

    #[inline]
    pub const fn two_down(self) -> Coord {
        Coord(self.0 - 16)
    }

    /// Visits the up-to-two white pawn capture squares (diagonally up).
    #[inline]
    pub fn white_pawn_captures(self, mut block: impl FnMut(Coord)) {
        let col = self.0 % 8;
        if col < 7 {
            block(Coord(self.0 + 9));
        }
        if col > 0 {
            block(Coord(self.0 + 7));
        }
    }

    /// Visits the up-to-two black pawn capture squares (diagonally down).
    #[inline]
    pub fn black_pawn_captures(self, mut block: impl FnMut(Coord)) {
        let col = self.0 % 8;
        if col < 7 {
            block(Coord(self.0 - 7));
        }
        if col > 0 {
            block(Coord(self.0 - 9));
        }
    }

    #[inline]
    pub const fn is_second_row(self) -> bool {
        self.0 >= Coord::A2.0 && self.0 <= Coord::H2.0
    }

    #[inline]
    pub const fn is_seventh_row(self) -> bool {
        self.0 >= Coord::A7.0 && self.0 <= Coord::H7.0
    }
}

/// Per-square knight destinations, padded to eight with a live count.
static KNIGHT_TARGETS: LazyLock<[([Coord; 8], usize); 64]> = LazyLock::new(|| {
    let mut table = [([Coord::A1; 8], 0usize); 64];
    for (from_idx, slot) in table.iter_mut().enumerate() {
        let col = (from_idx % 8) as i32;
        let row = (from_idx / 8) as i32;
        let mut n = 0;
        for (dc, dr) in [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)] {
            let (nc, nr) = (col + dc, row + dr);
            if (0..8).contains(&nc) && (0..8).contains(&nr) {
                slot.0[n] = Coord::new(nr as u8, nc as u8);
                n += 1;
            }
        }
        slot.1 = n;
    }
    table
});
