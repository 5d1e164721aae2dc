//! Castling rights.

use chess_types::{Color, Square};

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// File the king lands on.
    #[inline]
    pub const fn king_to_file(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// File the rook starts on.
    #[inline]
    pub const fn rook_from_file(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// File the rook lands on.
    #[inline]
    pub const fn rook_to_file(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }
}

/// Square the king of `color` must stand on to castle.
#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// Square the castling rook of `color` starts on.
#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::King) => Square::H1,
        (Color::White, CastleSide::Queen) => Square::A1,
        (Color::Black, CastleSide::King) => Square::H8,
        (Color::Black, CastleSide::Queen) => Square::A8,
    }
}

/// The four independent castling rights, as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates rights from raw flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Bit position of one right, also used to index its Zobrist key.
    #[inline]
    pub const fn index(color: Color, side: CastleSide) -> usize {
        color.index() * 2
            + match side {
                CastleSide::King => 0,
                CastleSide::Queen => 1,
            }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & (1 << Self::index(color, side)) != 0
    }

    /// Returns true if `color` holds either right.
    #[inline]
    pub const fn has_any(self, color: Color) -> bool {
        self.has(color, CastleSide::King) || self.has(color, CastleSide::Queen)
    }

    #[inline]
    pub fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= 1 << Self::index(color, side);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !(1 << Self::index(color, side));
    }

    /// Removes both rights of a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::King);
        self.remove(color, CastleSide::Queen);
    }

    /// Drops every right that a move touching `sq` revokes: moving from or to
    /// a king's or rook's home square.
    #[inline]
    pub fn touch(&mut self, sq: Square) {
        for color in Color::ALL {
            if sq == king_home(color) {
                self.remove_color(color);
            }
            for side in CastleSide::ALL {
                if sq == rook_home(color, side) {
                    self.remove(color, side);
                }
            }
        }
    }

    /// Iterates over the indices of the rights held.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..4).filter(move |i| self.0 & (1 << i) != 0)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field. The field must already be syntax-checked.
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            match c {
                'K' => rights.set(Color::White, CastleSide::King),
                'Q' => rights.set(Color::White, CastleSide::Queen),
                'k' => rights.set(Color::Black, CastleSide::King),
                'q' => rights.set(Color::Black, CastleSide::Queen),
                _ => {}
            }
        }
        rights
    }

    /// Writes the FEN castling field ("-" when no right is held).
    pub fn to_fen_field(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        for (color, side, c) in [
            (Color::White, CastleSide::King, 'K'),
            (Color::White, CastleSide::Queen, 'Q'),
            (Color::Black, CastleSide::King, 'k'),
            (Color::Black, CastleSide::Queen, 'q'),
        ] {
            if self.has(color, side) {
                field.push(c);
            }
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_field_roundtrip() {
        for field in ["KQkq", "Kq", "k", "-"] {
            assert_eq!(CastlingRights::from_fen_field(field).to_fen_field(), field);
        }
        assert_eq!(CastlingRights::from_fen_field("qK").to_fen_field(), "Kq");
    }

    #[test]
    fn king_move_clears_both() {
        let mut rights = CastlingRights::ALL;
        rights.touch(Square::E1);
        assert!(!rights.has_any(Color::White));
        assert!(rights.has(Color::Black, CastleSide::King));
        assert!(rights.has(Color::Black, CastleSide::Queen));
    }

    #[test]
    fn rook_square_clears_one() {
        let mut rights = CastlingRights::ALL;
        rights.touch(Square::H8);
        assert!(!rights.has(Color::Black, CastleSide::King));
        assert!(rights.has(Color::Black, CastleSide::Queen));
        rights.touch(Square::A1);
        assert_eq!(rights.to_fen_field(), "Kq");
    }

    #[test]
    fn unrelated_square_keeps_rights() {
        let mut rights = CastlingRights::ALL;
        rights.touch(Square::from_algebraic("e4").unwrap());
        assert_eq!(rights, CastlingRights::ALL);
    }

    #[test]
    fn indices_follow_flags() {
        let rights = CastlingRights::new(CastlingRights::WHITE_QUEENSIDE | CastlingRights::BLACK_KINGSIDE);
        assert_eq!(rights.indices().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(CastlingRights::index(Color::Black, CastleSide::Queen), 3);
    }
}
