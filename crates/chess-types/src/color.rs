//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the pawn direction for this color (+1 for White, -1 for Black).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns the home rank index on a board with `ranks` ranks.
    #[inline]
    pub const fn back_rank(self, ranks: u8) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => ranks - 1,
        }
    }

    /// Converts a rank index seen from this side into an absolute rank index.
    #[inline]
    pub const fn relative_rank(self, rank: u8, ranks: u8) -> u8 {
        match self {
            Color::White => rank,
            Color::Black => ranks - 1 - rank,
        }
    }

    /// Returns the FEN side-to-move character.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a FEN side-to-move character.
    #[inline]
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opposite()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn back_rank_depends_on_board_height() {
        assert_eq!(Color::White.back_rank(8), 0);
        assert_eq!(Color::Black.back_rank(8), 7);
        assert_eq!(Color::Black.back_rank(5), 4);
    }

    #[test]
    fn relative_rank() {
        assert_eq!(Color::White.relative_rank(1, 8), 1);
        assert_eq!(Color::Black.relative_rank(1, 8), 6);
        assert_eq!(Color::Black.relative_rank(1, 6), 4);
    }

    #[test]
    fn fen_chars() {
        assert_eq!(Color::from_fen_char('w'), Some(Color::White));
        assert_eq!(Color::from_fen_char('b'), Some(Color::Black));
        assert_eq!(Color::from_fen_char('W'), None);
        assert_eq!(Color::Black.fen_char(), 'b');
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
    }
}
