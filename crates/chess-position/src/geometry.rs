//! Board size and king rules, fixed when a position is constructed.

use crate::SquareSet;
use chess_types::Color;

/// Options for building a position from FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenOptions {
    /// When false, kings are ordinary pieces: there is no check, no
    /// castling, and a king may be captured or be missing altogether.
    pub king_is_special: bool,
}

impl Default for FenOptions {
    fn default() -> Self {
        FenOptions {
            king_is_special: true,
        }
    }
}

/// The playing area of a position.
///
/// A board of `files` x `ranks` squares sits in the lower-left corner of the
/// 8x8 grid; every other square holds a permanent blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    pub files: u8,
    pub ranks: u8,
    pub king_is_special: bool,
}

impl BoardGeometry {
    /// The regular 8x8 board.
    pub const STANDARD: BoardGeometry = BoardGeometry {
        files: 8,
        ranks: 8,
        king_is_special: true,
    };

    /// Squares on the board.
    pub fn board_mask(self) -> SquareSet {
        let files = (0..self.files).fold(SquareSet::EMPTY, |acc, f| acc | SquareSet::file(f));
        let ranks = (0..self.ranks).fold(SquareSet::EMPTY, |acc, r| acc | SquareSet::rank(r));
        files & ranks
    }

    /// Squares outside the board, each holding a blocker.
    #[inline]
    pub fn blockers(self) -> SquareSet {
        !self.board_mask()
    }

    #[inline]
    pub const fn is_standard(self) -> bool {
        self.files == 8 && self.ranks == 8
    }

    /// Rank index on which pawns of `color` promote.
    #[inline]
    pub const fn promotion_rank(self, color: Color) -> u8 {
        match color {
            Color::White => self.ranks.saturating_sub(1),
            Color::Black => 0,
        }
    }

    /// Rank index from which pawns of `color` may advance two squares.
    #[inline]
    pub const fn double_push_rank(self, color: Color) -> u8 {
        match color {
            Color::White => 1,
            Color::Black => self.ranks.saturating_sub(2),
        }
    }

    /// First and last rank of the board, where pawns may never stand.
    pub fn back_ranks(self) -> SquareSet {
        SquareSet::rank(0) | SquareSet::rank(self.ranks.saturating_sub(1))
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_has_no_blockers() {
        assert_eq!(BoardGeometry::STANDARD.board_mask(), SquareSet::FULL);
        assert!(BoardGeometry::STANDARD.blockers().is_empty());
        assert!(BoardGeometry::default().is_standard());
    }

    #[test]
    fn small_board_mask() {
        let geometry = BoardGeometry {
            files: 4,
            ranks: 5,
            king_is_special: true,
        };
        assert_eq!(geometry.board_mask().count(), 20);
        assert_eq!(geometry.blockers().count(), 44);
        assert_eq!(geometry.promotion_rank(Color::White), 4);
        assert_eq!(geometry.double_push_rank(Color::Black), 3);
        assert_eq!(geometry.back_ranks(), SquareSet::rank(0) | SquareSet::rank(4));
    }

    #[test]
    fn single_rank_board_ranks_stay_on_board() {
        let geometry = BoardGeometry {
            files: 4,
            ranks: 1,
            king_is_special: true,
        };
        assert_eq!(geometry.double_push_rank(Color::Black), 0);
        assert_eq!(geometry.promotion_rank(Color::White), 0);
        assert_eq!(geometry.back_ranks(), SquareSet::rank(0));
    }
}
