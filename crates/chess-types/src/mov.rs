//! Move representation.

use crate::{PieceType, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Castling; the side follows from the king's destination.
    Castle = 1,
    /// En passant capture.
    EnPassant = 2,
    /// Pawn promotion to knight.
    PromoteKnight = 3,
    /// Pawn promotion to bishop.
    PromoteBishop = 4,
    /// Pawn promotion to rook.
    PromoteRook = 5,
    /// Pawn promotion to queen.
    PromoteQueen = 6,
}

impl MoveFlag {
    /// Returns the promotion flag for a piece type, if it is a promotion target.
    #[inline]
    pub const fn promotion(piece: PieceType) -> Option<MoveFlag> {
        match piece {
            PieceType::Knight => Some(MoveFlag::PromoteKnight),
            PieceType::Bishop => Some(MoveFlag::PromoteBishop),
            PieceType::Rook => Some(MoveFlag::PromoteRook),
            PieceType::Queen => Some(MoveFlag::PromoteQueen),
            _ => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceType::Knight),
            MoveFlag::PromoteBishop => Some(PieceType::Bishop),
            MoveFlag::PromoteRook => Some(PieceType::Rook),
            MoveFlag::PromoteQueen => Some(PieceType::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    const fn from_bits(bits: u16) -> MoveFlag {
        match bits {
            1 => MoveFlag::Castle,
            2 => MoveFlag::EnPassant,
            3 => MoveFlag::PromoteKnight,
            4 => MoveFlag::PromoteBishop,
            5 => MoveFlag::PromoteRook,
            6 => MoveFlag::PromoteQueen,
            _ => MoveFlag::Normal,
        }
    }
}

/// A chess move.
///
/// Encoded compactly: 6 bits from, 6 bits to, 4 bits flags = 16 bits total.
/// A move carries no reference to the position it was generated in and is
/// only meaningful relative to that position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// The null move: passes the turn without moving a piece.
    pub const NULL: Move = Move(0);

    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12);
        Move(encoded)
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Creates a castling move given the king's origin and destination.
    #[inline]
    pub const fn castle(king_from: Square, king_to: Square) -> Self {
        Self::new(king_from, king_to, MoveFlag::Castle)
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::EnPassant)
    }

    /// Creates a promotion to `piece`, or a normal move if `piece` is not a
    /// promotion target.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: PieceType) -> Self {
        match MoveFlag::promotion(piece) {
            Some(flag) => Self::new(from, to, flag),
            None => Self::normal(from, to),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_low_bits(self.0)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_low_bits(self.0 >> 6)
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> 12)
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        self.flag().promotion_piece()
    }

    /// Returns true for castling moves.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag(), MoveFlag::Castle)
    }

    /// Returns true for king-side castling (the king moves toward the h-file).
    #[inline]
    pub const fn is_kingside_castle(self) -> bool {
        self.is_castle() && self.to().index() > self.from().index()
    }

    /// Returns true for queen-side castling (the king moves toward the a-file).
    #[inline]
    pub const fn is_queenside_castle(self) -> bool {
        self.is_castle() && self.to().index() < self.from().index()
    }

    /// Returns true for en passant captures.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    /// Returns true for the null move.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q", "0000").
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        match self.promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
