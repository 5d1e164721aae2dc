//! Consistency checks.

use super::Position;
use crate::PositionError;
use chess_types::{Color, PieceType};

impl Position {
    /// Rejects setups that cannot occur in a game: wrong king count, pawns
    /// on a back rank, the side not to move in check.
    pub(crate) fn check_setup(&self) -> Result<(), PositionError> {
        if self.geometry.king_is_special {
            for color in Color::ALL {
                match self.pieces(PieceType::King, color).count() {
                    0 => return Err(PositionError::MissingKing(color)),
                    1 => {}
                    _ => return Err(PositionError::TooManyKings(color)),
                }
            }
        }

        let misplaced = self.by_kind(PieceType::Pawn) & self.geometry.back_ranks();
        if let Some(sq) = misplaced.first() {
            return Err(PositionError::PawnOnBackRank(sq));
        }

        if self.geometry.king_is_special {
            let them = !self.side_to_move;
            if let Some(king) = self.king_square(them) {
                if self.is_attacked(king, self.side_to_move) {
                    return Err(PositionError::OppositeCheck);
                }
            }
            if self.checkers.count() > 2 {
                return Err(PositionError::TooManyCheckers(self.checkers.count()));
            }
        }
        Ok(())
    }

    /// Checks every invariant of the position, including the derived key
    /// and checkers. Meant for tests and debug assertions.
    pub fn validate(&self) -> Result<(), PositionError> {
        if let Some(sq) = (self.colors[0] & self.colors[1]).first() {
            return Err(PositionError::OverlappingPieces(sq));
        }
        for (i, a) in self.pieces.iter().enumerate() {
            for b in &self.pieces[i + 1..] {
                if let Some(sq) = (*a & *b).first() {
                    return Err(PositionError::OverlappingPieces(sq));
                }
            }
        }
        let by_kind = self.pieces.iter().fold(crate::SquareSet::EMPTY, |acc, &s| acc | s);
        if let Some(sq) = (by_kind ^ (self.colors[0] | self.colors[1])).first() {
            return Err(PositionError::OverlappingPieces(sq));
        }
        if let Some(sq) = ((self.colors[0] | self.colors[1]) & self.blockers).first() {
            return Err(PositionError::PieceOnBlocker(sq));
        }
        if self.key != self.compute_key() {
            return Err(PositionError::KeyMismatch);
        }
        if self.checkers != self.compute_checkers() {
            return Err(PositionError::CheckersMismatch);
        }
        self.check_setup()
    }

    /// Returns true if [`Position::validate`] finds nothing wrong.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.validate().is_ok()
    }
}
