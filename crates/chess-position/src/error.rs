use chess_types::{Color, FenError, Square};
use thiserror::Error;

/// Reasons a position is rejected or found inconsistent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    TooManyKings(Color),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("side not to move is in check")]
    OppositeCheck,

    #[error("{0} pieces give check")]
    TooManyCheckers(u32),

    #[error("piece on blocked square {0}")]
    PieceOnBlocker(Square),

    #[error("square {0} is claimed twice")]
    OverlappingPieces(Square),

    #[error("stored key does not match the position")]
    KeyMismatch,

    #[error("stored checkers do not match the position")]
    CheckersMismatch,
}
