//! Value types for chess positions.
//!
//! This crate provides the small, immutable types shared by the position
//! engine and its consumers:
//! - [`Color`], [`PieceType`], [`Piece`] and [`Occupant`] for board contents
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for compact move representation
//! - [`FenFields`] for tokenizing FEN strings

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields};
pub use mov::{Move, MoveFlag};
pub use piece::{Occupant, Piece, PieceType};
pub use square::{File, ParseSquareError, Rank, Square};
