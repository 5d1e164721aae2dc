//! Immutable chess positions with legal move generation.
//!
//! This crate provides:
//! - [`SquareSet`] - 64-bit set of squares with set algebra
//! - [`Position`] - Immutable game state linked to the position it came from
//! - Legal move generation, with a dedicated generator for check evasions
//! - Terminal and draw detection, static exchange evaluation
//! - FEN, SAN and UCI notation
//! - [`perft`] for validating the move generator
//!
//! # Architecture
//!
//! Pieces are stored as bitboards, one per piece type and one per color.
//! Step attacks and ray masks come from tables computed at compile time;
//! sliding attacks stop at the first occupied square along each ray.
//!
//! Boards smaller than 8x8 fill the unused files and ranks with blockers:
//! permanently occupied squares that stop sliders and can't be entered.
//!
//! # Example
//!
//! ```
//! use chess_position::{move_to_san, Position};
//!
//! let position = Position::startpos();
//! println!("Legal moves from starting position: {}", position.legal_moves().len());
//!
//! let next = position.play_san("e4").unwrap().play_san("e5").unwrap();
//! println!("Position after 1.e4 e5: {}", next.to_fen());
//!
//! let m = next.legal_moves()[0];
//! println!("{} is written {}", m, move_to_san(&next, m));
//! ```

pub mod attacks;
mod castling;
mod description;
mod error;
mod geometry;
pub mod movegen;
mod position;
pub mod san;
mod see;
mod squareset;
pub mod uci;
mod zobrist;

pub use castling::{CastleSide, CastlingRights};
pub use description::MoveDescription;
pub use error::PositionError;
pub use geometry::{BoardGeometry, FenOptions};
pub use movegen::perft::{perft, perft_divide, perft_parallel};
pub use movegen::MoveList;
pub use position::{DrawReason, GameResult, Position};
pub use san::{move_from_san, move_to_san, move_to_san_with, moves_to_san, SanError, SanOptions};
pub use see::see_value;
pub use squareset::SquareSet;
pub use uci::{move_from_uci, uci_position_string, UciError};

pub use chess_types::{Color, Move, MoveFlag, Occupant, Piece, PieceType, Square};
