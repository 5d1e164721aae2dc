//! Reading and writing positions as FEN.

use super::Position;
use crate::attacks::pawn_attacks;
use crate::castling::{king_home, rook_home};
use crate::{BoardGeometry, CastleSide, CastlingRights, FenOptions, PositionError};
use chess_types::{Color, FenFields, PieceType, Square};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        let mut position = Position::empty(BoardGeometry::STANDARD);
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as i8;
            let squares = [
                (0, kind.of(Color::White)),
                (1, PieceType::Pawn.of(Color::White)),
                (6, PieceType::Pawn.of(Color::Black)),
                (7, kind.of(Color::Black)),
            ];
            for (rank, piece) in squares {
                if let Some(sq) = Square::from_coords(file, rank) {
                    position.put(piece, sq);
                }
            }
        }
        position.castling = CastlingRights::ALL;
        position.refresh();
        position
    }

    /// Parses a FEN string with special kings.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Self::from_fen_with(fen, FenOptions::default())
    }

    /// Parses a FEN string.
    ///
    /// The board size follows the piece placement field. Castling rights
    /// whose king or rook has left its home square are dropped, as is an en
    /// passant square no pawn can capture on.
    pub fn from_fen_with(fen: &str, options: FenOptions) -> Result<Self, PositionError> {
        let fields = FenFields::parse(fen).map_err(|err| {
            debug!(fen, %err, "rejected FEN");
            err
        })?;

        let geometry = BoardGeometry {
            files: fields.files,
            ranks: fields.ranks,
            king_is_special: options.king_is_special,
        };
        let mut position = Position::empty(geometry);
        for &(sq, piece) in &fields.pieces {
            position.put(piece, sq);
        }
        position.side_to_move = fields.active_color;
        position.rule50 = fields.halfmove_clock;
        position.game_ply = 2 * (fields.fullmove_number.max(1) - 1)
            + u32::from(fields.active_color == Color::Black);

        let requested = CastlingRights::from_fen_field(&fields.castling);
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if requested.has(color, side) && position.castle_setup_intact(color, side) {
                    position.castling.set(color, side);
                }
            }
        }
        if position.castling != requested {
            debug!(
                fen,
                kept = %position.castling.to_fen_field(),
                "dropped castling rights without king and rook at home"
            );
        }

        position.en_passant = fields
            .en_passant
            .filter(|&ep| position.en_passant_capturable(ep));
        if position.en_passant != fields.en_passant {
            debug!(fen, "dropped en passant square no pawn can capture on");
        }

        position.refresh();
        position.check_setup().map_err(|err| {
            debug!(fen, %err, "rejected position");
            err
        })?;
        Ok(position)
    }

    fn castle_setup_intact(&self, color: Color, side: CastleSide) -> bool {
        self.geometry.king_is_special
            && self.pieces(PieceType::King, color).contains(king_home(color))
            && self.pieces(PieceType::Rook, color).contains(rook_home(color, side))
    }

    /// Returns true if `ep` is a square the side to move may capture on en
    /// passant: just behind an enemy pawn that could have arrived with a
    /// double step, and attacked by one of our pawns.
    fn en_passant_capturable(&self, ep: Square) -> bool {
        let us = self.side_to_move;
        let them = !us;
        let target_rank = match us {
            Color::White => self.geometry.ranks.saturating_sub(3),
            Color::Black => 2,
        };
        if ep.rank_index() != target_rank {
            return false;
        }
        let (Some(pushed), Some(origin)) = (
            ep.offset(0, them.pawn_direction()),
            ep.offset(0, us.pawn_direction()),
        ) else {
            return false;
        };
        let occupied = self.occupied();
        self.pieces(PieceType::Pawn, them).contains(pushed)
            && !occupied.contains(ep)
            && !occupied.contains(origin)
            && (pawn_attacks(them, ep) & self.pieces(PieceType::Pawn, us)).any()
    }

    /// Writes the position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..self.geometry.ranks).rev() {
            let mut empty = 0;
            for file in 0..self.geometry.files {
                let piece = Square::from_coords(file as i8, rank as i8).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            placement,
            self.side_to_move.fen_char(),
            self.castling.to_fen_field(),
            ep,
            self.rule50,
            self.fullmove_number()
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
