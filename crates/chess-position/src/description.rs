//! Flat move descriptions for user interfaces.

use crate::san::move_to_san;
use crate::{CastleSide, Position};
use chess_types::{Move, Piece, PieceType, Square};
use serde::Serialize;

/// Everything a board display needs to animate a move, without decoding
/// [`Move`] flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDescription {
    pub from: Square,
    pub to: Square,
    /// The piece that moves (the pawn, for a promotion).
    pub piece: Piece,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    /// Where the captured piece stood; differs from `to` for en passant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_square: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rook_from: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rook_to: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceType>,
    pub san: String,
    pub uci: String,
}

impl Position {
    /// Describes `m`, or returns `None` if it is not a legal move here.
    pub fn describe_move(&self, m: Move) -> Option<MoveDescription> {
        if m.is_null() || !self.is_legal(m) {
            return None;
        }
        let from = m.from();
        let to = m.to();
        let piece = self.piece_at(from)?;

        let capture_square = if m.is_en_passant() {
            Square::from_coords(to.file_index() as i8, from.rank_index() as i8)
        } else if m.is_castle() {
            None
        } else {
            self.piece_at(to).map(|_| to)
        };
        let captured = capture_square.and_then(|sq| self.piece_at(sq));

        let (rook_from, rook_to) = if m.is_castle() {
            let side = if m.is_kingside_castle() {
                CastleSide::King
            } else {
                CastleSide::Queen
            };
            let rank = from.rank_index() as i8;
            (
                Square::from_coords(side.rook_from_file() as i8, rank),
                Square::from_coords(side.rook_to_file() as i8, rank),
            )
        } else {
            (None, None)
        };

        Some(MoveDescription {
            from,
            to,
            piece,
            captured,
            capture_square,
            rook_from,
            rook_to,
            promotion: m.promotion_piece(),
            san: move_to_san(self, m),
            uci: m.to_uci(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_types::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn describes_quiet_move() {
        let position = Position::startpos();
        let description = position
            .describe_move(Move::normal(Square::G1, sq("f3")))
            .unwrap();
        assert_eq!(description.piece, PieceType::Knight.of(Color::White));
        assert_eq!(description.captured, None);
        assert_eq!(description.san, "Nf3");
        assert_eq!(description.uci, "g1f3");
    }

    #[test]
    fn describes_en_passant_capture_square() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let description = position
            .describe_move(Move::en_passant(sq("e5"), sq("d6")))
            .unwrap();
        assert_eq!(description.capture_square, Some(sq("d5")));
        assert_eq!(description.captured, Some(PieceType::Pawn.of(Color::Black)));
    }

    #[test]
    fn describes_castling_rook() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let description = position
            .describe_move(Move::castle(Square::E8, Square::C8))
            .unwrap();
        assert_eq!(description.rook_from, Some(Square::A8));
        assert_eq!(description.rook_to, Some(Square::D8));
        assert_eq!(description.san, "O-O-O");
    }

    #[test]
    fn rejects_illegal_moves() {
        let position = Position::startpos();
        assert!(position.describe_move(Move::normal(sq("e2"), sq("e5"))).is_none());
        assert!(position.describe_move(Move::NULL).is_none());
    }

    #[test]
    fn serializes_as_flat_map() {
        let position = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let description = position
            .describe_move(Move::promotion(sq("a7"), Square::B8, PieceType::Queen))
            .unwrap();
        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": "a7",
                "to": "b8",
                "piece": "P",
                "captured": "n",
                "capture_square": "b8",
                "promotion": "queen",
                "san": "axb8=Q+",
                "uci": "a7b8q",
            })
        );
    }
}
