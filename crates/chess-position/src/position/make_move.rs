//! Applying moves.

use super::Position;
use crate::attacks::pawn_attacks;
use crate::CastleSide;
use chess_types::{Move, MoveFlag, PieceType, Square};
use std::sync::Arc;

impl Position {
    /// Returns the position after `m`.
    ///
    /// `m` must be a legal move of this position, such as one taken from
    /// [`Position::legal_moves`]. Other moves produce an unspecified (but
    /// memory-safe) position.
    pub fn do_move(&self, m: Move) -> Position {
        let mut next = self.successor(Some(m));
        let us = self.side_to_move;
        let them = !us;
        let from = m.from();
        let to = m.to();

        let Some(mover) = self.piece_at(from) else {
            next.refresh();
            return next;
        };
        let mut irreversible = mover.kind() == PieceType::Pawn;

        match m.flag() {
            MoveFlag::EnPassant => {
                if let Some(captured) = Square::from_coords(to.file_index() as i8, from.rank_index() as i8) {
                    next.take(captured);
                }
                next.relocate(from, to);
            }
            MoveFlag::Castle => {
                let side = if m.is_kingside_castle() {
                    CastleSide::King
                } else {
                    CastleSide::Queen
                };
                let rank = from.rank_index() as i8;
                next.relocate(from, to);
                if let (Some(rook_from), Some(rook_to)) = (
                    Square::from_coords(side.rook_from_file() as i8, rank),
                    Square::from_coords(side.rook_to_file() as i8, rank),
                ) {
                    next.relocate(rook_from, rook_to);
                }
            }
            flag => {
                if next.take(to).is_some() {
                    irreversible = true;
                }
                match flag.promotion_piece() {
                    Some(promoted) => {
                        next.take(from);
                        next.put(promoted.of(us), to);
                    }
                    None => next.relocate(from, to),
                }
            }
        }

        if irreversible {
            next.rule50 = 0;
        }

        if mover.kind() == PieceType::Pawn && from.rank_index().abs_diff(to.rank_index()) == 2 {
            if let Some(passed) = from.offset(0, us.pawn_direction()) {
                if (pawn_attacks(us, passed) & next.pieces(PieceType::Pawn, them)).any() {
                    next.en_passant = Some(passed);
                }
            }
        }

        next.castling.touch(from);
        next.castling.touch(to);
        next.refresh();
        next
    }

    /// Returns the position with the turn passed to the opponent, or `None`
    /// when the side to move is in check.
    pub fn do_null_move(&self) -> Option<Position> {
        if self.is_check() {
            return None;
        }
        let mut next = self.successor(Some(Move::NULL));
        next.refresh();
        Some(next)
    }

    /// Plays `m`, treating [`Move::NULL`] as a null move. Returns `None` only
    /// for a null move while in check.
    pub(crate) fn advance(&self, m: Move) -> Option<Position> {
        if m.is_null() {
            self.do_null_move()
        } else {
            Some(self.do_move(m))
        }
    }

    /// A copy of this position, one ply later, with the other side to move
    /// and this position as its parent.
    fn successor(&self, last_move: Option<Move>) -> Position {
        let mut next = self.clone();
        next.parent = Some(Arc::new(self.clone()));
        next.side_to_move = !self.side_to_move;
        next.en_passant = None;
        next.rule50 += 1;
        next.game_ply += 1;
        next.last_move = last_move;
        next
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
    fn quiet_move_updates_counters() {
        let root = Position::startpos();
        let next = root.do_move(Move::normal(sq("g1"), sq("f3")));
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.rule50(), 1);
        assert_eq!(next.game_ply(), 1);
        assert_eq!(next.last_move(), Some(Move::normal(sq("g1"), sq("f3"))));
        assert_eq!(next.piece_at(sq("f3")), Some(PieceType::Knight.of(Color::White)));
        assert_eq!(next.piece_at(sq("g1")), None);
        assert_eq!(next.parent(), Some(&root));
        assert!(next.is_ok());
    }

    #[test]
    fn double_push_sets_en_passant_only_when_capturable() {
        let root = Position::startpos();
        let e4 = root.do_move(Move::normal(sq("e2"), sq("e4")));
        assert_eq!(e4.en_passant(), None);
        assert_eq!(e4.rule50(), 0);

        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        let c4 = position.do_move(Move::normal(sq("c2"), sq("c4")));
        assert_eq!(c4.en_passant(), Some(sq("c3")));
        assert!(c4.is_ok());
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let next = position.do_move(Move::en_passant(sq("e5"), sq("d6")));
        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(next.piece_at(sq("d6")), Some(PieceType::Pawn.of(Color::White)));
        assert_eq!(next.by_color(Color::Black).count(), 15);
        assert!(next.is_ok());
    }

    #[test]
    fn castling_moves_rook_and_drops_rights() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = position.do_move(Move::castle(Square::E1, Square::G1));
        assert_eq!(short.piece_at(Square::G1), Some(PieceType::King.of(Color::White)));
        assert_eq!(short.piece_at(Square::F1), Some(PieceType::Rook.of(Color::White)));
        assert_eq!(short.piece_at(Square::H1), None);
        assert_eq!(short.castling_rights().to_fen_field(), "kq");

        let long = short.do_move(Move::castle(Square::E8, Square::C8));
        assert_eq!(long.piece_at(Square::C8), Some(PieceType::King.of(Color::Black)));
        assert_eq!(long.piece_at(Square::D8), Some(PieceType::Rook.of(Color::Black)));
        assert!(long.castling_rights().is_empty());
        assert!(long.is_ok());
    }

    #[test]
    fn rook_capture_revokes_right() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = position.do_move(Move::normal(Square::H1, Square::H8));
        assert_eq!(next.castling_rights().to_fen_field(), "Qq");
        assert_eq!(next.rule50(), 0);
    }

    #[test]
    fn promotion_replaces_pawn() {
        let position = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 3 40").unwrap();
        let next = position.do_move(Move::promotion(sq("a7"), sq("b8"), PieceType::Knight));
        assert_eq!(next.piece_at(sq("b8")), Some(PieceType::Knight.of(Color::White)));
        assert_eq!(next.by_kind(PieceType::Pawn).count(), 0);
        assert_eq!(next.rule50(), 0);
        assert!(next.is_ok());
    }

    #[test]
    fn move_gives_check() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let next = position.do_move(Move::normal(Square::A1, Square::A8));
        assert!(next.is_check());
        assert_eq!(next.checkers(), crate::SquareSet::from_square(Square::A8));
    }

    #[test]
    fn null_move_passes_turn() {
        let position = Position::startpos();
        let next = position.do_null_move().unwrap();
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.last_move(), Some(Move::NULL));
        assert_eq!(next.game_ply(), 1);
        assert_ne!(next.key(), position.key());
        assert!(next.is_ok());

        let checked = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(checked.do_null_move().is_none());
    }
}
