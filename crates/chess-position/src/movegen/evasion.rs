//! Legal moves while in check.

use super::MoveList;
use crate::attacks::{between, king_attacks};
use crate::Position;
use chess_types::{Move, PieceType};

impl Position {
    /// Generates the legal replies to a check.
    ///
    /// The king may step to any square no enemy attacks once the king itself
    /// no longer blocks sliders. Against a single checker, unpinned pieces
    /// may also capture it or interpose on the squares between it and the
    /// king. En passant is tried by playing out the capture.
    pub(crate) fn generate_evasions(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them = !us;
        let Some(king) = self.king_square(us) else {
            return;
        };

        let own = self.by_color(us);
        let without_king = self.occupied().without(king);
        for to in king_attacks(king) & !(own | self.blockers) {
            if !self.attacked_with(to, them, without_king) {
                moves.push(Move::normal(king, to));
            }
        }

        let Some(checker) = self.checkers.single() else {
            return;
        };
        let target = between(king, checker).with(checker);
        let movers = own - self.pinned(us) - self.pieces(PieceType::King, us);
        self.generate_piece_moves(moves, movers, target);

        for m in self.en_passant_candidates() {
            if self.en_passant_is_safe(m) {
                moves.push(m);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_types::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn sorted_uci(position: &Position) -> Vec<String> {
        let mut moves: Vec<String> = position.legal_moves().iter().map(|m| m.to_uci()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn king_cannot_retreat_along_check_ray() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(position.is_check());
        assert_eq!(sorted_uci(&position), vec!["e1d2", "e1e2", "e1f2"]);
    }

    #[test]
    fn block_or_capture_single_checker() {
        let position = Position::from_fen("4k3/8/8/8/8/8/1R6/r3K3 w - - 0 1").unwrap();
        let moves = sorted_uci(&position);
        assert!(moves.contains(&"b2b1".to_string()));
        assert!(!moves.contains(&"b2a2".to_string()));
        let capture = Position::from_fen("4k3/8/8/8/8/8/R7/r3K3 w - - 0 1").unwrap();
        assert!(sorted_uci(&capture).contains(&"a2a1".to_string()));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let position = Position::from_fen("4k3/8/8/8/8/5n2/8/r3K2R w K - 0 1").unwrap();
        assert_eq!(position.checkers().count(), 2);
        let moves = position.legal_moves();
        assert!(moves.iter().all(|m| m.from() == Square::E1));
        assert!(!moves.is_empty());
    }

    #[test]
    fn pinned_piece_cannot_block() {
        let position = Position::from_fen("4k3/8/8/b7/8/2N5/8/r3K3 w - - 0 1").unwrap();
        assert!(position.is_check());
        let moves = position.legal_moves();
        assert!(!moves.contains(Move::normal(sq("c3"), sq("b1"))));
        assert!(!moves.contains(Move::normal(sq("c3"), sq("d1"))));
        assert!(moves.iter().all(|m| m.from() == Square::E1));
    }

    #[test]
    fn en_passant_captures_checking_pawn() {
        let position = Position::from_fen("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
        assert!(position.is_check());
        assert!(position
            .legal_moves()
            .contains(Move::en_passant(sq("e4"), sq("d3"))));
    }

    #[test]
    fn evasions_only_produce_legal_moves() {
        let position =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(position.is_mate());
        let position = Position::from_fen("4k3/8/8/8/1b6/8/8/R3KN2 w - - 0 1").unwrap();
        assert!(position.is_check());
        let moves = position.legal_moves();
        for &m in &moves {
            let next = position.do_move(m);
            let king = next.king_square(!next.side_to_move()).unwrap();
            assert!(!next.is_attacked(king, next.side_to_move()), "{}", m);
        }
        assert!(moves.contains(Move::normal(sq("f1"), sq("d2"))));
        assert!(!moves.contains(Move::normal(sq("a1"), sq("a4"))));
    }
}
