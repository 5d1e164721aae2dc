//! UCI move strings and `position` commands.
//!
//! Moves are written as origin and destination square ("e2e4"), plus a
//! lowercase promotion letter ("e7e8q"). The null move is "0000".

use crate::{Position, PositionError};
use chess_types::Move;
use thiserror::Error;

/// Error type for reading a UCI `position` command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("invalid position command: {0}")]
    InvalidCommand(String),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error("illegal move in position command: {0}")]
    IllegalMove(String),
}

/// Finds the legal move whose UCI string is `uci`.
///
/// "0000" resolves to [`Move::NULL`] unless the side to move is in check.
pub fn move_from_uci(position: &Position, uci: &str) -> Option<Move> {
    let uci = uci.trim();
    if uci == "0000" {
        return (!position.is_check()).then_some(Move::NULL);
    }
    position
        .legal_moves()
        .iter()
        .copied()
        .find(|m| m.to_uci() == uci)
}

/// Renders `position` as a UCI `position` command.
///
/// The FEN anchor is the ancestor `min(game_ply, rule50)` plies back (or the
/// root of the chain, if nearer), so the moves that follow cover everything
/// an engine needs for repetition detection.
pub fn uci_position_string(position: &Position) -> String {
    let window = position.game_ply().min(position.rule50()) as usize;
    let mut moves = Vec::with_capacity(window);
    let mut anchor = position;
    while moves.len() < window {
        let (Some(parent), Some(m)) = (anchor.parent(), anchor.last_move()) else {
            break;
        };
        moves.push(m);
        anchor = parent;
    }

    let mut command = format!("position fen {}", anchor.to_fen());
    if !moves.is_empty() {
        command.push_str(" moves");
        for m in moves.iter().rev() {
            command.push(' ');
            command.push_str(&m.to_uci());
        }
    }
    command
}

impl Position {
    /// Plays the move written as `uci`, or returns `None` if no legal move
    /// has that spelling.
    pub fn play_uci(&self, uci: &str) -> Option<Position> {
        self.advance(move_from_uci(self, uci)?)
    }

    /// Shorthand for [`uci_position_string`].
    #[inline]
    pub fn to_uci_position(&self) -> String {
        uci_position_string(self)
    }

    /// Reads a `position startpos|fen <fen> [moves <move>...]` command and
    /// plays its moves, keeping them as the history of the result.
    pub fn from_uci_position(command: &str) -> Result<Position, UciError> {
        let mut parts = command.split_whitespace();
        if parts.next() != Some("position") {
            return Err(UciError::InvalidCommand(command.to_string()));
        }

        let rest: Vec<&str> = parts.collect();
        let moves_at = rest.iter().position(|&p| p == "moves").unwrap_or(rest.len());
        let (setup, moves) = rest.split_at(moves_at);

        let mut position = match setup {
            ["startpos"] => Position::startpos(),
            ["fen", fen @ ..] if !fen.is_empty() => Position::from_fen(&fen.join(" "))?,
            _ => return Err(UciError::InvalidCommand(command.to_string())),
        };

        for &uci in moves.iter().skip(1) {
            position = position
                .play_uci(uci)
                .ok_or_else(|| UciError::IllegalMove(uci.to_string()))?;
        }
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_types::{PieceType, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(position: &Position, moves: &[&str]) -> Position {
        moves
            .iter()
            .fold(position.clone(), |p, uci| p.play_uci(uci).unwrap())
    }

    #[test]
    fn parses_legal_moves_only() {
        let position = Position::startpos();
        assert_eq!(
            move_from_uci(&position, "e2e4"),
            Some(Move::normal(sq("e2"), sq("e4")))
        );
        assert_eq!(move_from_uci(&position, "e2e5"), None);
        assert_eq!(move_from_uci(&position, "e1g1"), None);
        assert_eq!(move_from_uci(&position, "garbage"), None);
        assert_eq!(move_from_uci(&position, ""), None);
    }

    #[test]
    fn parses_castles_and_promotions() {
        let castle = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(
            move_from_uci(&castle, "e1c1"),
            Some(Move::castle(Square::E1, Square::C1))
        );
        let promo = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            move_from_uci(&promo, "a7a8n"),
            Some(Move::promotion(sq("a7"), Square::A8, PieceType::Knight))
        );
        assert_eq!(move_from_uci(&promo, "a7a8"), None);
    }

    #[test]
    fn null_move_string() {
        let position = Position::startpos();
        assert_eq!(move_from_uci(&position, "0000"), Some(Move::NULL));
        let next = position.play_uci("0000").unwrap();
        assert_eq!(next.last_move(), Some(Move::NULL));
        let checked = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert_eq!(move_from_uci(&checked, "0000"), None);
    }

    #[test]
    fn position_string_at_root() {
        assert_eq!(
            Position::startpos().to_uci_position(),
            "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn position_string_anchors_at_last_irreversible_move() {
        let position = play(&Position::startpos(), &["e2e4", "e7e5", "g1f3", "b8c6"]);
        assert_eq!(
            uci_position_string(&position),
            "position fen rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2 moves g1f3 b8c6"
        );
    }

    #[test]
    fn position_string_walks_to_root() {
        let root = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 20 30").unwrap();
        let position = play(&root, &["a1a2", "e8d8"]);
        assert_eq!(
            uci_position_string(&position),
            "position fen 4k3/8/8/8/8/8/8/R3K3 w - - 20 30 moves a1a2 e8d8"
        );
    }

    #[test]
    fn position_command_roundtrip() {
        let position = play(&Position::startpos(), &["g1f3", "g8f6", "f3g1"]);
        let command = position.to_uci_position();
        let restored = Position::from_uci_position(&command).unwrap();
        assert_eq!(restored, position);
        assert_eq!(restored.to_uci_position(), command);
    }

    #[test]
    fn reads_startpos_commands() {
        let position = Position::from_uci_position("position startpos moves e2e4 c7c5").unwrap();
        assert_eq!(position.game_ply(), 2);
        assert_eq!(position.last_move(), Some(Move::normal(sq("c7"), sq("c5"))));
        assert_eq!(
            Position::from_uci_position("position startpos").unwrap(),
            Position::startpos()
        );
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(matches!(
            Position::from_uci_position("go depth 3"),
            Err(UciError::InvalidCommand(_))
        ));
        assert!(matches!(
            Position::from_uci_position("position fen"),
            Err(UciError::InvalidCommand(_))
        ));
        assert!(matches!(
            Position::from_uci_position("position fen 8/8/8 w - - 0 1"),
            Err(UciError::Position(_))
        ));
        assert_eq!(
            Position::from_uci_position("position startpos moves e2e5"),
            Err(UciError::IllegalMove("e2e5".to_string()))
        );
    }
}
