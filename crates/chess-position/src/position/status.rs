//! Game-end conditions.

use super::Position;
use chess_types::{Color, PieceType};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins (checkmate).
    WhiteWins,
    /// Black wins (checkmate).
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Neither side has material to checkmate.
    InsufficientMaterial,
    /// 100 half-moves without pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl Position {
    /// In check with no legal move.
    pub fn is_mate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    /// Not in check, but no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// No pawns, rooks or queens, and at most one minor piece on the board.
    pub fn is_material_draw(&self) -> bool {
        let heavy = self.by_kind(PieceType::Pawn)
            | self.by_kind(PieceType::Rook)
            | self.by_kind(PieceType::Queen);
        let minors = self.by_kind(PieceType::Knight) | self.by_kind(PieceType::Bishop);
        heavy.is_empty() && minors.count() <= 1
    }

    #[inline]
    pub fn is_rule50_draw(&self) -> bool {
        self.rule50 >= 100
    }

    /// The current position occurred at least twice before, looking back no
    /// further than the last irreversible move.
    pub fn is_repetition_draw(&self) -> bool {
        let window = self.game_ply.min(self.rule50) as usize;
        let occurrences = self
            .ancestors()
            .take(window)
            .skip(1)
            .step_by(2)
            .filter(|p| p.key == self.key)
            .count();
        occurrences >= 2
    }

    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.is_material_draw()
            || self.is_rule50_draw()
            || self.is_repetition_draw()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_mate() || self.is_draw()
    }

    /// Returns the game result if the game is over, otherwise `None`.
    pub fn game_result(&self) -> Option<GameResult> {
        if self.legal_moves().is_empty() {
            if self.is_check() {
                return Some(match self.side_to_move {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                });
            }
            return Some(GameResult::Draw(DrawReason::Stalemate));
        }
        if self.is_material_draw() {
            Some(GameResult::Draw(DrawReason::InsufficientMaterial))
        } else if self.is_rule50_draw() {
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        } else if self.is_repetition_draw() {
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        } else {
            None
        }
    }
}
