//! Static exchange evaluation.

use crate::{Position, SquareSet};
use chess_types::{Color, Move, PieceType, Square};

/// Material values used by [`Position::see`], in centipawns.
pub const fn see_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => 100,
        PieceType::Knight => 300,
        PieceType::Bishop => 300,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 20_000,
    }
}

const MAX_EXCHANGE: usize = 32;

impl Position {
    /// Estimates the material balance of playing `m` followed by the best
    /// sequence of captures on its destination square, from the point of
    /// view of the side to move.
    ///
    /// Each side always recaptures with its least valuable attacker and may
    /// stop capturing whenever that is better. Pins are ignored. Castling
    /// scores zero.
    pub fn see(&self, m: Move) -> i32 {
        if m.is_castle() || m.is_null() {
            return 0;
        }
        let from = m.from();
        let to = m.to();
        let Some(mover) = self.piece_at(from) else {
            return 0;
        };

        let mut occupied = self.occupied().without(from);
        let mut gain = [0i32; MAX_EXCHANGE];
        gain[0] = if m.is_en_passant() {
            if let Some(captured) =
                Square::from_coords(to.file_index() as i8, from.rank_index() as i8)
            {
                occupied.clear(captured);
            }
            see_value(PieceType::Pawn)
        } else {
            self.piece_at(to).map_or(0, |p| see_value(p.kind()))
        };

        let mut on_square = see_value(mover.kind());
        if let Some(promoted) = m.promotion_piece() {
            gain[0] += see_value(promoted) - see_value(PieceType::Pawn);
            on_square = see_value(promoted);
        }

        let mut side = !mover.color();
        let mut depth = 0;
        while depth + 1 < MAX_EXCHANGE {
            let Some((kind, sq)) = self.least_valuable_attacker(to, side, occupied) else {
                break;
            };
            if kind == PieceType::King
                && self.geometry.king_is_special
                && self.least_valuable_attacker(to, !side, occupied.without(sq)).is_some()
            {
                break;
            }
            depth += 1;
            gain[depth] = on_square - gain[depth - 1];
            on_square = see_value(kind);
            occupied.clear(sq);
            side = !side;
        }

        while depth > 0 {
            gain[depth - 1] = -(-gain[depth - 1]).max(gain[depth]);
            depth -= 1;
        }
        gain[0]
    }

    /// Returns true if the exchange started by `m` wins at least `threshold`.
    #[inline]
    pub fn see_ge(&self, m: Move, threshold: i32) -> bool {
        self.see(m) >= threshold
    }

    fn least_valuable_attacker(
        &self,
        sq: Square,
        side: Color,
        occupied: SquareSet,
    ) -> Option<(PieceType, Square)> {
        let attackers = self.attackers_to(sq, occupied) & occupied & self.by_color(side);
        PieceType::ALL.into_iter().find_map(|kind| {
            (attackers & self.by_kind(kind))
                .first()
                .map(|from| (kind, from))
        })
    }
}
