//! Chess position representation.
//!
//! A [`Position`] never changes once built. Applying a move returns a new
//! position that keeps a shared reference to the one it came from, so a
//! game's history is the chain of parents behind its current position.

mod fen;
mod make_move;
mod status;
mod validate;

pub use status::{DrawReason, GameResult};

use crate::attacks::{
    bishop_attacks, between, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use crate::zobrist::ZOBRIST;
use crate::{BoardGeometry, CastleSide, CastlingRights, SquareSet};
use chess_types::{Color, Move, Occupant, Piece, PieceType, Square};
use std::fmt;
use std::sync::Arc;

/// Complete, immutable chess position state.
#[derive(Clone)]
pub struct Position {
    /// Squares holding each piece type, indexed by [`PieceType::index`].
    pub(crate) pieces: [SquareSet; 6],
    /// Squares holding each color's pieces.
    pub(crate) colors: [SquareSet; 2],
    /// Squares outside the board.
    pub(crate) blockers: SquareSet,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    /// Half-moves since the last capture or pawn move.
    pub(crate) rule50: u32,
    /// Half-moves since the start of the game.
    pub(crate) game_ply: u32,
    pub(crate) last_move: Option<Move>,
    /// Enemy pieces attacking the king of the side to move.
    pub(crate) checkers: SquareSet,
    pub(crate) key: u64,
    pub(crate) geometry: BoardGeometry,
    pub(crate) parent: Option<Arc<Position>>,
}

impl Position {
    /// An empty board of the given geometry, white to move.
    pub(crate) fn empty(geometry: BoardGeometry) -> Self {
        Position {
            pieces: [SquareSet::EMPTY; 6],
            colors: [SquareSet::EMPTY; 2],
            blockers: geometry.blockers(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            rule50: 0,
            game_ply: 0,
            last_move: None,
            checkers: SquareSet::EMPTY,
            key: 0,
            geometry,
            parent: None,
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns true if `color` still holds the castling right on `side`.
    ///
    /// This is the right alone; whether castling is playable now also depends
    /// on the squares between king and rook.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling.has(color, side)
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn rule50(&self) -> u32 {
        self.rule50
    }

    #[inline]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// Fullmove number (starts at 1, increments after black's move).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.game_ply / 2 + 1
    }

    /// The move that produced this position from its parent.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn checkers(&self) -> SquareSet {
        self.checkers
    }

    /// Zobrist key of the position.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[inline]
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// The position this one was reached from.
    #[inline]
    pub fn parent(&self) -> Option<&Position> {
        self.parent.as_deref()
    }

    /// Iterates over the ancestors of this position, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Position> {
        std::iter::successors(self.parent(), |p| p.parent())
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.checkers.any()
    }

    /// Squares holding pieces of the given type and color.
    #[inline]
    pub fn pieces(&self, kind: PieceType, color: Color) -> SquareSet {
        self.pieces[kind.index()] & self.colors[color.index()]
    }

    #[inline]
    pub fn by_kind(&self, kind: PieceType) -> SquareSet {
        self.pieces[kind.index()]
    }

    #[inline]
    pub fn by_color(&self, color: Color) -> SquareSet {
        self.colors[color.index()]
    }

    /// Squares holding a piece or a blocker.
    #[inline]
    pub fn occupied(&self) -> SquareSet {
        self.colors[0] | self.colors[1] | self.blockers
    }

    #[inline]
    pub fn blockers(&self) -> SquareSet {
        self.blockers
    }

    /// Returns the piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = if self.colors[0].contains(sq) {
            Color::White
        } else if self.colors[1].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        PieceType::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
            .map(|kind| kind.of(color))
    }

    /// Returns what stands on `sq`: a piece, a blocker, or nothing.
    pub fn occupant(&self, sq: Square) -> Option<Occupant> {
        if self.blockers.contains(sq) {
            Some(Occupant::Blocker)
        } else {
            self.piece_at(sq).map(Occupant::Piece)
        }
    }

    /// Square of the king of `color`. Without special kings there may be none.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(PieceType::King, color).first()
    }

    /// All pieces of either color attacking `sq`, with `occupied` as the
    /// occupancy sliders see.
    pub fn attackers_to(&self, sq: Square, occupied: SquareSet) -> SquareSet {
        let rooks = self.pieces[PieceType::Rook.index()] | self.pieces[PieceType::Queen.index()];
        let bishops =
            self.pieces[PieceType::Bishop.index()] | self.pieces[PieceType::Queen.index()];
        (knight_attacks(sq) & self.pieces[PieceType::Knight.index()])
            | (king_attacks(sq) & self.pieces[PieceType::King.index()])
            | (pawn_attacks(Color::White, sq) & self.pieces(PieceType::Pawn, Color::Black))
            | (pawn_attacks(Color::Black, sq) & self.pieces(PieceType::Pawn, Color::White))
            | (rook_attacks(sq, occupied) & rooks)
            | (bishop_attacks(sq, occupied) & bishops)
    }

    /// Returns true if any piece of `by` attacks `sq` given `occupied`.
    #[inline]
    pub(crate) fn attacked_with(&self, sq: Square, by: Color, occupied: SquareSet) -> bool {
        (self.attackers_to(sq, occupied) & self.by_color(by)).any()
    }

    /// Returns true if any piece of `by` attacks `sq` on the current board.
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_with(sq, by, self.occupied())
    }

    /// Pieces of `color` that may not leave the line between their king and
    /// an enemy slider.
    pub fn pinned(&self, color: Color) -> SquareSet {
        let Some(king) = self.king_square(color) else {
            return SquareSet::EMPTY;
        };
        let them = self.by_color(!color);
        let rooks = self.pieces[PieceType::Rook.index()] | self.pieces[PieceType::Queen.index()];
        let bishops =
            self.pieces[PieceType::Bishop.index()] | self.pieces[PieceType::Queen.index()];
        let snipers = ((rook_attacks(king, SquareSet::EMPTY) & rooks)
            | (bishop_attacks(king, SquareSet::EMPTY) & bishops))
            & them;

        let occupied = self.occupied();
        let mut pinned = SquareSet::EMPTY;
        for sniper in snipers {
            let blockers = between(king, sniper) & occupied;
            if !blockers.more_than_one() {
                pinned |= blockers & self.by_color(color);
            }
        }
        pinned
    }

    pub(crate) fn compute_checkers(&self) -> SquareSet {
        if !self.geometry.king_is_special {
            return SquareSet::EMPTY;
        }
        match self.king_square(self.side_to_move) {
            Some(king) => {
                self.attackers_to(king, self.occupied()) & self.by_color(!self.side_to_move)
            }
            None => SquareSet::EMPTY,
        }
    }

    pub(crate) fn compute_key(&self) -> u64 {
        let mut key = 0u64;
        for color in Color::ALL {
            for kind in PieceType::ALL {
                for sq in self.pieces(kind, color) {
                    key ^= ZOBRIST.piece_key(kind.of(color), sq);
                }
            }
        }
        for right in self.castling.indices() {
            key ^= ZOBRIST.castling_key(right);
        }
        if let Some(ep) = self.en_passant {
            key ^= ZOBRIST.en_passant_key(ep);
        }
        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.black_to_move;
        }
        key
    }

    /// Recomputes the derived fields after the visible state changed.
    pub(crate) fn refresh(&mut self) {
        self.checkers = self.compute_checkers();
        self.key = self.compute_key();
    }

    pub(crate) fn put(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.kind().index()].set(sq);
        self.colors[piece.color().index()].set(sq);
    }

    /// Removes whatever piece stands on `sq`, returning it.
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq)?;
        self.pieces[piece.kind().index()].clear(sq);
        self.colors[piece.color().index()].clear(sq);
        Some(piece)
    }

    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.take(from) {
            self.put(piece, to);
        }
    }
}

impl PartialEq for Position {
    /// Compares the visible state only, never the history behind it.
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.colors == other.colors
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.rule50 == other.rule50
            && self.game_ply == other.game_ply
            && self.geometry == other.geometry
    }
}

impl Eq for Position {}

impl Drop for Position {
    fn drop(&mut self) {
        // Unlink the chain one node at a time so long games don't recurse.
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut position) => next = position.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("key", &format_args!("{:#018x}", self.key))
            .field("last_move", &self.last_move)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_queries() {
        let position = Position::startpos();
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.piece_at(Square::E1), Some(PieceType::King.of(Color::White)));
        assert_eq!(position.piece_at(Square::D8), Some(PieceType::Queen.of(Color::Black)));
        assert_eq!(position.piece_at(sq("e4")), None);
        assert_eq!(position.king_square(Color::Black), Some(Square::E8));
        assert_eq!(position.by_color(Color::White).count(), 16);
        assert_eq!(position.occupied().count(), 32);
        assert!(!position.is_check());
        assert!(position.can_castle(Color::Black, CastleSide::Queen));
        assert_eq!(position.fullmove_number(), 1);
        assert!(position.parent().is_none());
    }

    #[test]
    fn attackers_see_through_occupancy() {
        let position = Position::from_fen("4k3/8/8/8/r3R3/8/8/4K3 w - - 0 1").unwrap();
        let attackers = position.attackers_to(sq("c4"), position.occupied());
        assert!(attackers.contains(sq("a4")));
        assert!(attackers.contains(sq("e4")));
        assert!(position.is_attacked(sq("e2"), Color::White));
        assert!(!position.is_attacked(sq("b1"), Color::Black));
    }

    #[test]
    fn pinned_piece_detection() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(position.pinned(Color::White), SquareSet::from_square(sq("e2")));
        let free = Position::from_fen("4k3/4r3/8/4p3/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(free.pinned(Color::White).is_empty());
    }

    #[test]
    fn occupant_reports_blockers() {
        let position = Position::from_fen("k3/4/4/K3 w - - 0 1").unwrap();
        assert_eq!(position.occupant(sq("e1")), Some(Occupant::Blocker));
        assert_eq!(position.occupant(sq("a5")), Some(Occupant::Blocker));
        assert_eq!(
            position.occupant(Square::A1),
            Some(Occupant::Piece(PieceType::King.of(Color::White)))
        );
        assert_eq!(position.occupant(sq("b2")), None);
    }

    #[test]
    fn equality_ignores_history() {
        let root = Position::startpos();
        let a = root.do_move(Move::normal(sq("g1"), sq("f3")));
        let b = Position::from_fen(&a.to_fen()).unwrap();
        assert_eq!(a, b);
        assert!(a.parent().is_some());
        assert!(b.parent().is_none());
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let mut position = Position::startpos();
        let shuffle = [
            Move::normal(sq("g1"), sq("f3")),
            Move::normal(sq("g8"), sq("f6")),
            Move::normal(sq("f3"), sq("g1")),
            Move::normal(sq("f6"), sq("g8")),
        ];
        for i in 0..200_000 {
            position = position.do_move(shuffle[i % 4]);
        }
        assert_eq!(position.game_ply(), 200_000);
        drop(position);
    }
}
