//! Move generation.
//!
//! Outside of check, moves are generated per piece type without regard to
//! the own king and then filtered by a cheap legality test. In check, the
//! evasion generator produces legal moves directly.

mod evasion;
pub mod perft;

use crate::attacks::{
    aligned, between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks,
};
use crate::castling::{king_home, rook_home};
use crate::{CastleSide, Position, SquareSet};
use chess_types::{Move, PieceType, Square};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size array
/// avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves held.
    pub const MAX_MOVES: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        if self.len < Self::MAX_MOVES {
            self.moves[self.len] = m;
            self.len += 1;
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            let m = self.moves[read];
            if f(m) {
                self.moves[write] = m;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Position {
    /// All legal moves of the side to move.
    ///
    /// Promotions come in the order queen, rook, bishop, knight.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        if !self.geometry.king_is_special {
            self.generate_moves(&mut moves);
        } else if self.is_check() {
            self.generate_evasions(&mut moves);
        } else {
            self.generate_moves(&mut moves);
            let pinned = self.pinned(self.side_to_move);
            moves.retain(|m| self.legal_with_pins(m, pinned));
        }
        moves
    }

    /// Moves that follow piece movement rules but may leave the own king
    /// attacked. Castling moves are included only when fully legal.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves(&mut moves);
        moves
    }

    /// Legality test for a move of [`Position::pseudo_legal_moves`] while the
    /// side to move is not in check.
    pub fn move_is_legal(&self, m: Move) -> bool {
        if !self.geometry.king_is_special {
            return true;
        }
        self.legal_with_pins(m, self.pinned(self.side_to_move))
    }

    /// Returns true if `m` is one of the legal moves.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains(m)
    }

    fn generate_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let targets = !(self.by_color(us) | self.blockers);
        self.generate_piece_moves(moves, self.by_color(us), targets);
        self.generate_en_passant(moves);
        if self.geometry.king_is_special {
            self.generate_castles(moves);
        }
    }

    /// Moves of the pieces in `from_mask` that land on `targets`, en passant
    /// and castling aside.
    pub(crate) fn generate_piece_moves(
        &self,
        moves: &mut MoveList,
        from_mask: SquareSet,
        targets: SquareSet,
    ) {
        let us = self.side_to_move;
        let occupied = self.occupied();

        self.generate_pawn_moves(moves, self.pieces(PieceType::Pawn, us) & from_mask, targets);

        for from in self.pieces(PieceType::Knight, us) & from_mask {
            push_all(moves, from, knight_attacks(from) & targets);
        }
        for from in self.pieces(PieceType::Bishop, us) & from_mask {
            push_all(moves, from, bishop_attacks(from, occupied) & targets);
        }
        for from in self.pieces(PieceType::Rook, us) & from_mask {
            push_all(moves, from, rook_attacks(from, occupied) & targets);
        }
        for from in self.pieces(PieceType::Queen, us) & from_mask {
            push_all(moves, from, queen_attacks(from, occupied) & targets);
        }
        for from in self.pieces(PieceType::King, us) & from_mask {
            push_all(moves, from, king_attacks(from) & targets);
        }
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList, pawns: SquareSet, targets: SquareSet) {
        let us = self.side_to_move;
        let dir = us.pawn_direction();
        let empty = !self.occupied();
        let enemies = self.by_color(!us);
        let promotion_rank = SquareSet::rank(self.geometry.promotion_rank(us));
        let double_rank = SquareSet::rank(self.geometry.double_push_rank(us));

        let single = pawns.forward(us) & empty;
        let double = ((pawns & double_rank).forward(us) & empty).forward(us) & empty;

        for to in single & targets {
            if let Some(from) = to.offset(0, -dir) {
                push_pawn(moves, from, to, promotion_rank);
            }
        }
        // On four ranks a double step would reach the promotion rank.
        for to in (double & targets) - promotion_rank {
            if let Some(from) = to.offset(0, -2 * dir) {
                moves.push(Move::normal(from, to));
            }
        }
        for from in pawns {
            for to in pawn_attacks(us, from) & enemies & targets {
                push_pawn(moves, from, to, promotion_rank);
            }
        }
    }

    /// En passant captures, checked only for piece movement.
    pub(crate) fn en_passant_candidates(&self) -> impl Iterator<Item = Move> + '_ {
        let us = self.side_to_move;
        self.en_passant.into_iter().flat_map(move |ep| {
            (pawn_attacks(!us, ep) & self.pieces(PieceType::Pawn, us))
                .into_iter()
                .map(move |from| Move::en_passant(from, ep))
        })
    }

    fn generate_en_passant(&self, moves: &mut MoveList) {
        for m in self.en_passant_candidates() {
            moves.push(m);
        }
    }

    fn generate_castles(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let king = king_home(us);
        if self.is_check() || !self.pieces(PieceType::King, us).contains(king) {
            return;
        }
        let occupied = self.occupied();
        for side in CastleSide::ALL {
            let rook = rook_home(us, side);
            if !self.castling.has(us, side)
                || !self.pieces(PieceType::Rook, us).contains(rook)
                || (between(king, rook) & occupied).any()
            {
                continue;
            }
            let Some(king_to) = Square::from_coords(side.king_to_file() as i8, king.rank_index() as i8)
            else {
                continue;
            };
            let path = between(king, king_to).with(king_to);
            if path.into_iter().all(|sq| !self.is_attacked(sq, !us)) {
                moves.push(Move::castle(king, king_to));
            }
        }
    }

    /// Legality of a pseudo-legal move outside of check, given the pinned
    /// pieces of the side to move.
    fn legal_with_pins(&self, m: Move, pinned: SquareSet) -> bool {
        let us = self.side_to_move;
        let Some(king) = self.king_square(us) else {
            return true;
        };
        let from = m.from();
        if m.is_castle() {
            true
        } else if m.is_en_passant() {
            self.en_passant_is_safe(m)
        } else if from == king {
            !self.attacked_with(m.to(), !us, self.occupied().without(king))
        } else {
            !pinned.contains(from) || aligned(from, m.to(), king)
        }
    }

    /// Plays out the occupancy change of an en passant capture and checks
    /// that no enemy piece then attacks the king.
    pub(crate) fn en_passant_is_safe(&self, m: Move) -> bool {
        let us = self.side_to_move;
        let Some(king) = self.king_square(us) else {
            return true;
        };
        let from = m.from();
        let to = m.to();
        let Some(captured) = Square::from_coords(to.file_index() as i8, from.rank_index() as i8)
        else {
            return false;
        };
        let occupied = self.occupied().without(from).without(captured).with(to);
        let attackers = self.attackers_to(king, occupied) & self.by_color(!us);
        attackers.without(captured).is_empty()
    }
}

#[inline]
fn push_all(moves: &mut MoveList, from: Square, targets: SquareSet) {
    for to in targets {
        moves.push(Move::normal(from, to));
    }
}

#[inline]
fn push_pawn(moves: &mut MoveList, from: Square, to: Square, promotion_rank: SquareSet) {
    if promotion_rank.contains(to) {
        for piece in PieceType::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}
