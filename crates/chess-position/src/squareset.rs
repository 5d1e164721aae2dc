//! Sets of squares backed by a 64-bit mask.
//!
//! Bit `i` is set exactly when the square with index `i` is a member
//! (a1 = bit 0, h8 = bit 63).

use chess_types::{Color, Square};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub};

/// A set of board squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(pub u64);

impl SquareSet {
    /// No squares.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// All 64 squares.
    pub const FULL: SquareSet = SquareSet(!0);

    pub const FILE_A: SquareSet = SquareSet(0x0101_0101_0101_0101);
    pub const FILE_H: SquareSet = SquareSet(0x8080_8080_8080_8080);
    pub const RANK_1: SquareSet = SquareSet(0x0000_0000_0000_00FF);
    pub const RANK_8: SquareSet = SquareSet(0xFF00_0000_0000_0000);

    /// Creates a set from a raw mask.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        SquareSet(bits)
    }

    /// Creates a set holding one square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// All squares on the given file index (0-7).
    #[inline]
    pub const fn file(file: u8) -> Self {
        SquareSet(Self::FILE_A.0 << file)
    }

    /// All squares on the given rank index (0-7).
    #[inline]
    pub const fn rank(rank: u8) -> Self {
        SquareSet(Self::RANK_1.0 << (8 * rank))
    }

    /// Returns the raw mask.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    /// Returns true if the set has at least two members.
    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Number of members.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Returns a copy with `sq` added.
    #[inline]
    pub const fn with(self, sq: Square) -> Self {
        SquareSet(self.0 | (1u64 << sq.index()))
    }

    /// Returns a copy with `sq` removed.
    #[inline]
    pub const fn without(self, sq: Square) -> Self {
        SquareSet(self.0 & !(1u64 << sq.index()))
    }

    /// Returns a copy with `sq` flipped.
    #[inline]
    pub const fn toggled(self, sq: Square) -> Self {
        SquareSet(self.0 ^ (1u64 << sq.index()))
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    #[inline]
    pub const fn union(self, other: SquareSet) -> Self {
        SquareSet(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: SquareSet) -> Self {
        SquareSet(self.0 & other.0)
    }

    /// Members of `self` that are not in `other`.
    #[inline]
    pub const fn difference(self, other: SquareSet) -> Self {
        SquareSet(self.0 & !other.0)
    }

    /// Complement restricted to `board`, for boards smaller than 8x8.
    #[inline]
    pub const fn complement_within(self, board: SquareSet) -> Self {
        SquareSet(!self.0 & board.0)
    }

    #[inline]
    pub const fn is_subset(self, other: SquareSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn is_superset(self, other: SquareSet) -> bool {
        other.is_subset(self)
    }

    /// Returns the lowest member.
    #[inline]
    pub const fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Returns the highest member.
    #[inline]
    pub const fn last(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(63 - self.0.leading_zeros() as u8)
        }
    }

    /// Removes and returns the lowest member.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        let sq = self.first()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Returns the only member, if there is exactly one.
    #[inline]
    pub const fn single(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }

    /// Shifts every member one rank toward rank 8.
    #[inline]
    pub const fn north(self) -> SquareSet {
        SquareSet(self.0 << 8)
    }

    /// Shifts every member one rank toward rank 1.
    #[inline]
    pub const fn south(self) -> SquareSet {
        SquareSet(self.0 >> 8)
    }

    /// Shifts every member one rank forward from `color`'s point of view.
    #[inline]
    pub const fn forward(self, color: Color) -> SquareSet {
        match color {
            Color::White => self.north(),
            Color::Black => self.south(),
        }
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for SquareSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for SquareSet {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for SquareSet {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Sub for SquareSet {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl Not for SquareSet {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        SquareSet(!self.0)
    }
}

impl From<Square> for SquareSet {
    #[inline]
    fn from(sq: Square) -> Self {
        SquareSet::from_square(sq)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(SquareSet::EMPTY, |set, sq| set.with(sq))
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SquareSet({:#018x})", self.0)?;
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let mark = if (self.0 >> (rank * 8 + file)) & 1 == 1 { 'X' } else { '.' };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over the members of a [`SquareSet`], lowest first.
pub struct SquareSetIter(SquareSet);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn single_square() {
        let set = SquareSet::from_square(Square::A1);
        assert_eq!(set.bits(), 1);
        assert!(set.contains(Square::A1));
        assert!(!set.contains(Square::B1));
        assert_eq!(set.single(), Some(Square::A1));
    }

    #[test]
    fn counts() {
        assert_eq!(SquareSet::EMPTY.count(), 0);
        assert_eq!(SquareSet::FULL.count(), 64);
        assert_eq!(SquareSet::file(3).count(), 8);
        assert_eq!(SquareSet::rank(7), SquareSet::RANK_8);
        assert!(!SquareSet::from_square(Square::H8).more_than_one());
        assert!(SquareSet::RANK_1.more_than_one());
    }

    #[test]
    fn set_algebra() {
        let a: SquareSet = [sq("a1"), sq("b2"), sq("c3")].into_iter().collect();
        let b: SquareSet = [sq("b2"), sq("d4")].into_iter().collect();
        assert_eq!(a.union(b).count(), 4);
        assert_eq!(a.intersection(b).single(), Some(sq("b2")));
        assert_eq!(a.difference(b), a - b);
        assert_eq!((a - b).count(), 2);
        assert!(SquareSet::from_square(sq("c3")).is_subset(a));
        assert!(a.is_superset(SquareSet::from_square(sq("a1"))));
        assert!(!a.is_subset(b));
    }

    #[test]
    fn complement_within_board() {
        let board = SquareSet::file(0) | SquareSet::file(1);
        let a_file = SquareSet::file(0);
        assert_eq!(a_file.complement_within(board), SquareSet::file(1));
        assert_eq!(!SquareSet::EMPTY, SquareSet::FULL);
    }

    #[test]
    fn first_and_last() {
        let set: SquareSet = [sq("c2"), sq("f7")].into_iter().collect();
        assert_eq!(set.first(), Some(sq("c2")));
        assert_eq!(set.last(), Some(sq("f7")));
        assert_eq!(SquareSet::EMPTY.first(), None);
        assert_eq!(SquareSet::EMPTY.last(), None);
    }

    #[test]
    fn pop_first_removes() {
        let mut set = SquareSet::new(0b1010);
        assert_eq!(set.pop_first().map(|s| s.index()), Some(1));
        assert_eq!(set.pop_first().map(|s| s.index()), Some(3));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn iteration_order() {
        let squares: Vec<Square> = SquareSet::FILE_A.into_iter().collect();
        assert_eq!(squares.len(), 8);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[7], Square::A8);
    }

    #[test]
    fn shifts() {
        let rank2 = SquareSet::rank(1);
        assert_eq!(rank2.north(), SquareSet::rank(2));
        assert_eq!(rank2.forward(Color::Black), SquareSet::RANK_1);
        assert!(SquareSet::RANK_8.north().is_empty());
    }
}
