//! Attack tables for every piece type.
//!
//! Step attacks (knight, king, pawn) and sliding rays are computed at
//! compile time. Sliding attacks are resolved per query by cutting each ray
//! at its first blocker.

use crate::SquareSet;
use chess_types::{Color, Square};

/// Ray directions as (file delta, rank delta). The first four increase the
/// square index, the last four decrease it; `DIRECTIONS[d + 4]` is the
/// opposite of `DIRECTIONS[d]`.
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (-1, 1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (1, -1),
];

const ROOK_DIRECTIONS: [usize; 4] = [0, 2, 4, 6];
const BISHOP_DIRECTIONS: [usize; 4] = [1, 3, 5, 7];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = DIRECTIONS;

static KNIGHT_ATTACKS: [SquareSet; 64] = compute_steps(&KNIGHT_DELTAS);
static KING_ATTACKS: [SquareSet; 64] = compute_steps(&KING_DELTAS);
static PAWN_ATTACKS: [[SquareSet; 64]; 2] = [
    compute_steps(&[(-1, 1), (1, 1)]),
    compute_steps(&[(-1, -1), (1, -1)]),
];
static RAYS: [[SquareSet; 64]; 8] = compute_rays();
static BETWEEN: [[SquareSet; 64]; 64] = compute_between();
static LINE: [[SquareSet; 64]; 64] = compute_lines();

const fn target(sq: usize, df: i8, dr: i8) -> Option<usize> {
    let file = (sq % 8) as i8 + df;
    let rank = (sq / 8) as i8 + dr;
    if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        Some((rank * 8 + file) as usize)
    } else {
        None
    }
}

const fn compute_steps(deltas: &[(i8, i8)]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            if let Some(to) = target(sq, deltas[i].0, deltas[i].1) {
                bits |= 1u64 << to;
            }
            i += 1;
        }
        table[sq] = SquareSet::new(bits);
        sq += 1;
    }
    table
}

const fn compute_rays() -> [[SquareSet; 64]; 8] {
    let mut table = [[SquareSet::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut bits = 0u64;
            let mut cur = sq;
            while let Some(next) = target(cur, df, dr) {
                bits |= 1u64 << next;
                cur = next;
            }
            table[dir][sq] = SquareSet::new(bits);
            sq += 1;
        }
        dir += 1;
    }
    table
}

const fn compute_between() -> [[SquareSet; 64]; 64] {
    let rays = compute_rays();
    let mut table = [[SquareSet::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let ray = rays[dir][a].bits();
            let mut b = 0;
            while b < 64 {
                if ray & (1u64 << b) != 0 {
                    let beyond = rays[dir][b].bits() | (1u64 << b);
                    table[a][b] = SquareSet::new(ray & !beyond);
                }
                b += 1;
            }
            dir += 1;
        }
        a += 1;
    }
    table
}

const fn compute_lines() -> [[SquareSet; 64]; 64] {
    let rays = compute_rays();
    let mut table = [[SquareSet::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let ray = rays[dir][a].bits();
            let line = ray | rays[(dir + 4) % 8][a].bits() | (1u64 << a);
            let mut b = 0;
            while b < 64 {
                if ray & (1u64 << b) != 0 {
                    table[a][b] = SquareSet::new(line);
                }
                b += 1;
            }
            dir += 1;
        }
        a += 1;
    }
    table
}

#[inline]
fn ray_attacks(dir: usize, sq: Square, occupied: SquareSet) -> SquareSet {
    let ray = RAYS[dir][sq.index() as usize];
    let blocked = ray & occupied;
    let first = if dir < 4 { blocked.first() } else { blocked.last() };
    match first {
        Some(blocker) => ray ^ RAYS[dir][blocker.index() as usize],
        None => ray,
    }
}

/// Squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_ATTACKS[sq.index() as usize]
}

/// Squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> SquareSet {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Rook attacks from `sq`, including the first blocker on each ray.
pub fn rook_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    ROOK_DIRECTIONS
        .iter()
        .fold(SquareSet::EMPTY, |acc, &d| acc | ray_attacks(d, sq, occupied))
}

/// Bishop attacks from `sq`, including the first blocker on each ray.
pub fn bishop_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    BISHOP_DIRECTIONS
        .iter()
        .fold(SquareSet::EMPTY, |acc, &d| acc | ray_attacks(d, sq, occupied))
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares strictly between `a` and `b`, or empty if they share no line.
#[inline]
pub fn between(a: Square, b: Square) -> SquareSet {
    BETWEEN[a.index() as usize][b.index() as usize]
}

/// The full line through `a` and `b` (edge to edge), or empty if they share
/// no rank, file or diagonal.
#[inline]
pub fn line(a: Square, b: Square) -> SquareSet {
    LINE[a.index() as usize][b.index() as usize]
}

/// Returns true if the three squares lie on one line.
#[inline]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    line(a, b).contains(c)
}
