//! Zobrist keys.
//!
//! A position key XORs together one constant per feature of the position:
//! - each piece on its square (6 types x 2 colors x 64 squares)
//! - black to move
//! - each castling right still held
//! - the file of the en passant square, if any
//!
//! The constants come from a fixed-seed generator evaluated at compile
//! time, so keys are identical across runs and platforms.

use chess_types::{Piece, Square};

/// The table of Zobrist constants.
pub struct ZobristKeys {
    /// Keys for pieces: [piece type][color][square]
    pub pieces: [[[u64; 64]; 2]; 6],
    /// XORed in when black is to move.
    pub black_to_move: u64,
    /// Keys for the four castling rights.
    pub castling: [u64; 4],
    /// Keys for the en passant file.
    pub en_passant: [u64; 8],
}

/// splitmix64 step, returning the new state and the output.
const fn splitmix(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    const SEED: u64 = 0x2545_F491_4F6C_DD1D;

    const fn generate() -> Self {
        let mut state = Self::SEED;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut sq = 0;
                while sq < 64 {
                    let (next, value) = splitmix(state);
                    state = next;
                    pieces[kind][color][sq] = value;
                    sq += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        let (next, black_to_move) = splitmix(state);
        state = next;

        let mut i = 0;
        while i < 4 {
            let (next, value) = splitmix(state);
            state = next;
            castling[i] = value;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            let (next, value) = splitmix(state);
            state = next;
            en_passant[i] = value;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.kind().index()][piece.color().index()][sq.index() as usize]
    }

    /// Key for a castling right, indexed as in [`crate::CastlingRights::index`].
    #[inline]
    pub fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    #[inline]
    pub fn en_passant_key(&self, sq: Square) -> u64 {
        self.en_passant[sq.file_index() as usize]
    }
}

/// Global Zobrist keys.
pub static ZOBRIST: ZobristKeys = ZobristKeys::generate();

#[cfg(test)]
mod tests {
    use super::*;
    use chess_types::{Color, PieceType};
    use std::collections::HashSet;

    #[test]
    fn keys_are_nonzero() {
        assert_ne!(ZOBRIST.black_to_move, 0);
        assert_ne!(ZOBRIST.pieces[0][0][0], 0);
        assert_ne!(ZOBRIST.castling[0], 0);
        assert_ne!(ZOBRIST.en_passant[7], 0);
    }

    #[test]
    fn keys_are_distinct() {
        let mut seen = HashSet::new();
        for kind in ZOBRIST.pieces.iter() {
            for color in kind.iter() {
                for &key in color.iter() {
                    assert!(seen.insert(key));
                }
            }
        }
        assert!(seen.insert(ZOBRIST.black_to_move));
        for &key in ZOBRIST.castling.iter().chain(ZOBRIST.en_passant.iter()) {
            assert!(seen.insert(key));
        }
    }

    #[test]
    fn piece_key_lookup() {
        let wp = PieceType::Pawn.of(Color::White);
        let bp = PieceType::Pawn.of(Color::Black);
        let wn = PieceType::Knight.of(Color::White);
        assert_ne!(ZOBRIST.piece_key(wp, Square::A1), ZOBRIST.piece_key(wp, Square::B1));
        assert_ne!(ZOBRIST.piece_key(wp, Square::A1), ZOBRIST.piece_key(bp, Square::A1));
        assert_ne!(ZOBRIST.piece_key(wp, Square::A1), ZOBRIST.piece_key(wn, Square::A1));
        assert_eq!(ZOBRIST.piece_key(bp, Square::H8), ZOBRIST.pieces[0][1][63]);
    }
}
