//! FEN (Forsyth-Edwards Notation) tokenizing.
//!
//! [`FenFields`] only checks that each field is well formed. Whether the
//! described position makes sense (one king per side, no pawns on the back
//! rank, ...) is decided by the position crate.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The fields of a FEN string, each checked for syntax.
///
/// Boards smaller than 8x8 are accepted: the placement may have 1 to 8
/// ranks of 1 to 8 squares each, as long as every rank has the same width.
/// Such a board occupies the lower-left corner of the 8x8 grid, so its first
/// rank is rank 1 and its first file is file a.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Piece placement as written (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").
    pub piece_placement: String,
    /// Pieces and the squares they stand on, in FEN reading order.
    pub pieces: Vec<(Square, Piece)>,
    /// Board width.
    pub files: u8,
    /// Board height.
    pub ranks: u8,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability, "-" or a subset of "KQkq" without repeats.
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule). Defaults to 0 for 4-field FEN.
    pub halfmove_clock: u32,
    /// Fullmove number. Defaults to 1 for 4-field FEN.
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 && parts.len() != 4 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let (pieces, files, ranks) = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3], files, ranks)?;

        let (halfmove_clock, fullmove_number) = if parts.len() == 6 {
            let halfmove = parts[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
            let fullmove = parts[5]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(FenFields {
            piece_placement: parts[0].to_string(),
            pieces,
            files,
            ranks,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<(Vec<(Square, Piece)>, u8, u8), FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() > 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected at most 8 ranks, got {}",
                rows.len()
            )));
        }
        let ranks = rows.len() as u8;

        let mut pieces = Vec::new();
        let mut width: Option<u8> = None;
        for (i, row) in rows.iter().enumerate() {
            let rank = ranks - 1 - i as u8;
            let mut file: u8 = 0;
            for c in row.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "empty run of zero squares in rank {}",
                            rank + 1
                        )));
                    }
                    file += run as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::from_coords(file as i8, rank as i8) {
                        pieces.push((sq, piece));
                    }
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        rank + 1
                    )));
                }
            }
            if file == 0 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} is empty",
                    rank + 1
                )));
            }
            match width {
                None => width = Some(file),
                Some(w) if w != file => {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} has {} squares, expected {}",
                        rank + 1,
                        file,
                        w
                    )));
                }
                Some(_) => {}
            }
        }

        let files = width.unwrap_or(0);
        Ok((pieces, files, ranks))
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
            if seen.contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "repeated character '{}'",
                    c
                )));
            }
            seen.push(c);
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str, files: u8, ranks: u8) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let sq = Square::from_algebraic(ep)
            .ok_or_else(|| FenError::InvalidEnPassantSquare(ep.to_string()))?;
        // White's target sits on the third rank, black's on the third from the top.
        let on_board = sq.file_index() < files && ranks >= 4;
        let target_rank = sq.rank_index() == 2 || sq.rank_index() + 3 == ranks;
        if !on_board || !target_rank {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(Some(sq))
    }

    /// Converts the parsed FEN back to a six-field FEN string.
    pub fn to_fen(&self) -> String {
        let ep = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color.fen_char(),
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
