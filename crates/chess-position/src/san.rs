//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use crate::{CastleSide, Position};
use chess_types::{Color, Move, PieceType, Square};
use thiserror::Error;

/// Error type for SAN parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,
    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),
    /// More than one legal move fits the string.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// Formatting options for SAN output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanOptions {
    /// Prefix moves with their number: "12. Nf3" for white, "12... Nf6" for
    /// black.
    pub include_move_number: bool,
}

/// Converts a move to SAN notation.
///
/// `position` is the position BEFORE the move is made, and `m` must be one
/// of its legal moves. The null move is written as "--".
pub fn move_to_san(position: &Position, m: Move) -> String {
    move_to_san_with(position, m, SanOptions::default())
}

/// [`move_to_san`] with explicit formatting options.
pub fn move_to_san_with(position: &Position, m: Move, options: SanOptions) -> String {
    let body = san_body(position, m);
    if options.include_move_number {
        format!("{}{}", move_number(position), body)
    } else {
        body
    }
}

/// Renders a line of consecutive moves starting at `position`.
///
/// With move numbers the line reads "1. e4 e5 2. Nf3", or "1... e5 2. Nf3"
/// when it starts with black to move. Rendering stops at a null move played
/// while in check.
pub fn moves_to_san(position: &Position, moves: &[Move], options: SanOptions) -> String {
    let mut parts = Vec::with_capacity(moves.len());
    let mut current = position.clone();
    for (i, &m) in moves.iter().enumerate() {
        let body = san_body(&current, m);
        let numbered = options.include_move_number
            && (current.side_to_move() == Color::White || i == 0);
        parts.push(if numbered {
            format!("{}{}", move_number(&current), body)
        } else {
            body
        });
        match current.advance(m) {
            Some(next) => current = next,
            None => break,
        }
    }
    parts.join(" ")
}

/// Parses a SAN string and returns the corresponding legal move.
///
/// Check, mate and annotation suffixes ("+", "#", "!", "?") are ignored.
/// Castling may be written with letter O or digit 0, and promotions with or
/// without the "=".
pub fn move_from_san(position: &Position, san: &str) -> Result<Move, SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }
    let body = san.trim_end_matches(['+', '#', '!', '?']);

    match body {
        "--" => {
            return if position.is_check() {
                Err(SanError::NoMatchingMove(san.to_string()))
            } else {
                Ok(Move::NULL)
            };
        }
        "O-O" | "0-0" => return find_castling_move(position, CastleSide::King, san),
        "O-O-O" | "0-0-0" => return find_castling_move(position, CastleSide::Queen, san),
        _ => {}
    }

    let parsed = ParsedSan::parse(body)
        .ok_or_else(|| SanError::InvalidFormat(san.to_string()))?;

    let mut matching = position
        .legal_moves()
        .iter()
        .copied()
        .filter(|&m| parsed.matches(position, m))
        .take(2)
        .collect::<Vec<_>>();

    match matching.len() {
        0 => Err(SanError::NoMatchingMove(san.to_string())),
        1 => Ok(matching.remove(0)),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

impl Position {
    /// Plays the move written as `san`.
    pub fn play_san(&self, san: &str) -> Result<Position, SanError> {
        let m = move_from_san(self, san)?;
        self.advance(m)
            .ok_or_else(|| SanError::NoMatchingMove(san.to_string()))
    }
}

/// Parsed components of a non-castling SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: PieceType,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceType>,
}

impl ParsedSan {
    fn parse(body: &str) -> Option<ParsedSan> {
        if !body.is_ascii() {
            return None;
        }
        let mut bytes = body.as_bytes();

        let piece = match bytes.first()? {
            b'N' | b'B' | b'R' | b'Q' | b'K' | b'P' => {
                let kind = PieceType::from_char(bytes[0] as char)?;
                bytes = &bytes[1..];
                kind
            }
            _ => PieceType::Pawn,
        };

        let mut promotion = None;
        if let Some(eq) = bytes.iter().position(|&b| b == b'=') {
            if eq + 2 != bytes.len() {
                return None;
            }
            promotion = Some(promotion_letter(bytes[eq + 1])?);
            bytes = &bytes[..eq];
        } else if let Some(&last) = bytes.last() {
            if piece == PieceType::Pawn && last.is_ascii_uppercase() {
                promotion = Some(promotion_letter(last)?);
                bytes = &bytes[..bytes.len() - 1];
            }
        }

        let squares: Vec<u8> = bytes.iter().copied().filter(|&b| b != b'x').collect();
        if squares.len() < 2 || squares.len() > 4 {
            return None;
        }
        let (disambiguation, dest) = squares.split_at(squares.len() - 2);
        let to = Square::from_coords(file_of(dest[0])? as i8, rank_of(dest[1])? as i8)?;

        let (from_file, from_rank) = match *disambiguation {
            [] => (None, None),
            [c] => match (file_of(c), rank_of(c)) {
                (Some(f), _) => (Some(f), None),
                (None, Some(r)) => (None, Some(r)),
                (None, None) => return None,
            },
            [f, r] => (Some(file_of(f)?), Some(rank_of(r)?)),
            _ => return None,
        };
        // A pawn named without a file moves straight ahead.
        let from_file = match (piece, from_file) {
            (PieceType::Pawn, None) => Some(to.file_index()),
            (_, file) => file,
        };

        Some(ParsedSan {
            piece,
            from_file,
            from_rank,
            to,
            promotion,
        })
    }

    fn matches(&self, position: &Position, m: Move) -> bool {
        !m.is_castle()
            && m.to() == self.to
            && m.promotion_piece() == self.promotion
            && self.from_file.map_or(true, |f| m.from().file_index() == f)
            && self.from_rank.map_or(true, |r| m.from().rank_index() == r)
            && position
                .piece_at(m.from())
                .is_some_and(|p| p.kind() == self.piece)
    }
}

fn find_castling_move(position: &Position, side: CastleSide, san: &str) -> Result<Move, SanError> {
    position
        .legal_moves()
        .iter()
        .copied()
        .find(|m| match side {
            CastleSide::King => m.is_kingside_castle(),
            CastleSide::Queen => m.is_queenside_castle(),
        })
        .ok_or_else(|| SanError::NoMatchingMove(san.to_string()))
}

fn san_body(position: &Position, m: Move) -> String {
    if m.is_null() {
        return "--".to_string();
    }
    if m.is_castle() {
        let castle = if m.is_kingside_castle() { "O-O" } else { "O-O-O" };
        return format!("{}{}", castle, check_suffix(position, m));
    }

    let from = m.from();
    let to = m.to();
    let Some(piece) = position.piece_at(from) else {
        return m.to_uci();
    };
    let is_capture = m.is_en_passant() || position.piece_at(to).is_some();

    let mut san = String::new();
    if piece.kind() == PieceType::Pawn {
        if is_capture {
            san.push(from.file().to_char());
            san.push('x');
        }
    } else {
        san.push(piece.kind().san_char());
        san.push_str(&disambiguation(position, m, piece.kind()));
        if is_capture {
            san.push('x');
        }
    }
    san.push_str(&to.to_algebraic());

    if let Some(promoted) = m.promotion_piece() {
        san.push('=');
        san.push(promoted.san_char());
    }

    san.push_str(check_suffix(position, m));
    san
}

fn disambiguation(position: &Position, m: Move, kind: PieceType) -> String {
    let from = m.from();
    let rivals: Vec<Square> = position
        .legal_moves()
        .iter()
        .filter(|other| other.to() == m.to() && other.from() != from && !other.is_castle())
        .map(|other| other.from())
        .filter(|&sq| position.piece_at(sq).is_some_and(|p| p.kind() == kind))
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file_index() != from.file_index()) {
        from.file().to_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank_index() != from.rank_index()) {
        from.rank().to_char().to_string()
    } else {
        from.to_algebraic()
    }
}

fn check_suffix(position: &Position, m: Move) -> &'static str {
    let next = position.do_move(m);
    if next.is_mate() {
        "#"
    } else if next.is_check() {
        "+"
    } else {
        ""
    }
}

fn move_number(position: &Position) -> String {
    match position.side_to_move() {
        Color::White => format!("{}. ", position.fullmove_number()),
        Color::Black => format!("{}... ", position.fullmove_number()),
    }
}

fn promotion_letter(b: u8) -> Option<PieceType> {
    PieceType::from_char(b as char).filter(|kind| b.is_ascii_uppercase() && kind.is_promotion_target())
}

fn file_of(b: u8) -> Option<u8> {
    (b'a'..=b'h').contains(&b).then(|| b - b'a')
}

fn rank_of(b: u8) -> Option<u8> {
    (b'1'..=b'8').contains(&b).then(|| b - b'1')
}
