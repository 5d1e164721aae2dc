//! Perft suite files.
//!
//! A suite is a TOML file listing positions with their expected node counts:
//!
//! ```toml
//! threads = 4
//!
//! [[position]]
//! name = "kiwipete"
//! fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
//! depths = [48, 2039, 97862]
//! ```

use chess_position::{FenOptions, Position, PositionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a suite.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the suite file from disk.
    #[error("failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML, or doesn't match the suite layout.
    #[error("failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A position's FEN was rejected.
    #[error("position {name}: {source}")]
    InvalidPosition {
        name: String,
        #[source]
        source: PositionError,
    },
}

/// One position of a suite.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SuitePosition {
    pub name: String,
    pub fen: String,
    /// Expected node counts, starting at depth 1.
    pub depths: Vec<u64>,
    /// Whether kings follow the check rules. Defaults to true.
    #[serde(default = "default_king_is_special")]
    pub king_is_special: bool,
}

fn default_king_is_special() -> bool {
    true
}

impl SuitePosition {
    /// Parses the FEN of this entry.
    pub fn position(&self) -> Result<Position, ConfigError> {
        let options = FenOptions {
            king_is_special: self.king_is_special,
        };
        Position::from_fen_with(&self.fen, options).map_err(|source| {
            ConfigError::InvalidPosition {
                name: self.name.clone(),
                source,
            }
        })
    }
}

/// A perft suite.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Worker threads per perft run. Defaults to 1.
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default, rename = "position")]
    pub positions: Vec<SuitePosition>,
}

fn default_threads() -> usize {
    1
}

impl SuiteConfig {
    /// Reads and parses the suite at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a suite from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
