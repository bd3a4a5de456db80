//! Error types for ghostink
//!
//! This module defines all error types used throughout the library.

use crate::strategy::Strategy;
use thiserror::Error;

/// Result type alias for ghostink operations
pub type Result<T> = std::result::Result<T, GhostError>;

/// Main error type for ghostink operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GhostError {
    /// Encoding error
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Decoding error
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors during encoding
///
/// Only compressors produce these. The encoder itself never fails: a
/// compression error removes that candidate and selection continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The byte compressor rejected the input
    #[error("Compression failed: {0}")]
    Compression(String),
}

/// Errors during decoding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A stream carrying a compression marker did not decompress
    #[error("Corrupt {strategy} payload: {reason}")]
    CorruptPayload { strategy: Strategy, reason: String },

    /// A character in the data region is not a data symbol
    #[error("Unrecognized character {character:?} at offset {offset}")]
    UnrecognizedCharacter { offset: usize, character: char },

    /// Decompressed output exceeded the configured ceiling
    #[error("Decompressed output exceeds limit of {limit} bytes")]
    OutputTooLarge { limit: usize },
}

/// Errors in codec configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Two alphabet slots share a code point
    #[error("Alphabet code point {0:?} is used more than once")]
    DuplicateCodePoint(char),

    /// Alphabet code point would render visibly or break text transport
    #[error("Alphabet code point {0:?} is not a zero-width format character")]
    VisibleCodePoint(char),

    /// Compression level outside the compressor's range
    #[error("Compression level {level} outside supported range {min}..={max}")]
    LevelOutOfRange { level: i32, min: i32, max: i32 },

    /// Strategy set without any strategy
    #[error("Strategy set is empty")]
    EmptyStrategySet,
}
