//! Compression adapter
//!
//! The codec never compresses by itself. It hands bytes to a [`Compressor`]
//! and measures what comes back; a compressor is never assumed to shrink
//! its input.

use crate::error::{ConfigError, EncodeError};
use std::fmt;
use std::io::Read;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Highest zstd level, trading speed for ratio
pub const MAX_COMPRESSION_LEVEL: i32 = 22;

/// Default ceiling for decompressed output (256 MiB)
pub const DEFAULT_MAX_OUTPUT: usize = 256 * 1024 * 1024;

/// Decompression failure, before the decoder attaches the strategy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompressError {
    /// Input is not a valid compressed payload
    #[error("{0}")]
    Corrupt(String),
    /// Output would exceed the ceiling
    #[error("output exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// General-purpose byte compressor
pub trait Compressor: Send + Sync + fmt::Debug {
    /// Short identifier for logs and reports
    fn name(&self) -> &'static str;

    /// Compress a buffer
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, EncodeError>;

    /// Decompress a buffer produced by [`Compressor::compress`], producing
    /// at most `limit` bytes
    fn decompress(&self, data: &[u8], limit: usize) -> Result<Vec<u8>, DecompressError>;
}

/// Zstandard at a fixed level (maximum ratio by default)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    /// Compressor at [`MAX_COMPRESSION_LEVEL`]
    pub fn new() -> Self {
        Self {
            level: MAX_COMPRESSION_LEVEL,
        }
    }

    /// Compressor at a specific level
    pub fn with_level(level: i32) -> Result<Self, ConfigError> {
        let range = Self::level_range();
        if !range.contains(&level) {
            return Err(ConfigError::LevelOutOfRange {
                level,
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(Self { level })
    }

    /// Levels accepted by [`ZstdCompressor::with_level`]
    pub fn level_range() -> RangeInclusive<i32> {
        1..=MAX_COMPRESSION_LEVEL
    }

    /// Configured level
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, EncodeError> {
        // One-shot: tables are sized to the input, not the level's maximum.
        zstd::bulk::compress(data, self.level)
            .map_err(|e| EncodeError::Compression(format!("zstd compression failed: {}", e)))
    }

    fn decompress(&self, data: &[u8], limit: usize) -> Result<Vec<u8>, DecompressError> {
        if data.is_empty() {
            return Err(DecompressError::Corrupt("empty payload".to_string()));
        }

        let decoder = zstd::stream::read::Decoder::new(data)
            .map_err(|e| DecompressError::Corrupt(format!("zstd init failed: {}", e)))?;

        let mut out = Vec::new();
        let ceiling = (limit as u64).saturating_add(1);
        decoder
            .take(ceiling)
            .read_to_end(&mut out)
            .map_err(|e| DecompressError::Corrupt(format!("zstd decompression failed: {}", e)))?;

        if out.len() > limit {
            return Err(DecompressError::TooLarge { limit });
        }
        Ok(out)
    }
}
