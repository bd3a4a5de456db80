//! Codec configuration
//!
//! One [`CodecConfig`] drives both the [`crate::Encoder`] and the
//! [`crate::Decoder`]; the two sides must agree on the alphabet.

use crate::alphabet::Alphabet;
use crate::codec::DecodePolicy;
use crate::compress::{ZstdCompressor, DEFAULT_MAX_OUTPUT, MAX_COMPRESSION_LEVEL};
use crate::error::ConfigError;
use crate::strategy::StrategySet;

/// Codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Data symbols and markers
    pub alphabet: Alphabet,
    /// Strategies the encoder may choose from
    pub strategies: StrategySet,
    /// Compressor level
    pub compression_level: i32,
    /// Treatment of characters that are not data symbols
    pub decode_policy: DecodePolicy,
    /// Ceiling on decompressed output, in bytes
    pub max_output_bytes: usize,
}

impl CodecConfig {
    /// Default configuration: single marker, maximum compression level,
    /// strict decoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain bit codec, compression disabled
    pub fn uncompressed() -> Self {
        Self {
            strategies: StrategySet::uncompressed(),
            ..Default::default()
        }
    }

    /// Both compressed strategies enabled
    pub fn dual_marker() -> Self {
        Self {
            strategies: StrategySet::dual_marker(),
            ..Default::default()
        }
    }

    /// Enable or disable compression, keeping the single-marker scheme
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.strategies = if enabled {
            StrategySet::single_marker()
        } else {
            StrategySet::uncompressed()
        };
        self
    }

    /// Set the strategy set
    pub fn with_strategies(mut self, strategies: StrategySet) -> Self {
        self.strategies = strategies;
        self
    }

    /// Set the alphabet
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set the compression level
    pub fn with_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Read unknown characters as bit 0 instead of failing
    pub fn lenient(mut self) -> Self {
        self.decode_policy = DecodePolicy::Lenient;
        self
    }

    /// Set the decompression ceiling
    pub fn with_max_output(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    /// Check the configuration and build its compressor
    pub fn compressor(&self) -> Result<ZstdCompressor, ConfigError> {
        ZstdCompressor::with_level(self.compression_level)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::DEFAULT,
            strategies: StrategySet::default(),
            compression_level: MAX_COMPRESSION_LEVEL,
            decode_policy: DecodePolicy::Strict,
            max_output_bytes: DEFAULT_MAX_OUTPUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert!(config.strategies.contains(Strategy::CompressThenEncode));
        assert!(!config.strategies.contains(Strategy::EncodeThenCompress));
        assert_eq!(config.decode_policy, DecodePolicy::Strict);
        assert_eq!(config.compressor().unwrap().level(), MAX_COMPRESSION_LEVEL);
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::dual_marker().with_level(9).lenient();
        assert_eq!(config.strategies, StrategySet::dual_marker());
        assert_eq!(config.compression_level, 9);
        assert_eq!(config.decode_policy, DecodePolicy::Lenient);

        let config = CodecConfig::new().with_compression(false);
        assert!(!config.strategies.compression_enabled());
    }

    #[test]
    fn test_bad_level() {
        let config = CodecConfig::new().with_level(99);
        assert!(matches!(
            config.compressor(),
            Err(ConfigError::LevelOutOfRange { level: 99, .. })
        ));
    }
}
