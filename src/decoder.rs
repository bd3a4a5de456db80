//! Decoder module
//!
//! This module reverses the encoder: it reads the strategy marker, decodes
//! the data region and undoes whatever compression the strategy applied.
//!
//! Only markers of strategies enabled in the decoder's [`StrategySet`] are
//! honored. Any other leading character belongs to the data region.
//!
//! [`StrategySet`]: crate::strategy::StrategySet

use crate::codec::{self, DecodePolicy, SYMBOLS_PER_BYTE};
use crate::compress::{Compressor, DecompressError, ZstdCompressor};
use crate::config::CodecConfig;
use crate::error::{DecodeError, Result};
use crate::framing;
use crate::strategy::Strategy;
use std::sync::Arc;

/// Result of a decode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Original bytes
    pub bytes: Vec<u8>,
    /// Strategy announced by the stream
    pub strategy: Strategy,
    /// Symbols in the trailing partial group, discarded
    pub dropped_symbols: usize,
}

/// Decoder for encoded streams
#[derive(Debug, Clone)]
pub struct Decoder {
    config: CodecConfig,
    compressor: Arc<dyn Compressor>,
}

impl Decoder {
    /// Decoder with the default configuration
    pub fn new() -> Self {
        Self::with_compressor(CodecConfig::default(), Arc::new(ZstdCompressor::new()))
    }

    /// Decoder with a custom configuration
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        let compressor = config.compressor()?;
        Ok(Self::with_compressor(config, Arc::new(compressor)))
    }

    /// Decoder with a custom compressor
    pub fn with_compressor(config: CodecConfig, compressor: Arc<dyn Compressor>) -> Self {
        Self { config, compressor }
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a stream
    pub fn decode(&self, stream: &str) -> Result<Decoded> {
        let alphabet = &self.config.alphabet;
        let (strategy, data) = match framing::strip_marker(stream, alphabet) {
            (strategy, data) if self.config.strategies.contains(strategy) => (strategy, data),
            _ => (Strategy::None, stream),
        };
        let offset = usize::from(strategy.is_compressed());
        let region = codec::decode_symbols(data, alphabet, self.config.decode_policy, offset)?;

        let limit = self.config.max_output_bytes;
        let bytes = match strategy {
            Strategy::None => region.bytes,
            Strategy::CompressThenEncode => self.inflate(strategy, &region.bytes, limit)?,
            Strategy::EncodeThenCompress => {
                // The inner text spends one symbol per bit.
                let symbol_bytes = SYMBOLS_PER_BYTE * alphabet.max_symbol_len();
                let inner =
                    self.inflate(strategy, &region.bytes, limit.saturating_mul(symbol_bytes))?;
                self.decode_inner(strategy, inner)?
            }
        };
        if bytes.len() > limit {
            return Err(DecodeError::OutputTooLarge { limit }.into());
        }

        Ok(Decoded {
            bytes,
            strategy,
            dropped_symbols: region.dropped_symbols,
        })
    }

    /// Find a stream inside surrounding text and decode it.
    ///
    /// Returns `Ok(None)` when the text holds no encoded stream.
    pub fn decode_embedded(&self, text: &str) -> Result<Option<Decoded>> {
        match framing::locate(text, &self.config.alphabet) {
            Some(stream) => self.decode(stream).map(Some),
            None => Ok(None),
        }
    }

    fn inflate(&self, strategy: Strategy, payload: &[u8], limit: usize) -> Result<Vec<u8>> {
        self.compressor.decompress(payload, limit).map_err(|err| {
            let err = match err {
                DecompressError::Corrupt(reason) => DecodeError::CorruptPayload { strategy, reason },
                DecompressError::TooLarge { .. } => DecodeError::OutputTooLarge {
                    limit: self.config.max_output_bytes,
                },
            };
            err.into()
        })
    }

    /// Second pass of encode-then-compress: the decompressed bytes must be
    /// a complete, strictly valid plain stream.
    fn decode_inner(&self, strategy: Strategy, inner: Vec<u8>) -> Result<Vec<u8>> {
        let corrupt = |reason: String| DecodeError::CorruptPayload { strategy, reason };

        let text = String::from_utf8(inner)
            .map_err(|e| corrupt(format!("inner stream is not UTF-8: {}", e)))?;
        let region =
            codec::decode_symbols(&text, &self.config.alphabet, DecodePolicy::Strict, 0)
                .map_err(|e| corrupt(format!("inner stream: {}", e)))?;
        if region.dropped_symbols != 0 {
            return Err(corrupt(format!(
                "inner stream ends with {} stray symbols",
                region.dropped_symbols
            ))
            .into());
        }
        Ok(region.bytes)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, WORD_JOINER, ZERO_WIDTH_JOINER};
    use crate::encoder::Encoder;
    use crate::error::GhostError;

    fn dual() -> Decoder {
        Decoder::with_config(CodecConfig::dual_marker()).unwrap()
    }

    #[test]
    fn test_decode_plain() {
        let text = codec::encode(b"plain", &Alphabet::DEFAULT);
        let decoded = Decoder::new().decode(&text).unwrap();
        assert_eq!(decoded.bytes, b"plain");
        assert_eq!(decoded.strategy, Strategy::None);
        assert_eq!(decoded.dropped_symbols, 0);
    }

    #[test]
    fn test_roundtrip_each_strategy() {
        let encoder = Encoder::with_config(CodecConfig::dual_marker()).unwrap();
        let decoder = dual();
        let data = b"round and round the garden, like a teddy bear".repeat(4);
        for strategy in Strategy::PRIORITY {
            let encoded = encoder.encode_with(&data, strategy).unwrap();
            let decoded = decoder.decode(&encoded.text).unwrap();
            assert_eq!(decoded.strategy, strategy);
            assert_eq!(decoded.bytes, data);
        }
    }

    #[test]
    fn test_corrupt_compressed_payload() {
        let mut text = String::new();
        text.push(ZERO_WIDTH_JOINER);
        text.push_str(&codec::encode(b"not zstd at all", &Alphabet::DEFAULT));
        let err = Decoder::new().decode(&text).unwrap_err();
        assert!(matches!(
            err,
            GhostError::Decode(DecodeError::CorruptPayload {
                strategy: Strategy::CompressThenEncode,
                ..
            })
        ));
    }

    #[test]
    fn test_marker_only_is_corrupt() {
        let err = dual().decode(&WORD_JOINER.to_string()).unwrap_err();
        assert!(matches!(
            err,
            GhostError::Decode(DecodeError::CorruptPayload {
                strategy: Strategy::EncodeThenCompress,
                ..
            })
        ));
    }

    #[test]
    fn test_inner_stream_must_be_symbols() {
        // A valid zstd frame whose content is visible text.
        let packed = ZstdCompressor::new().compress(b"hello").unwrap();
        let mut text = String::new();
        text.push(WORD_JOINER);
        text.push_str(&codec::encode(&packed, &Alphabet::DEFAULT));
        let err = dual().decode(&text).unwrap_err();
        assert!(matches!(
            err,
            GhostError::Decode(DecodeError::CorruptPayload { .. })
        ));
    }

    #[test]
    fn test_output_ceiling() {
        let encoder = Encoder::new();
        let encoded = encoder
            .encode_with(&[0u8; 10_000], Strategy::CompressThenEncode)
            .unwrap();
        let decoder = Decoder::with_config(CodecConfig::new().with_max_output(1024)).unwrap();
        assert_eq!(
            decoder.decode(&encoded.text).unwrap_err(),
            GhostError::Decode(DecodeError::OutputTooLarge { limit: 1024 })
        );
    }

    #[test]
    fn test_single_marker_decoder_ignores_other_marker() {
        let encoder = Encoder::with_config(CodecConfig::dual_marker()).unwrap();
        let encoded = encoder
            .encode_with(b"hello", Strategy::EncodeThenCompress)
            .unwrap();

        let err = Decoder::new().decode(&encoded.text).unwrap_err();
        assert_eq!(
            err,
            GhostError::Decode(DecodeError::UnrecognizedCharacter {
                offset: 0,
                character: WORD_JOINER,
            })
        );

        let lenient = Decoder::with_config(CodecConfig::new().lenient()).unwrap();
        let decoded = lenient.decode(&encoded.text).unwrap();
        assert_eq!(decoded.strategy, Strategy::None);

        assert_eq!(dual().decode(&encoded.text).unwrap().bytes, b"hello");
    }

    #[test]
    fn test_encode_then_compress_ceiling_applies_to_output() {
        let encoder = Encoder::with_config(CodecConfig::dual_marker()).unwrap();
        let decoder =
            Decoder::with_config(CodecConfig::dual_marker().with_max_output(1024)).unwrap();

        // 1000 bytes expand to 24000 bytes of inner text, still under the limit.
        let fits = encoder
            .encode_with(&[3u8; 1000], Strategy::EncodeThenCompress)
            .unwrap();
        assert_eq!(decoder.decode(&fits.text).unwrap().bytes, vec![3u8; 1000]);

        let too_big = encoder
            .encode_with(&[3u8; 2000], Strategy::EncodeThenCompress)
            .unwrap();
        assert_eq!(
            decoder.decode(&too_big.text).unwrap_err(),
            GhostError::Decode(DecodeError::OutputTooLarge { limit: 1024 })
        );
    }

    #[test]
    fn test_strict_and_lenient() {
        let mut text = String::from("?");
        text.push_str(&codec::encode(&[0xFF], &Alphabet::DEFAULT)[3..]);
        assert!(Decoder::new().decode(&text).is_err());

        let lenient = Decoder::with_config(CodecConfig::new().lenient()).unwrap();
        assert_eq!(lenient.decode(&text).unwrap().bytes, vec![0x7F]);
    }

    #[test]
    fn test_decode_embedded() {
        let encoded = Encoder::new().encode(b"between the lines");
        let cover = format!("Regards,{}\nThe Team", encoded.text);
        let decoded = Decoder::new().decode_embedded(&cover).unwrap().unwrap();
        assert_eq!(decoded.bytes, b"between the lines");

        assert_eq!(Decoder::new().decode_embedded("nothing here").unwrap(), None);
    }

    #[test]
    fn test_dropped_symbols_reported() {
        let mut text = codec::encode(b"ab", &Alphabet::DEFAULT);
        text.push_str(&codec::encode(&[0], &Alphabet::DEFAULT)[..15]);
        let decoded = Decoder::new().decode(&text).unwrap();
        assert_eq!(decoded.bytes, b"ab");
        assert_eq!(decoded.dropped_symbols, 5);
    }
}
