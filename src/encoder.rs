//! Encoder module
//!
//! This module turns bytes into an encoded stream, choosing among the
//! enabled strategies the one whose output is smallest in UTF-8 bytes.
//!
//! Ties go to the strategy earliest in [`Strategy::PRIORITY`]:
//! compress-then-encode, then encode-then-compress, then none. With the
//! single-marker set this reads "tie or compressed smaller ⇒ compressed".

use crate::codec;
use crate::compress::Compressor;
use crate::config::CodecConfig;
use crate::error::{EncodeError, Result};
use crate::framing;
use crate::strategy::Strategy;
use std::sync::Arc;

/// Size of one candidate the selector measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Strategy that produced the candidate
    pub strategy: Strategy,
    /// Serialized size in UTF-8 bytes, marker included
    pub encoded_len: usize,
}

/// Result of an encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The encoded stream, marker included
    pub text: String,
    /// Strategy of `text`
    pub strategy: Strategy,
    /// Size of the input in bytes
    pub input_len: usize,
    /// Every candidate that was produced, in priority order
    pub candidates: Vec<Candidate>,
    /// Strategies dropped because the compressor failed
    pub failed: Vec<Strategy>,
}

impl Encoded {
    /// Size of `text` in UTF-8 bytes
    pub fn encoded_len(&self) -> usize {
        self.text.len()
    }

    /// Measured size for a strategy, if it was a candidate
    pub fn candidate_len(&self, strategy: Strategy) -> Option<usize> {
        self.candidates
            .iter()
            .find(|c| c.strategy == strategy)
            .map(|c| c.encoded_len)
    }
}

/// Strategy selector and encoder
#[derive(Debug, Clone)]
pub struct Encoder {
    config: CodecConfig,
    compressor: Arc<dyn Compressor>,
}

impl Encoder {
    /// Encoder with the default configuration
    pub fn new() -> Self {
        Self {
            config: CodecConfig::default(),
            compressor: Arc::new(crate::compress::ZstdCompressor::new()),
        }
    }

    /// Encoder with a custom configuration
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        let compressor = config.compressor()?;
        Ok(Self {
            config,
            compressor: Arc::new(compressor),
        })
    }

    /// Encoder with a custom compressor; `compression_level` is ignored
    pub fn with_compressor(config: CodecConfig, compressor: Arc<dyn Compressor>) -> Self {
        Self { config, compressor }
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode with the smallest enabled strategy. Never fails: a compressor
    /// error removes that candidate and the plain encoding remains.
    pub fn encode(&self, bytes: &[u8]) -> Encoded {
        let direct = codec::encode(bytes, &self.config.alphabet);

        let mut candidates = Vec::with_capacity(self.config.strategies.len());
        let mut failed = Vec::new();
        let mut best: Option<(Strategy, String)> = None;

        for strategy in self.config.strategies.iter().filter(|s| s.is_compressed()) {
            let text = match self.render(bytes, &direct, strategy) {
                Ok(text) => text,
                Err(err) => {
                    crate::ghost_log!(
                        warn,
                        "{} candidate dropped, falling back: {}",
                        strategy,
                        err
                    );
                    failed.push(strategy);
                    continue;
                }
            };
            candidates.push(Candidate {
                strategy,
                encoded_len: text.len(),
            });

            // Iteration is in priority order, so only a strictly smaller
            // later candidate may replace the current best.
            let replace = match &best {
                Some((_, current)) => text.len() < current.len(),
                None => true,
            };
            if replace {
                best = Some((strategy, text));
            }
        }

        // `None` is always enabled and last in priority.
        candidates.push(Candidate {
            strategy: Strategy::None,
            encoded_len: direct.len(),
        });
        let (strategy, text) = match best {
            Some((strategy, text)) if text.len() <= direct.len() => (strategy, text),
            _ => (Strategy::None, direct),
        };

        crate::ghost_log!(
            debug,
            "encoded {} bytes as {} ({} bytes of text)",
            bytes.len(),
            strategy,
            text.len()
        );

        Encoded {
            text,
            strategy,
            input_len: bytes.len(),
            candidates,
            failed,
        }
    }

    /// Encode with a fixed strategy, skipping selection
    pub fn encode_with(&self, bytes: &[u8], strategy: Strategy) -> Result<Encoded> {
        let direct = codec::encode(bytes, &self.config.alphabet);
        let text = match strategy {
            Strategy::None => direct,
            _ => self.render(bytes, &direct, strategy)?,
        };
        Ok(Encoded {
            candidates: vec![Candidate {
                strategy,
                encoded_len: text.len(),
            }],
            text,
            strategy,
            input_len: bytes.len(),
            failed: Vec::new(),
        })
    }

    /// Produce the stream for one compressed strategy. `direct` is the
    /// plain encoding of `bytes`, computed once by the caller.
    fn render(
        &self,
        bytes: &[u8],
        direct: &str,
        strategy: Strategy,
    ) -> std::result::Result<String, EncodeError> {
        let alphabet = &self.config.alphabet;
        let body = match strategy {
            Strategy::None => return Ok(direct.to_owned()),
            Strategy::CompressThenEncode => self.compressor.compress(bytes)?,
            Strategy::EncodeThenCompress => self.compressor.compress(direct.as_bytes())?,
        };
        Ok(framing::apply_marker(
            strategy,
            codec::encode(&body, alphabet),
            alphabet,
        ))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
