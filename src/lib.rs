//! # ghostink - invisible ink for bytes
//!
//! Hides arbitrary bytes in text made of zero-width Unicode characters and
//! recovers them losslessly.
//!
//! ## Key Features
//!
//! - **Bit codec**: one zero-width symbol per bit, most significant bit first
//! - **Size-driven compression**: every enabled strategy is tried and the
//!   smallest output wins
//! - **Self-describing streams**: a single leading marker names the strategy,
//!   no side channel needed
//!
//! ## Quick Start
//!
//! ```rust
//! use ghostink::{CodecConfig, Decoder, Encoder, Strategy};
//!
//! let encoder = Encoder::new();
//! let decoder = Decoder::new();
//!
//! // Repetitive input: compression wins
//! let data = "all work and no play ".repeat(100);
//! let encoded = encoder.encode(data.as_bytes());
//! assert_eq!(encoded.strategy, Strategy::CompressThenEncode);
//!
//! // Decode recovers the strategy from the stream itself
//! let decoded = decoder.decode(&encoded.text).unwrap();
//! assert_eq!(decoded.bytes, data.as_bytes());
//!
//! // Plain codec only
//! let plain = Encoder::with_config(CodecConfig::uncompressed()).unwrap();
//! assert_eq!(plain.encode(&[0xFF]).text.chars().count(), 8);
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`]: Data symbols and strategy markers
//! - [`codec`]: Bit-level encode/decode
//! - [`framing`]: Marker handling and stream location
//! - [`compress`]: Compressor trait and zstd adapter
//! - [`encoder`]: Strategy selection
//! - [`decoder`]: Full decode pipeline
//! - [`metrics`]: Encoding statistics and stream analysis
//!
//! ## Logging
//!
//! With the `logging` feature the library reports compression fallbacks
//! (warn) and dropped trailing symbols (debug) through the `log` facade.

/// Log through the `log` facade when the `logging` feature is on; otherwise
/// the arguments are type-checked and discarded.
macro_rules! ghost_log {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "logging")]
        log::$level!($($arg)+);
        #[cfg(not(feature = "logging"))]
        let _ = format_args!($($arg)+);
    }};
}
pub(crate) use ghost_log;

// Modules
pub mod alphabet;
pub mod codec;
pub mod compress;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod metrics;
pub mod strategy;

// Re-exports for convenient access
pub use alphabet::Alphabet;
pub use codec::{BitDecode, DecodePolicy};
pub use compress::{Compressor, DecompressError, ZstdCompressor};
pub use config::CodecConfig;
pub use decoder::{Decoded, Decoder};
pub use encoder::{Candidate, Encoded, Encoder};
pub use error::{ConfigError, DecodeError, EncodeError, GhostError, Result};
pub use metrics::{CompressionMetrics, StreamStats};
pub use strategy::{Strategy, StrategySet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Encode bytes, compressing only if that yields a smaller stream.
///
/// Returns the stream and the strategy it carries.
pub fn choose_and_encode(bytes: &[u8], enable_compression: bool) -> (String, Strategy) {
    let config = CodecConfig::default().with_compression(enable_compression);
    let encoded = Encoder::with_compressor(config, std::sync::Arc::new(ZstdCompressor::new()))
        .encode(bytes);
    (encoded.text, encoded.strategy)
}

/// Decode a stream produced by [`choose_and_encode`] or any default
/// [`Encoder`].
pub fn decode(stream: &str) -> Result<Vec<u8>> {
    Decoder::new().decode(stream).map(|decoded| decoded.bytes)
}
