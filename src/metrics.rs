//! Metrics collection for ghostink
//!
//! This module provides statistics about encoding overhead, strategy
//! distribution and compression fallbacks, plus a composition analysis of
//! an encoded stream.

use crate::alphabet::Alphabet;
use crate::codec::SYMBOLS_PER_BYTE;
use crate::encoder::Encoded;
use crate::framing;
use crate::strategy::Strategy;
use std::collections::HashMap;

/// Encoding statistics collector
#[derive(Debug, Clone)]
pub struct CompressionMetrics {
    /// Total input bytes
    pub raw_bytes: u64,
    /// Total encoded text bytes (UTF-8)
    pub encoded_bytes: u64,
    /// Number of encodes recorded
    pub message_count: u64,
    /// Strategy distribution
    pub strategy_distribution: HashMap<Strategy, u64>,
    /// Compressed candidates dropped because the compressor failed
    pub compression_fallbacks: u64,
    /// Plain-codec text bytes per input byte under the alphabet in use
    plain_bytes_per_input_byte: usize,
}

impl CompressionMetrics {
    /// Create new metrics collector for the default alphabet
    pub fn new() -> Self {
        Self::for_alphabet(&Alphabet::DEFAULT)
    }

    /// Create a collector measuring savings against `alphabet`'s plain codec
    pub fn for_alphabet(alphabet: &Alphabet) -> Self {
        Self {
            raw_bytes: 0,
            encoded_bytes: 0,
            message_count: 0,
            strategy_distribution: HashMap::new(),
            compression_fallbacks: 0,
            plain_bytes_per_input_byte: SYMBOLS_PER_BYTE * alphabet.max_symbol_len(),
        }
    }

    /// Record an encoding operation
    pub fn record(&mut self, encoded: &Encoded) {
        self.record_encode(encoded.input_len, encoded.encoded_len(), encoded.strategy);
        self.compression_fallbacks += encoded.failed.len() as u64;
    }

    /// Record sizes and strategy directly
    pub fn record_encode(&mut self, raw_size: usize, encoded_size: usize, strategy: Strategy) {
        self.raw_bytes += raw_size as u64;
        self.encoded_bytes += encoded_size as u64;
        self.message_count += 1;
        *self.strategy_distribution.entry(strategy).or_insert(0) += 1;
    }

    /// Encoded text bytes per input byte (24.0 for the plain codec)
    pub fn expansion_factor(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        self.encoded_bytes as f64 / self.raw_bytes as f64
    }

    /// Size saved by compression relative to the plain codec, in percent
    pub fn savings_vs_plain_percent(&self) -> f64 {
        let plain = self.raw_bytes as f64 * self.plain_bytes_per_input_byte as f64;
        if plain == 0.0 {
            return 0.0;
        }
        (1.0 - self.encoded_bytes as f64 / plain) * 100.0
    }

    /// Share of encodes that used a compressed strategy (0.0 - 1.0)
    pub fn compressed_share(&self) -> f64 {
        if self.message_count == 0 {
            return 0.0;
        }
        let compressed: u64 = self
            .strategy_distribution
            .iter()
            .filter(|(strategy, _)| strategy.is_compressed())
            .map(|(_, count)| *count)
            .sum();
        compressed as f64 / self.message_count as f64
    }

    /// Get most used strategy; ties go to the higher-priority strategy
    pub fn most_used_strategy(&self) -> Option<Strategy> {
        self.strategy_distribution
            .iter()
            .max_by_key(|(strategy, count)| (**count, std::cmp::Reverse(strategy.tie_rank())))
            .map(|(strategy, _)| *strategy)
    }

    /// Reset all counters, keeping the alphabet
    pub fn reset(&mut self) {
        *self = Self {
            plain_bytes_per_input_byte: self.plain_bytes_per_input_byte,
            ..Self::new()
        };
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== ghostink Encoding Metrics ===\n\n");

        report.push_str(&format!("Encodes: {}\n", self.message_count));
        report.push_str(&format!("Input bytes: {} bytes\n", self.raw_bytes));
        report.push_str(&format!("Encoded bytes: {} bytes\n", self.encoded_bytes));
        report.push_str(&format!(
            "Expansion: {:.2}x\n",
            self.expansion_factor()
        ));
        report.push_str(&format!(
            "Savings vs plain codec: {:.1}%\n",
            self.savings_vs_plain_percent()
        ));
        if self.compression_fallbacks > 0 {
            report.push_str(&format!(
                "Compression fallbacks: {}\n",
                self.compression_fallbacks
            ));
        }

        report.push_str("\nStrategy distribution:\n");
        let mut strategies: Vec<_> = self.strategy_distribution.iter().collect();
        strategies.sort_by(|a, b| b.1.cmp(a.1).then(a.0.tie_rank().cmp(&b.0.tie_rank())));
        for (strategy, count) in strategies {
            let percent = if self.message_count > 0 {
                (*count as f64 / self.message_count as f64) * 100.0
            } else {
                0.0
            };
            report.push_str(&format!("  {}: {} ({:.1}%)\n", strategy, count, percent));
        }

        report
    }
}

impl Default for CompressionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Character composition of a text that may carry an encoded stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Characters in the text
    pub total_chars: usize,
    /// UTF-8 size of the text
    pub utf8_bytes: usize,
    /// Bit-0 symbols anywhere in the text
    pub zero_symbols: usize,
    /// Bit-1 symbols anywhere in the text
    pub one_symbols: usize,
    /// Marker characters anywhere in the text
    pub markers: usize,
    /// Characters outside the alphabet
    pub other_chars: usize,
    /// Strategy of the located stream
    pub strategy: Strategy,
    /// Characters in the located stream, marker included
    pub stream_chars: usize,
    /// Complete bytes in the located stream's data region
    pub payload_bytes: usize,
    /// Symbols left over after the last complete byte
    pub trailing_symbols: usize,
}

impl StreamStats {
    /// Analyze a text against an alphabet
    pub fn analyze(text: &str, alphabet: &Alphabet) -> Self {
        let mut stats = Self {
            utf8_bytes: text.len(),
            ..Default::default()
        };

        for c in text.chars() {
            stats.total_chars += 1;
            match alphabet.bit(c) {
                Some(false) => stats.zero_symbols += 1,
                Some(true) => stats.one_symbols += 1,
                None if alphabet.strategy_for(c).is_some() => stats.markers += 1,
                None => stats.other_chars += 1,
            }
        }

        if let Some(stream) = framing::locate(text, alphabet) {
            let (strategy, data) = framing::strip_marker(stream, alphabet);
            let data_chars = data.chars().count();
            stats.strategy = strategy;
            stats.stream_chars = data_chars + usize::from(strategy.is_compressed());
            stats.payload_bytes = data_chars / SYMBOLS_PER_BYTE;
            stats.trailing_symbols = data_chars % SYMBOLS_PER_BYTE;
        }

        stats
    }

    /// Whether the text is nothing but one well-formed stream
    pub fn is_pure(&self) -> bool {
        self.other_chars == 0
            && self.stream_chars == self.total_chars
            && self.trailing_symbols == 0
    }

    /// Whether the text contains visible characters
    pub fn has_visible_text(&self) -> bool {
        self.other_chars > 0
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Stream Analysis ===\n\n");
        report.push_str(&format!(
            "Characters: {} ({} bytes UTF-8)\n",
            self.total_chars, self.utf8_bytes
        ));
        report.push_str(&format!(
            "Symbols: {} zero, {} one\n",
            self.zero_symbols, self.one_symbols
        ));
        report.push_str(&format!("Markers: {}\n", self.markers));
        report.push_str(&format!("Other characters: {}\n", self.other_chars));

        if self.stream_chars == 0 {
            report.push_str("\nNo encoded stream found\n");
            return report;
        }

        report.push_str(&format!("\nStrategy: {}\n", self.strategy));
        report.push_str(&format!("Stream length: {} characters\n", self.stream_chars));
        report.push_str(&format!("Payload: {} bytes\n", self.payload_bytes));
        if self.trailing_symbols > 0 {
            report.push_str(&format!(
                "Warning: {} trailing symbols will be dropped\n",
                self.trailing_symbols
            ));
        }

        report
    }
}
