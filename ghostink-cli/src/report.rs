// ghostink CLI - JSON report shapes
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Serializable views of codec results for `--json` output.

use ghostink::{Encoded, StreamStats};
use serde::Serialize;

/// One measured candidate
#[derive(Debug, Serialize)]
pub struct CandidateReport {
    pub strategy: String,
    pub encoded_bytes: usize,
    pub selected: bool,
}

/// Summary of an encode
#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub output_chars: usize,
    pub strategy: String,
    pub candidates: Vec<CandidateReport>,
    pub failed: Vec<String>,
}

impl EncodeReport {
    pub fn from_encoded(encoded: &Encoded) -> Self {
        Self {
            input_bytes: encoded.input_len,
            output_bytes: encoded.encoded_len(),
            output_chars: encoded.text.chars().count(),
            strategy: encoded.strategy.to_string(),
            candidates: encoded
                .candidates
                .iter()
                .map(|c| CandidateReport {
                    strategy: c.strategy.to_string(),
                    encoded_bytes: c.encoded_len,
                    selected: c.strategy == encoded.strategy,
                })
                .collect(),
            failed: encoded.failed.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Plain-text rendering for the terminal
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} bytes -> {} bytes ({} characters) using {}\n",
            self.input_bytes, self.output_bytes, self.output_chars, self.strategy
        );
        for candidate in &self.candidates {
            let mark = if candidate.selected { "*" } else { " " };
            out.push_str(&format!(
                " {} {:<22} {} bytes\n",
                mark, candidate.strategy, candidate.encoded_bytes
            ));
        }
        for strategy in &self.failed {
            out.push_str(&format!("   {:<22} compressor failed\n", strategy));
        }
        out
    }
}

/// Stream analysis
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub total_chars: usize,
    pub utf8_bytes: usize,
    pub zero_symbols: usize,
    pub one_symbols: usize,
    pub markers: usize,
    pub other_chars: usize,
    pub stream_found: bool,
    pub strategy: String,
    pub stream_chars: usize,
    pub payload_bytes: usize,
    pub trailing_symbols: usize,
    pub pure: bool,
}

impl From<&StreamStats> for AnalysisReport {
    fn from(stats: &StreamStats) -> Self {
        Self {
            total_chars: stats.total_chars,
            utf8_bytes: stats.utf8_bytes,
            zero_symbols: stats.zero_symbols,
            one_symbols: stats.one_symbols,
            markers: stats.markers,
            other_chars: stats.other_chars,
            stream_found: stats.stream_chars > 0,
            strategy: stats.strategy.to_string(),
            stream_chars: stats.stream_chars,
            payload_bytes: stats.payload_bytes,
            trailing_symbols: stats.trailing_symbols,
            pure: stats.is_pure(),
        }
    }
}
