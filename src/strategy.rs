//! Strategy definitions
//!
//! A strategy names the pipeline that produced an encoded stream. Every
//! strategy except [`Strategy::None`] is announced by a single marker
//! character at position 0 of the stream.

use crate::error::ConfigError;
use std::fmt;

/// Compression/encoding pipeline applied to a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Strategy {
    /// Bit codec only, no marker
    #[default]
    None = 0,
    /// Compress the raw bytes, then run the bit codec
    CompressThenEncode = 1,
    /// Run the bit codec, compress the resulting text bytes, then run the
    /// bit codec again over the compressed bytes
    EncodeThenCompress = 2,
}

impl Strategy {
    /// All strategies, in tie-break priority order (first wins a tie)
    pub const PRIORITY: [Strategy; 3] = [
        Strategy::CompressThenEncode,
        Strategy::EncodeThenCompress,
        Strategy::None,
    ];

    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Strategy::None),
            1 => Some(Strategy::CompressThenEncode),
            2 => Some(Strategy::EncodeThenCompress),
            _ => None,
        }
    }

    /// Whether this strategy runs the compressor
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Strategy::None)
    }

    /// Position in [`Strategy::PRIORITY`]; lower wins ties
    pub fn tie_rank(&self) -> usize {
        match self {
            Strategy::CompressThenEncode => 0,
            Strategy::EncodeThenCompress => 1,
            Strategy::None => 2,
        }
    }

    /// Stable lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::None => "none",
            Strategy::CompressThenEncode => "compress-then-encode",
            Strategy::EncodeThenCompress => "encode-then-compress",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of strategies the selector is allowed to try
///
/// [`Strategy::None`] is always a member: it is the fallback when every
/// compressed candidate fails, and it can never fail itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategySet {
    bits: u8,
}

impl StrategySet {
    /// Only the plain bit codec
    pub fn uncompressed() -> Self {
        Self::from_bits(0)
    }

    /// Plain codec plus compress-then-encode (one marker in the alphabet)
    pub fn single_marker() -> Self {
        Self::from_bits(1 << Strategy::CompressThenEncode as u8)
    }

    /// Every strategy (both markers in the alphabet)
    pub fn dual_marker() -> Self {
        Self::from_bits(
            (1 << Strategy::CompressThenEncode as u8) | (1 << Strategy::EncodeThenCompress as u8),
        )
    }

    /// Build a set from an explicit list
    pub fn from_strategies(strategies: &[Strategy]) -> Result<Self, ConfigError> {
        if strategies.is_empty() {
            return Err(ConfigError::EmptyStrategySet);
        }
        let bits = strategies
            .iter()
            .fold(0u8, |acc, strategy| acc | (1 << *strategy as u8));
        Ok(Self::from_bits(bits))
    }

    fn from_bits(bits: u8) -> Self {
        Self {
            bits: bits | (1 << Strategy::None as u8),
        }
    }

    /// Check membership
    pub fn contains(&self, strategy: Strategy) -> bool {
        self.bits & (1 << strategy as u8) != 0
    }

    /// Whether any compressed strategy is enabled
    pub fn compression_enabled(&self) -> bool {
        self.iter().any(|strategy| strategy.is_compressed())
    }

    /// Number of enabled strategies
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Never true; `None` is always present
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Enabled strategies in tie-break priority order
    pub fn iter(&self) -> impl Iterator<Item = Strategy> + '_ {
        Strategy::PRIORITY
            .iter()
            .copied()
            .filter(move |strategy| self.contains(*strategy))
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        Self::single_marker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8() {
        for strategy in Strategy::PRIORITY {
            assert_eq!(Strategy::from_u8(strategy as u8), Some(strategy));
        }
        assert_eq!(Strategy::from_u8(3), None);
    }

    #[test]
    fn test_priority_matches_rank() {
        for (i, strategy) in Strategy::PRIORITY.iter().enumerate() {
            assert_eq!(strategy.tie_rank(), i);
        }
    }

    #[test]
    fn test_none_always_present() {
        assert!(StrategySet::uncompressed().contains(Strategy::None));
        assert!(!StrategySet::uncompressed().compression_enabled());

        let set = StrategySet::from_strategies(&[Strategy::EncodeThenCompress]).unwrap();
        assert!(set.contains(Strategy::None));
        assert!(!set.contains(Strategy::CompressThenEncode));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(
            StrategySet::from_strategies(&[]),
            Err(ConfigError::EmptyStrategySet)
        );
    }

    #[test]
    fn test_iter_in_priority_order() {
        let order: Vec<_> = StrategySet::dual_marker().iter().collect();
        assert_eq!(order, Strategy::PRIORITY.to_vec());

        let order: Vec<_> = StrategySet::single_marker().iter().collect();
        assert_eq!(order, vec![Strategy::CompressThenEncode, Strategy::None]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Strategy::None.to_string(), "none");
        assert_eq!(
            Strategy::EncodeThenCompress.to_string(),
            "encode-then-compress"
        );
    }
}
