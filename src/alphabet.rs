//! Symbol and marker tables
//!
//! An [`Alphabet`] binds two zero-width code points to the bit values 0 and
//! 1, and one reserved code point to each compressed [`Strategy`]. All four
//! are mutually disjoint. The table is immutable once built; the default is
//! a `const`.

use crate::error::ConfigError;
use crate::strategy::Strategy;

/// U+200B ZERO WIDTH SPACE
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
/// U+200C ZERO WIDTH NON-JOINER
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
/// U+200D ZERO WIDTH JOINER
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
/// U+2060 WORD JOINER
pub const WORD_JOINER: char = '\u{2060}';

/// Data symbols and strategy markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    zero: char,
    one: char,
    compress_then_encode: char,
    encode_then_compress: char,
}

impl Alphabet {
    /// ZWSP = 0, ZWNJ = 1, ZWJ = compress-then-encode,
    /// WORD JOINER = encode-then-compress
    pub const DEFAULT: Alphabet = Alphabet {
        zero: ZERO_WIDTH_SPACE,
        one: ZERO_WIDTH_NON_JOINER,
        compress_then_encode: ZERO_WIDTH_JOINER,
        encode_then_compress: WORD_JOINER,
    };

    /// Build a custom alphabet, rejecting overlaps and visible code points
    pub fn new(
        zero: char,
        one: char,
        compress_then_encode: char,
        encode_then_compress: char,
    ) -> Result<Self, ConfigError> {
        let slots = [zero, one, compress_then_encode, encode_then_compress];
        for (i, &c) in slots.iter().enumerate() {
            if !is_zero_width(c) {
                return Err(ConfigError::VisibleCodePoint(c));
            }
            if slots[..i].contains(&c) {
                return Err(ConfigError::DuplicateCodePoint(c));
            }
        }
        Ok(Self {
            zero,
            one,
            compress_then_encode,
            encode_then_compress,
        })
    }

    /// Symbol for a bit value
    #[inline]
    pub fn symbol(&self, bit: bool) -> char {
        if bit {
            self.one
        } else {
            self.zero
        }
    }

    /// Bit value of a data symbol, `None` for anything else
    #[inline]
    pub fn bit(&self, c: char) -> Option<bool> {
        if c == self.zero {
            Some(false)
        } else if c == self.one {
            Some(true)
        } else {
            None
        }
    }

    /// Marker announcing a strategy; `None` has no marker
    pub fn marker(&self, strategy: Strategy) -> Option<char> {
        match strategy {
            Strategy::None => None,
            Strategy::CompressThenEncode => Some(self.compress_then_encode),
            Strategy::EncodeThenCompress => Some(self.encode_then_compress),
        }
    }

    /// Strategy announced by a marker character
    pub fn strategy_for(&self, c: char) -> Option<Strategy> {
        if c == self.compress_then_encode {
            Some(Strategy::CompressThenEncode)
        } else if c == self.encode_then_compress {
            Some(Strategy::EncodeThenCompress)
        } else {
            None
        }
    }

    /// Whether `c` is a data symbol
    #[inline]
    pub fn is_symbol(&self, c: char) -> bool {
        c == self.zero || c == self.one
    }

    /// Whether `c` is a data symbol or a marker
    pub fn contains(&self, c: char) -> bool {
        self.is_symbol(c) || self.strategy_for(c).is_some()
    }

    /// UTF-8 width of the widest data symbol
    pub fn max_symbol_len(&self) -> usize {
        self.zero.len_utf8().max(self.one.len_utf8())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Zero-width format characters accepted in an alphabet
pub fn is_zero_width(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{180E}' | '\u{FEFF}'
    )
}
