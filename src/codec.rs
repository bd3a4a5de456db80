//! Bit codec
//!
//! Converts bytes to a sequence of data symbols (8 per byte, most
//! significant bit first) and back. Markers are handled by
//! [`crate::framing`]; [`decode`] strips one before reading the data
//! region.

use crate::alphabet::Alphabet;
use crate::error::DecodeError;
use crate::framing;
use crate::strategy::Strategy;

/// Symbols per byte
pub const SYMBOLS_PER_BYTE: usize = 8;

/// Handling of characters that are neither data symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Fail with [`DecodeError::UnrecognizedCharacter`]
    #[default]
    Strict,
    /// Read the character as bit 0
    Lenient,
}

/// Output of the data-region decoder
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitDecode {
    /// Reassembled bytes
    pub bytes: Vec<u8>,
    /// Symbols in the trailing partial group, discarded
    pub dropped_symbols: usize,
}

/// Encode bytes as data symbols. Never fails; empty in, empty out.
pub fn encode(bytes: &[u8], alphabet: &Alphabet) -> String {
    let mut out = String::with_capacity(bytes.len() * SYMBOLS_PER_BYTE * alphabet.max_symbol_len());
    for &byte in bytes {
        for shift in (0..SYMBOLS_PER_BYTE).rev() {
            out.push(alphabet.symbol((byte >> shift) & 1 == 1));
        }
    }
    out
}

/// Decode a data region (no marker).
///
/// `base_offset` is added to character offsets in errors so that they point
/// into the caller's full stream. A trailing group of fewer than 8 symbols
/// contributes no byte and is counted in [`BitDecode::dropped_symbols`].
pub fn decode_symbols(
    data: &str,
    alphabet: &Alphabet,
    policy: DecodePolicy,
    base_offset: usize,
) -> Result<BitDecode, DecodeError> {
    let mut bytes = Vec::with_capacity(data.len() / (SYMBOLS_PER_BYTE * alphabet.max_symbol_len()));
    let mut current: u8 = 0;
    let mut filled = 0;

    for (i, c) in data.chars().enumerate() {
        let bit = match alphabet.bit(c) {
            Some(bit) => bit,
            None => match policy {
                DecodePolicy::Strict => {
                    return Err(DecodeError::UnrecognizedCharacter {
                        offset: base_offset + i,
                        character: c,
                    })
                }
                DecodePolicy::Lenient => false,
            },
        };

        current = (current << 1) | bit as u8;
        filled += 1;
        if filled == SYMBOLS_PER_BYTE {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }

    if filled > 0 {
        crate::ghost_log!(
            debug,
            "dropping {} trailing symbols that do not form a byte",
            filled
        );
    }

    Ok(BitDecode {
        bytes,
        dropped_symbols: filled,
    })
}

/// Decode a stream: detect and strip the leading marker, then decode the
/// data region. Returns the bytes and the strategy the marker announced
/// (`Strategy::None` when there is no recognized marker). Compressed
/// payloads are returned still compressed; see [`crate::Decoder`] for the
/// full inverse.
pub fn decode(
    stream: &str,
    alphabet: &Alphabet,
    policy: DecodePolicy,
) -> Result<(Vec<u8>, Strategy), DecodeError> {
    let (strategy, data) = framing::strip_marker(stream, alphabet);
    let offset = usize::from(strategy != Strategy::None);
    let decoded = decode_symbols(data, alphabet, policy, offset)?;
    Ok((decoded.bytes, strategy))
}
