//! Marker framing
//!
//! A compressed stream starts with exactly one marker character naming its
//! strategy. An uncompressed stream starts directly with data symbols.

use crate::alphabet::Alphabet;
use crate::strategy::Strategy;

/// Split a stream into its strategy and data region.
///
/// Looks only at the first character. Anything that is not a known marker
/// (including an empty stream) means [`Strategy::None`] with the stream
/// returned untouched.
pub fn strip_marker<'a>(stream: &'a str, alphabet: &Alphabet) -> (Strategy, &'a str) {
    let mut chars = stream.chars();
    match chars.next().and_then(|c| alphabet.strategy_for(c)) {
        Some(strategy) => (strategy, chars.as_str()),
        None => (Strategy::None, stream),
    }
}

/// Prepend the marker for `strategy`; no-op for [`Strategy::None`].
pub fn apply_marker(strategy: Strategy, mut stream: String, alphabet: &Alphabet) -> String {
    if let Some(marker) = alphabet.marker(strategy) {
        stream.insert(0, marker);
    }
    stream
}

/// Find an encoded stream inside surrounding text.
///
/// A candidate run is an optional marker followed by data symbols, ended by
/// any other character. The longest run wins (the earliest, on equal
/// length) so that a stray zero-width character in the cover text is not
/// mistaken for the payload. Returns `None` when the text holds no symbol
/// or marker at all.
pub fn locate<'a>(text: &'a str, alphabet: &Alphabet) -> Option<&'a str> {
    let mut best: Option<(usize, usize, usize)> = None; // (start, end, chars)
    let mut run: Option<(usize, usize)> = None; // (start, chars)

    for (i, c) in text.char_indices() {
        if alphabet.is_symbol(c) {
            match run.as_mut() {
                Some((_, count)) => *count += 1,
                None => run = Some((i, 1)),
            }
            continue;
        }

        if let Some((start, count)) = run.take() {
            keep_longest(&mut best, start, i, count);
        }
        if alphabet.strategy_for(c).is_some() {
            run = Some((i, 1));
        }
    }
    if let Some((start, count)) = run {
        keep_longest(&mut best, start, text.len(), count);
    }

    best.map(|(start, end, _)| &text[start..end])
}

fn keep_longest(best: &mut Option<(usize, usize, usize)>, start: usize, end: usize, count: usize) {
    match best {
        Some((_, _, longest)) if *longest >= count => {}
        _ => *best = Some((start, end, count)),
    }
}
