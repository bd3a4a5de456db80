// ghostink CLI - subcommand implementations
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! File-level encode, decode and analyze.
//!
//! Everything here is glue: read a file, call the library, write the
//! result. Output goes to a file when one is given, otherwise to stdout.

use crate::error::{CliError, Result};
use crate::report::EncodeReport;
use ghostink::{Alphabet, CodecConfig, Decoded, Decoder, Encoder, StreamStats};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Encode a file into invisible text
pub fn encode(input: &Path, output: Option<&Path>, config: CodecConfig) -> Result<EncodeReport> {
    let data = fs::read(input).map_err(|e| CliError::io(input, e))?;
    let encoder = Encoder::with_config(config)?;

    let encoded = encoder.encode(&data);
    for strategy in &encoded.failed {
        warn!("{} skipped: compressor failed", strategy);
    }
    info!(
        "Encoded {} ({} bytes) as {}, {} bytes of text",
        input.display(),
        data.len(),
        encoded.strategy,
        encoded.encoded_len()
    );

    write_output(output, encoded.text.as_bytes())?;
    Ok(EncodeReport::from_encoded(&encoded))
}

/// Decode invisible text back to bytes.
///
/// The whole file is one stream (a trailing line break is ignored) and the
/// configured policy sees every character. With `embedded`, the longest
/// stream inside visible cover text is extracted first.
pub fn decode(
    input: &Path,
    output: Option<&Path>,
    config: CodecConfig,
    embedded: bool,
) -> Result<Decoded> {
    let text = read_text(input)?;
    let decoder = Decoder::with_config(config)?;
    let stream = text.trim_end_matches(|c: char| c == '\n' || c == '\r');

    let decoded = if !embedded {
        decoder.decode(stream)?
    } else if stream.is_empty() {
        Decoded::default()
    } else {
        decoder
            .decode_embedded(stream)?
            .ok_or_else(|| CliError::NoStream {
                path: input.to_path_buf(),
            })?
    };

    if decoded.dropped_symbols > 0 {
        warn!(
            "Dropped {} trailing symbols that do not form a byte",
            decoded.dropped_symbols
        );
    }
    info!(
        "Decoded {} bytes from {} ({})",
        decoded.bytes.len(),
        input.display(),
        decoded.strategy
    );

    write_output(output, &decoded.bytes)?;
    Ok(decoded)
}

/// Analyze the composition of a text file
pub fn analyze(input: &Path, alphabet: &Alphabet) -> Result<StreamStats> {
    let text = read_text(input)?;
    let stats = StreamStats::analyze(&text, alphabet);
    debug!("Analyzed {}: {:?}", input.display(), stats);
    Ok(stats)
}

fn read_text(path: &Path) -> Result<String> {
    let raw = fs::read(path).map_err(|e| CliError::io(path, e))?;
    String::from_utf8(raw).map_err(|_| CliError::NotText {
        path: path.to_path_buf(),
    })
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, bytes).map_err(|e| CliError::io(path, e))?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostink::{DecodeError, GhostError, Strategy};
    use tempfile::tempdir;

    #[test]
    fn test_encode_decode_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("notes.md");
        let hidden = dir.path().join("notes.txt");
        let restored = dir.path().join("restored.md");

        let content = "# Notes\n\n- remember the milk\n".repeat(40);
        fs::write(&source, &content).unwrap();

        let report = encode(&source, Some(hidden.as_path()), CodecConfig::default()).unwrap();
        assert_eq!(report.input_bytes, content.len());
        assert_eq!(report.strategy, Strategy::CompressThenEncode.to_string());

        let decoded =
            decode(&hidden, Some(restored.as_path()), CodecConfig::default(), false).unwrap();
        assert_eq!(decoded.strategy, Strategy::CompressThenEncode);
        assert_eq!(fs::read_to_string(&restored).unwrap(), content);
    }

    #[test]
    fn test_decode_from_cover_text() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("secret.bin");
        let hidden = dir.path().join("hidden.txt");
        let letter = dir.path().join("letter.txt");
        let restored = dir.path().join("restored.bin");

        fs::write(&source, [0u8, 1, 2, 254, 255]).unwrap();
        encode(&source, Some(hidden.as_path()), CodecConfig::uncompressed()).unwrap();

        let stream = fs::read_to_string(&hidden).unwrap();
        fs::write(&letter, format!("Dear Sam,{}\nSee you soon.\n", stream)).unwrap();

        decode(&letter, Some(restored.as_path()), CodecConfig::default(), true).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), vec![0u8, 1, 2, 254, 255]);

        let err = decode(&letter, None, CodecConfig::default(), false).unwrap_err();
        assert!(matches!(
            err,
            CliError::Codec(GhostError::Decode(DecodeError::UnrecognizedCharacter { offset: 0, .. }))
        ));
    }

    #[test]
    fn test_decode_policy_applies_to_file() {
        let dir = tempdir().unwrap();
        let noisy = dir.path().join("noisy.txt");
        let out = dir.path().join("out.bin");
        let mut text = String::from("x");
        text.extend(std::iter::repeat('\u{200C}').take(7));
        text.push('\n');
        fs::write(&noisy, &text).unwrap();

        let err = decode(&noisy, Some(out.as_path()), CodecConfig::default(), false).unwrap_err();
        assert!(matches!(
            err,
            CliError::Codec(GhostError::Decode(DecodeError::UnrecognizedCharacter { offset: 0, .. }))
        ));

        let decoded =
            decode(&noisy, Some(out.as_path()), CodecConfig::default().lenient(), false).unwrap();
        assert_eq!(decoded.bytes, vec![0x7F]);
        assert_eq!(fs::read(&out).unwrap(), vec![0x7F]);
    }

    #[test]
    fn test_decode_dual_marker_stream() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("log.txt");
        let hidden = dir.path().join("log.hidden");
        let restored = dir.path().join("log.out");
        let content = "GET /index.html 200\n".repeat(300);
        fs::write(&source, &content).unwrap();

        let report = encode(&source, Some(hidden.as_path()), CodecConfig::dual_marker()).unwrap();
        assert_eq!(report.candidates.len(), 3);

        decode(&hidden, Some(restored.as_path()), CodecConfig::dual_marker(), false).unwrap();
        assert_eq!(fs::read_to_string(&restored).unwrap(), content);
    }

    #[test]
    fn test_decode_plain_text_has_no_stream() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        fs::write(&plain, "nothing hidden").unwrap();

        let out = dir.path().join("out");
        let err = decode(&plain, Some(out.as_path()), CodecConfig::default(), true).unwrap_err();
        assert!(matches!(err, CliError::NoStream { .. }));
    }

    #[test]
    fn test_decode_empty_file() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.txt");
        let out = dir.path().join("out.bin");
        fs::write(&empty, "").unwrap();

        for embedded in [false, true] {
            let decoded = decode(&empty, Some(out.as_path()), CodecConfig::default(), embedded).unwrap();
            assert!(decoded.bytes.is_empty());
            assert!(fs::read(&out).unwrap().is_empty());
        }
    }

    #[test]
    fn test_decode_binary_is_not_text() {
        let dir = tempdir().unwrap();
        let binary = dir.path().join("blob.bin");
        fs::write(&binary, [0xFF, 0xFE, 0x00]).unwrap();

        let err = decode(&binary, None, CodecConfig::default(), false).unwrap_err();
        assert!(matches!(err, CliError::NotText { .. }));
    }

    #[test]
    fn test_bad_level_is_codec_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "a").unwrap();

        let err = encode(&source, None, CodecConfig::default().with_level(0)).unwrap_err();
        assert!(matches!(err, CliError::Codec(GhostError::Config(_))));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let err = analyze(&dir.path().join("missing.txt"), &Alphabet::DEFAULT).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_analyze_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("data.bin");
        let hidden = dir.path().join("data.txt");
        fs::write(&source, [42u8; 16]).unwrap();
        encode(&source, Some(hidden.as_path()), CodecConfig::uncompressed()).unwrap();

        let stats = analyze(&hidden, &Alphabet::DEFAULT).unwrap();
        assert_eq!(stats.payload_bytes, 16);
        assert!(stats.is_pure());
    }
}
