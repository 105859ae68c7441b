//! Hex Codec
//!
//! Strict ASCII-hex ⇄ raw byte transcoding for payloads crossing the CLI
//! boundary of the ground-station FEC link.
//!
//! Each byte is written as two hex digits, most significant nibble first:
//!
//! ```text
//! "6361747321"  <->  [0x63, 0x61, 0x74, 0x73, 0x21]  ("cats!")
//! ```
//!
//! Decoding accepts `0-9`, `a-f` and `A-F`; encoding always emits lowercase.
//! Validation runs over the whole input before any byte is produced, so a
//! failed decode never leaves partial output behind.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("hex string has odd length {len}")]
    OddLength { len: usize },
    #[error("invalid hex character {ch:?} at index {index}")]
    InvalidChar { ch: char, index: usize },
    #[error("output buffer holds {actual} bytes, decoded data needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Number of raw bytes a hex string of `hex_len` characters decodes to.
pub fn decoded_len(hex_len: usize) -> Result<usize> {
    if hex_len % 2 != 0 {
        return Err(ParseError::OddLength { len: hex_len });
    }
    Ok(hex_len / 2)
}

/// Number of hex characters `raw_len` bytes encode to.
pub fn encoded_len(raw_len: usize) -> usize {
    raw_len * 2
}

/// Check length parity and alphabet without decoding.
///
/// Returns the decoded length on success. Indexes in errors are byte
/// offsets into `input`.
pub fn validate(input: &str) -> Result<usize> {
    let len = decoded_len(input.len())?;
    if let Some((index, ch)) = input.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidChar { ch, index });
    }
    Ok(len)
}

/// Decode a hex string into a freshly allocated buffer.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let mut raw = vec![0u8; validate(input)?];
    transcode(input, &mut raw)?;
    Ok(raw)
}

/// Decode a hex string into a caller-owned buffer of exactly `input.len() / 2`
/// bytes. `out` is left untouched when validation fails.
pub fn decode_hex_into(input: &str, out: &mut [u8]) -> Result<()> {
    let expected = validate(input)?;
    if out.len() != expected {
        return Err(ParseError::BufferSize {
            expected,
            actual: out.len(),
        });
    }
    transcode(input, out)
}

/// Encode raw bytes as lowercase hex. Never fails.
pub fn encode_hex(input: &[u8]) -> String {
    hex::encode(input)
}

// Input is already validated; errors here only surface if the two checks
// ever disagree.
fn transcode(input: &str, out: &mut [u8]) -> Result<()> {
    hex::decode_to_slice(input, out).map_err(|err| match err {
        hex::FromHexError::OddLength => ParseError::OddLength { len: input.len() },
        hex::FromHexError::InvalidHexCharacter { c, index } => ParseError::InvalidChar {
            ch: input.get(index..).and_then(|s| s.chars().next()).unwrap_or(c),
            index,
        },
        _ => ParseError::BufferSize {
            expected: input.len() / 2,
            actual: out.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_cats() {
        assert_eq!(decode_hex("6361747321").unwrap(), b"cats!".to_vec());
    }

    #[test]
    fn test_encode_cats_are_cool() {
        let hex = encode_hex(b"cats are cool");
        assert_eq!(hex, "636174732061726520636f6f6c");
        assert_eq!(decode_hex(&hex).unwrap(), b"cats are cool".to_vec());
    }

    #[test]
    fn test_nibble_order() {
        assert_eq!(decode_hex("f0").unwrap(), vec![0xf0]);
        assert_eq!(decode_hex("0f").unwrap(), vec![0x0f]);
        assert_eq!(encode_hex(&[0xab, 0x01]), "ab01");
    }

    #[test]
    fn test_empty() {
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(encode_hex(&[]), "");
    }

    #[test]
    fn test_odd_length() {
        assert_eq!(decode_hex("abc"), Err(ParseError::OddLength { len: 3 }));
    }

    #[test]
    fn test_invalid_char_reports_first_offender() {
        assert_eq!(
            decode_hex("00zz"),
            Err(ParseError::InvalidChar { ch: 'z', index: 2 })
        );
        assert_eq!(
            decode_hex("0g"),
            Err(ParseError::InvalidChar { ch: 'g', index: 1 })
        );
    }

    #[test]
    fn test_odd_length_wins_over_bad_char() {
        assert_eq!(decode_hex("xyz"), Err(ParseError::OddLength { len: 3 }));
    }

    #[test]
    fn test_non_ascii_char() {
        // 'é' is two bytes, so "0é0" is 4 bytes long
        assert_eq!(
            decode_hex("0é0"),
            Err(ParseError::InvalidChar { ch: 'é', index: 1 })
        );
    }

    #[test]
    fn test_uppercase_folds_to_lowercase() {
        let raw = decode_hex("DEADbeef").unwrap();
        assert_eq!(raw, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(encode_hex(&raw), "deadbeef");
    }

    #[test]
    fn test_decode_into_sized_buffer() {
        let mut out = [0u8; 2];
        decode_hex_into("beef", &mut out).unwrap();
        assert_eq!(out, [0xbe, 0xef]);
    }

    #[test]
    fn test_decode_into_wrong_size() {
        let mut out = [0u8; 3];
        assert_eq!(
            decode_hex_into("beef", &mut out),
            Err(ParseError::BufferSize {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_decode_into_is_atomic() {
        let mut out = [0x55u8; 3];
        assert!(decode_hex_into("aabbz0", &mut out).is_err());
        assert_eq!(out, [0x55; 3]);
    }

    #[test]
    fn test_size_helpers() {
        assert_eq!(decoded_len(10), Ok(5));
        assert_eq!(decoded_len(7), Err(ParseError::OddLength { len: 7 }));
        assert_eq!(encoded_len(5), 10);
    }

    #[test]
    fn test_every_byte_value_as_character() {
        for b in 0u8..=255 {
            let ch = char::from(b);
            let single = ch.to_string();
            let doubled = format!("{ch}{ch}");

            // A lone character never decodes: ASCII is odd length, anything
            // wider than one byte is not a hex digit.
            assert!(decode_hex(&single).is_err(), "byte {b:#04x}");

            let result = decode_hex(&doubled);
            if ch.is_ascii_hexdigit() {
                let nibble = ch.to_digit(16).unwrap() as u8;
                assert_eq!(result, Ok(vec![nibble << 4 | nibble]), "byte {b:#04x}");
            } else if b.is_ascii() {
                assert_eq!(
                    result,
                    Err(ParseError::InvalidChar { ch, index: 0 }),
                    "byte {b:#04x}"
                );
            } else {
                assert!(
                    matches!(result, Err(ParseError::InvalidChar { index: 0, .. })),
                    "byte {b:#04x}"
                );
            }
        }
    }
}
