//! Utility functions for the key management core
//!
//! Hex/base64 helpers and the constant-time comparison used for MAC checks.

use crate::shared::error::KeyResult;
use base64::Engine;

/// Decode hex text, tolerating a leading `0x`
pub fn decode_hex(text: &str) -> KeyResult<Vec<u8>> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(stripped)?)
}

/// Lower-case hex without prefix
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn decode_base64(text: &str) -> KeyResult<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(text)?)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Compare two byte slices without an early exit on the first difference.
///
/// Only the length check short-circuits; lengths are public.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_prefix() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode_hex("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_base64_round_trip() {
        let encoded = encode_base64(b"ledger");
        assert_eq!(decode_base64(&encoded).unwrap(), b"ledger");
        assert!(decode_base64("!!!").is_err());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
