//! # Message Canonicalization
//!
//! Builds the byte sequence Bitcoin signs for a text message and hashes it:
//!
//! ```text
//! compact_size(24) || "Bitcoin Signed Message:\n" || compact_size(len) || message
//! ```
//!
//! The digest is SHA-256 applied twice. `len` is the UTF-8 byte length.

use sha2::{Digest, Sha256};

/// Prefix every signed message is bound to.
pub const MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";

/// 32-byte digest fed to key recovery.
pub type MessageHash = [u8; 32];

/// Append `value` in Bitcoin compact-size form.
pub fn write_compact_size(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xFC => out.push(value as u8),
        0xFD..=0xFFFF => {
            out.push(0xFD);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(0xFE);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xFF);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Compact-size encoding of `value` as a fresh buffer.
pub fn compact_size(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    write_compact_size(&mut out, value);
    out
}

/// The exact pre-image that gets double hashed.
pub fn canonical_bytes(message: &str) -> Vec<u8> {
    let magic = MESSAGE_MAGIC.as_bytes();
    let body = message.as_bytes();

    let mut out = Vec::with_capacity(1 + magic.len() + 9 + body.len());
    write_compact_size(&mut out, magic.len() as u64);
    out.extend_from_slice(magic);
    write_compact_size(&mut out, body.len() as u64);
    out.extend_from_slice(body);
    out
}

/// SHA-256(SHA-256(data)).
pub fn double_sha256(data: &[u8]) -> MessageHash {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Hash a text message the way BIP-0137 signers do.
pub fn canonicalize(message: &str) -> MessageHash {
    double_sha256(&canonical_bytes(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compact_size_boundaries() {
        assert_eq!(compact_size(0), vec![0x00]);
        assert_eq!(compact_size(0xFC), vec![0xFC]);
        assert_eq!(compact_size(0xFD), vec![0xFD, 0xFD, 0x00]);
        assert_eq!(compact_size(0xFFFF), vec![0xFD, 0xFF, 0xFF]);
        assert_eq!(compact_size(0x1_0000), vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            compact_size(0xFFFF_FFFF),
            vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            compact_size(0x1_0000_0000),
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_canonical_bytes_layout() {
        let bytes = canonical_bytes("abc");
        assert_eq!(bytes[0], 24);
        assert_eq!(&bytes[1..25], MESSAGE_MAGIC.as_bytes());
        assert_eq!(bytes[25], 3);
        assert_eq!(&bytes[26..], b"abc");
    }

    #[test]
    fn test_length_prefix_counts_utf8_bytes() {
        // 9 code points, 17 bytes
        let message = "héllo ✓ 世界";
        assert_eq!(message.chars().count(), 9);
        let bytes = canonical_bytes(message);
        assert_eq!(bytes[25], 17);
    }

    #[test]
    fn test_long_message_uses_two_byte_length() {
        let message = "a".repeat(300);
        let bytes = canonical_bytes(&message);
        assert_eq!(&bytes[25..28], &[0xFD, 0x2C, 0x01]);
        assert_eq!(bytes.len(), 28 + 300);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hex::encode(canonicalize("Hello, Bitcoin testing!")),
            "42008cb52f298298eecc961e1a5fc4544897bc92096e150badff2a4eb0684a54"
        );
        assert_eq!(
            hex::encode(canonicalize("")),
            "80e795d4a4caadd7047af389d9f7f220562feb6196032e2131e10563352c4bcc"
        );
    }

    #[test]
    fn test_digest_is_not_raw_message() {
        let message = "Hello, Bitcoin testing!";
        assert_ne!(&canonicalize(message)[..], &Sha256::digest(message)[..]);
    }

    proptest! {
        #[test]
        fn prop_compact_size_width_matches_marker(value in any::<u64>()) {
            let encoded = compact_size(value);
            let expected_len = match encoded[0] {
                0xFD => 3,
                0xFE => 5,
                0xFF => 9,
                _ => 1,
            };
            prop_assert_eq!(encoded.len(), expected_len);
        }

        #[test]
        fn prop_compact_size_preserves_value(value in any::<u64>()) {
            let encoded = compact_size(value);
            let decoded = match encoded[0] {
                0xFD => u16::from_le_bytes([encoded[1], encoded[2]]) as u64,
                0xFE => u32::from_le_bytes([encoded[1], encoded[2], encoded[3], encoded[4]]) as u64,
                0xFF => {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(&encoded[1..9]);
                    u64::from_le_bytes(buf)
                }
                b => b as u64,
            };
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn prop_canonicalize_deterministic(message in ".*") {
            prop_assert_eq!(canonicalize(&message), canonicalize(&message));
        }
    }
}
