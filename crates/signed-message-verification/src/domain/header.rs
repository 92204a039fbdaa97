//! # Header Classification
//!
//! Splits a decoded BIP-0137 signature into header fields and scalars.
//!
//! | Header  | Class       | Key          |
//! |---------|-------------|--------------|
//! | 27-30   | P2PKH       | uncompressed |
//! | 31-34   | P2PKH       | compressed   |
//! | 35-38   | P2SH-P2WPKH | compressed   |
//! | 39-42   | P2WPKH      | compressed   |
//!
//! Bytes outside 27-42 classify as `Unknown`. That is not an error here;
//! later stages decide whether an unknown class is fatal.

use super::entities::{AddressClass, DecodedSignature, SIGNATURE_LEN};
use super::errors::VerifyError;

/// Lowest valid header byte.
pub const HEADER_BASE: u8 = 27;

/// Decode a 65-byte compact signature.
pub fn classify(signature: &[u8]) -> Result<DecodedSignature, VerifyError> {
    if signature.is_empty() {
        return Err(VerifyError::EmptySignature);
    }
    if signature.len() != SIGNATURE_LEN {
        return Err(VerifyError::MalformedSignature {
            len: signature.len(),
        });
    }

    let header = signature[0];
    let (address_class, compressed) = classify_header(header);

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature[1..33]);
    s.copy_from_slice(&signature[33..65]);

    Ok(DecodedSignature {
        header,
        recovery_id: recovery_id(header),
        compressed,
        address_class,
        r,
        s,
    })
}

/// Map a header byte to its address class and compression flag.
pub fn classify_header(header: u8) -> (AddressClass, bool) {
    match header {
        27..=30 => (AddressClass::P2pkh, false),
        31..=34 => (AddressClass::P2pkh, true),
        35..=38 => (AddressClass::P2shP2wpkh, true),
        39..=42 => (AddressClass::P2wpkh, true),
        other => (AddressClass::Unknown(other), false),
    }
}

/// Recovery id, counted from the start of the header range.
///
/// Wrapping keeps bytes below 27 well defined; they classify as `Unknown`
/// anyway.
pub fn recovery_id(header: u8) -> u8 {
    header.wrapping_sub(HEADER_BASE) & 0x03
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature_with_header(header: u8) -> Vec<u8> {
        let mut sig = vec![0x11u8; SIGNATURE_LEN];
        sig[0] = header;
        sig
    }

    #[test]
    fn test_header_ranges() {
        for h in 27..=30 {
            assert_eq!(classify_header(h), (AddressClass::P2pkh, false));
        }
        for h in 31..=34 {
            assert_eq!(classify_header(h), (AddressClass::P2pkh, true));
        }
        for h in 35..=38 {
            assert_eq!(classify_header(h), (AddressClass::P2shP2wpkh, true));
        }
        for h in 39..=42 {
            assert_eq!(classify_header(h), (AddressClass::P2wpkh, true));
        }
    }

    #[test]
    fn test_out_of_range_header_is_unknown_not_error() {
        for h in [0u8, 26, 43, 101, 255] {
            let decoded = classify(&signature_with_header(h)).unwrap();
            assert_eq!(decoded.address_class, AddressClass::Unknown(h));
            assert_eq!(decoded.header, h);
        }
    }

    #[test]
    fn test_recovery_id_cycles_within_each_range() {
        for base in [27u8, 31, 35, 39] {
            for offset in 0..4 {
                assert_eq!(recovery_id(base + offset), offset);
            }
        }
        assert!(recovery_id(0) <= 3);
        assert!(recovery_id(255) <= 3);
    }

    #[test]
    fn test_scalars_split_at_fixed_offsets() {
        let mut sig = vec![0u8; SIGNATURE_LEN];
        sig[0] = 31;
        sig[1..33].fill(0xAA);
        sig[33..].fill(0xBB);

        let decoded = classify(&sig).unwrap();
        assert_eq!(decoded.r, [0xAA; 32]);
        assert_eq!(decoded.s, [0xBB; 32]);
        assert!(decoded.compressed);
        assert_eq!(decoded.recovery_id, 0);
    }

    #[test]
    fn test_empty_signature() {
        assert_eq!(classify(&[]), Err(VerifyError::EmptySignature));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            classify(&[31u8; 64]),
            Err(VerifyError::MalformedSignature { len: 64 })
        );
        assert_eq!(
            classify(&[31u8; 66]),
            Err(VerifyError::MalformedSignature { len: 66 })
        );
    }
}
