//! Test utilities for signed-message verification.
//!
//! A BIP-0137 signer shared by the unit tests, the integration tests and
//! downstream crates. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use signed_message_verification::test_utils::{generate_key, sign_message};
//! use signed_message_verification::{AddressClass, verify_by_public_key, NetworkParams};
//!
//! let key = generate_key();
//! let sig = sign_message(&key, "hello", AddressClass::P2pkh, true);
//! let pubkey = key.verifying_key().to_encoded_point(true);
//! assert_eq!(
//!     verify_by_public_key(pubkey.as_bytes(), "hello", &sig, &NetworkParams::mainnet()),
//!     Ok(true)
//! );
//! ```

use crate::domain::ecdsa::SECP256K1_ORDER;
use crate::domain::entities::{AddressClass, SIGNATURE_LEN};
use crate::domain::header::HEADER_BASE;
use crate::domain::message::canonicalize;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use k256::ecdsa::SigningKey;

/// Generate a new random signing key.
pub fn generate_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

/// First header byte of the range for a class and compression flag.
///
/// # Panics
///
/// On `AddressClass::Unknown`, which has no signing range.
pub fn header_base(class: AddressClass, compressed: bool) -> u8 {
    match (class, compressed) {
        (AddressClass::P2pkh, false) => HEADER_BASE,
        (AddressClass::P2pkh, true) => HEADER_BASE + 4,
        (AddressClass::P2shP2wpkh, _) => HEADER_BASE + 8,
        (AddressClass::P2wpkh, _) => HEADER_BASE + 12,
        (AddressClass::Unknown(header), _) => {
            panic!("cannot sign for unknown header {header}")
        }
    }
}

/// Produce a raw 65-byte signature the way BIP-0137 wallets do.
pub fn sign_raw(
    key: &SigningKey,
    message: &str,
    class: AddressClass,
    compressed: bool,
) -> [u8; SIGNATURE_LEN] {
    let hash = canonicalize(message);
    let (sig, recid) = key
        .sign_prehash_recoverable(&hash)
        .expect("signing failed");

    let mut out = [0u8; SIGNATURE_LEN];
    out[0] = header_base(class, compressed) + recid.to_byte();
    out[1..].copy_from_slice(&sig.to_bytes());
    out
}

/// Produce a base64 BIP-0137 signature.
pub fn sign_message(
    key: &SigningKey,
    message: &str,
    class: AddressClass,
    compressed: bool,
) -> String {
    STANDARD.encode(sign_raw(key, message, class, compressed))
}

/// Negate S modulo n.
pub fn negate_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i16 = 0;
    for i in (0..32).rev() {
        let diff = SECP256K1_ORDER[i] as i16 - s[i] as i16 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
