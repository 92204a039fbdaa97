//! Shared fixtures for integration tests.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use k256::ecdsa::SigningKey;

pub use signed_message_verification::test_utils::{header_base, sign_message, sign_raw};

/// Real-world P2PKH vector (header 32, compressed key).
pub const VECTOR_ADDRESS: &str = "194vDb9xwY6XQi5bLa7FRPBewJdUqympZ9";
pub const VECTOR_MESSAGE: &str = "Hello, Bitcoin testing!";
pub const VECTOR_SIGNATURE: &str =
    "IOeVH/0KqgmS3XKwqCJiwlcHonwxKMQN6fbOW5UsXSDZB4EGCVTXx6c+ZU/Ae5qO94MSBZn2aPOiUsupRIwBaAU=";
pub const VECTOR_PUBKEY: &str =
    "034fafbb0673368ea3dcc7003a753c51bf240471c3a1b811491ba9f3480091e23c";

/// Second P2PKH vector published alongside its public key.
pub const PUBKEY_VECTOR_ADDRESS: &str = "1C9YVXK12TBeDMJEFFMuTZMHMQgcRAuR1E";
pub const PUBKEY_VECTOR_PUBKEY: &str =
    "036cb4bc04b262a3a5b5815b4524ce058ecfb6148a26555fbc0eb1b722093c01d1";
pub const PUBKEY_VECTOR_SIGNATURE: &str =
    "IJNFSGvr6aaXsWFHQNJmWL9Jq6t/4IRdIzst8X4Af90JY7C0rStfn1NLgnQt8xWGSxouz5y/G7KWL8dKmt+FpME=";
/// Same signature with the header byte corrupted to 0x65
pub const PUBKEY_VECTOR_CORRUPT_HEADER: &str =
    "ZZNFSGvr6aaXsWFHQNJmWL9Jq6t/4IRdIzst8X4Af90JY7C0rStfn1NLgnQt8xWGSxouz5y/G7KWL8dKmt+FpME=";

/// Fixed key used for per-class signatures.
pub const FIXED_SECRET: &str = "2f5e8a3c1b7d4e6f90a1b2c3d4e5f60718293a4b5c6d7e8f9012a3b4c5d6e7f8";
pub const FIXED_MESSAGE: &str = "Proof of reserves: 2026-10-16";

pub fn fixed_key() -> SigningKey {
    SigningKey::from_slice(&hex::decode(FIXED_SECRET).unwrap()).unwrap()
}

pub fn encode(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

pub fn decode(signature: &str) -> Vec<u8> {
    STANDARD.decode(signature).unwrap()
}
