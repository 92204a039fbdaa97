//! # Domain Entities
//!
//! Core types for signed-message verification. All values are created per
//! call and hold no cross-call state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a decoded BIP-0137 compact signature (header + R + S).
pub const SIGNATURE_LEN: usize = 65;

/// Compressed SEC1 public key length.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Uncompressed SEC1 public key length.
pub const UNCOMPRESSED_PUBKEY_LEN: usize = 65;

/// Address encoding announced by the signature header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressClass {
    /// Legacy pay-to-pubkey-hash (header 27-34)
    P2pkh,
    /// Nested segwit, P2WPKH wrapped in P2SH (header 35-38)
    P2shP2wpkh,
    /// Native segwit v0 (header 39-42)
    P2wpkh,
    /// Header outside 27-42, carrying the raw byte
    Unknown(u8),
}

impl AddressClass {
    /// Whether this class can only be derived from a compressed key.
    pub fn requires_compressed(self) -> bool {
        matches!(self, Self::P2shP2wpkh | Self::P2wpkh)
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::P2pkh => "p2pkh",
            Self::P2shP2wpkh => "p2sh-p2wpkh",
            Self::P2wpkh => "p2wpkh",
            Self::Unknown(_) => "unknown",
        };
        f.write_str(name)
    }
}

/// A 65-byte signature split into its header fields and scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSignature {
    /// Raw first byte
    pub header: u8,
    /// Recovery id, 0..=3
    pub recovery_id: u8,
    /// Whether the signer's key is serialized compressed
    pub compressed: bool,
    /// Address class implied by the header range
    pub address_class: AddressClass,
    /// R scalar (big-endian)
    pub r: [u8; 32],
    /// S scalar (big-endian)
    pub s: [u8; 32],
}

/// The identity a signed message is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// Bitcoin address string (P2PKH, P2SH-P2WPKH or P2WPKH)
    Address(String),
    /// SEC1 public key bytes, 33 or 65 bytes
    PublicKey(Vec<u8>),
}

/// Caller input for one verification.
///
/// `Claim` makes "exactly one of address or public key" a property of the
/// type rather than a runtime check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessageInput {
    pub claim: Claim,
    pub message: String,
    pub signature_base64: String,
}

impl SignedMessageInput {
    pub fn with_address(
        address: impl Into<String>,
        message: impl Into<String>,
        signature_base64: impl Into<String>,
    ) -> Self {
        Self {
            claim: Claim::Address(address.into()),
            message: message.into(),
            signature_base64: signature_base64.into(),
        }
    }

    pub fn with_public_key(
        public_key: impl Into<Vec<u8>>,
        message: impl Into<String>,
        signature_base64: impl Into<String>,
    ) -> Self {
        Self {
            claim: Claim::PublicKey(public_key.into()),
            message: message.into(),
            signature_base64: signature_base64.into(),
        }
    }
}

/// Why the public-key path fell back to address derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Header byte outside every known range
    UnknownAddressClass,
    /// Supplied key length disagrees with the header's compression flag
    SerializationMismatch,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAddressClass => f.write_str("unknown address class"),
            Self::SerializationMismatch => f.write_str("key serialization mismatch"),
        }
    }
}
