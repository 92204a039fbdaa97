//! # Public Key Recovery (secp256k1)
//!
//! Pure domain logic for recovering the signer's public key from a compact
//! signature and message hash.
//!
//! ## Security Notes
//!
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Range checks use `subtle`
//! - **High-S Signatures**: accepted, normalized to low-S with the recovery
//!   parity flipped, since both forms identify the same public key
//! - Uses k256 crate for cryptographic operations

use super::entities::{COMPRESSED_PUBKEY_LEN, UNCOMPRESSED_PUBKEY_LEN};
use super::errors::VerifyError;
use super::message::MessageHash;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub(crate) const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

// =============================================================================
// RECOVERED KEY
// =============================================================================

/// A recovered public key together with the serialization form the
/// signature header asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredKey {
    pub key: VerifyingKey,
    pub compressed: bool,
}

impl RecoveredKey {
    /// SEC1 bytes in the header's form (33 or 65 bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_public_key(&self.key, self.compressed)
    }
}

// =============================================================================
// CORE RECOVERY
// =============================================================================

/// Recover the signing public key.
///
/// Fails with `RecoveryFailure` when R or S is outside [1, n-1], when the
/// recovery id is not 0..=3, or when no curve point is consistent with the
/// signature for the given recovery id.
pub fn recover(
    message_hash: &MessageHash,
    recovery_id: u8,
    r: &[u8; 32],
    s: &[u8; 32],
    compressed: bool,
) -> Result<RecoveredKey, VerifyError> {
    if !is_valid_scalar(r) || !is_valid_scalar(s) {
        return Err(VerifyError::RecoveryFailure);
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| VerifyError::RecoveryFailure)?;

    // k256 only verifies low-S; negating S mirrors R, so flip the y parity.
    let (sig, recovery_id) = match sig.normalize_s() {
        Some(low) => (low, recovery_id ^ 1),
        None => (sig, recovery_id),
    };

    let recovery_id = RecoveryId::from_byte(recovery_id).ok_or(VerifyError::RecoveryFailure)?;

    let key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| VerifyError::RecoveryFailure)?;

    Ok(RecoveredKey { key, compressed })
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// SEC1 serialization of a public key.
pub fn serialize_public_key(key: &VerifyingKey, compressed: bool) -> Vec<u8> {
    key.to_encoded_point(compressed).as_bytes().to_vec()
}

/// Parse a caller-supplied SEC1 public key (33 or 65 bytes).
pub fn parse_public_key(bytes: &[u8]) -> Result<VerifyingKey, VerifyError> {
    if bytes.is_empty() {
        return Err(VerifyError::EmptyPublicKey);
    }
    if bytes.len() != COMPRESSED_PUBKEY_LEN && bytes.len() != UNCOMPRESSED_PUBKEY_LEN {
        return Err(VerifyError::InvalidPublicKey);
    }
    VerifyingKey::from_sec1_bytes(bytes).map_err(|_| VerifyError::InvalidPublicKey)
}

/// Whether a big-endian R or S taken from bytes 1..65 of the compact
/// signature lies in [1, n-1]. Compared in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (s_byte, n_byte) in scalar.iter().zip(SECP256K1_ORDER.iter()) {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < n_byte) as u8);
        let byte_greater = Choice::from((s_byte > n_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

// =============================================================================
// UNIT TESTS
// =============================================================================
