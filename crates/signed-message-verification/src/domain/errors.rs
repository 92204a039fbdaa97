//! # Verification Errors
//!
//! Error types for signed-message verification.
//!
//! Structural and input errors short-circuit before any address or key
//! comparison. A mismatch between the claim and the recovered signer is
//! never an error; it is reported as `Ok(false)`.

use thiserror::Error;

/// Errors that can occur while verifying a signed message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Address claim was empty
    #[error("address cannot be empty")]
    EmptyAddress,

    /// Message was empty
    #[error("message cannot be empty")]
    EmptyMessage,

    /// Signature was empty (before or after base64 decoding)
    #[error("signature cannot be empty")]
    EmptySignature,

    /// Public key claim was empty
    #[error("public key cannot be empty")]
    EmptyPublicKey,

    /// Public key claim is not a valid SEC1 secp256k1 point
    #[error("invalid public key encoding")]
    InvalidPublicKey,

    /// Signature is not valid standard base64
    #[error("invalid base64 signature encoding: {0}")]
    InvalidEncoding(String),

    /// Decoded signature has the wrong length
    #[error("malformed signature: expected 65 bytes, got {len}")]
    MalformedSignature { len: usize },

    /// R or S out of range, or no curve point matches the recovery id
    #[error("failed to recover public key from signature")]
    RecoveryFailure,

    /// Header byte does not map to a supported address class
    #[error("unsupported address class for header byte {header}")]
    UnsupportedAddressClass { header: u8 },

    /// Network parameters cannot encode addresses
    #[error("invalid network parameters: {0}")]
    InvalidNetworkParams(String),

    /// Derived and claimed values differ.
    ///
    /// Internal signal only: the verifier turns this into `Ok(false)`.
    #[error("claimed signer does not match recovered signer")]
    AddressMismatch,

    /// Deadline elapsed before verification finished
    #[error("signature verification timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Caller cancelled verification
    #[error("signature verification cancelled: {reason}")]
    Cancelled { reason: String },

    /// Verification unit panicked or was aborted by the runtime
    #[error("verification task failed: {0}")]
    TaskFailed(String),
}

impl VerifyError {
    /// Whether retrying the same input could produce a different outcome.
    ///
    /// Only deadline and cancellation failures qualify; every other error is
    /// a property of the input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeout_and_cancel_are_retryable() {
        assert!(VerifyError::Timeout { timeout_ms: 5 }.is_retryable());
        assert!(VerifyError::Cancelled {
            reason: "shutdown".into()
        }
        .is_retryable());

        assert!(!VerifyError::RecoveryFailure.is_retryable());
        assert!(!VerifyError::EmptySignature.is_retryable());
        assert!(!VerifyError::MalformedSignature { len: 64 }.is_retryable());
        assert!(!VerifyError::TaskFailed("panic".into()).is_retryable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            VerifyError::Timeout { timeout_ms: 250 }.to_string(),
            "signature verification timed out after 250ms"
        );
        assert_eq!(
            VerifyError::MalformedSignature { len: 64 }.to_string(),
            "malformed signature: expected 65 bytes, got 64"
        );
        assert_eq!(
            VerifyError::UnsupportedAddressClass { header: 101 }.to_string(),
            "unsupported address class for header byte 101"
        );
    }
}
