//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::entities::SignedMessageInput;
use crate::domain::errors::VerifyError;
use crate::domain::network::NetworkParams;
use crate::executor::StopSignal;
use async_trait::async_trait;

/// Primary signed-message verification API.
///
/// Every method returns `Ok(true)` for a valid signature, `Ok(false)` when
/// the signature is well formed but was made by someone else, and an error
/// for anything structurally wrong with the input.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait SignedMessageVerificationApi: Send + Sync {
    /// Verify a signature against a claimed address.
    ///
    /// The address class is taken from the signature header.
    fn verify_by_address(
        &self,
        address: &str,
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
    ) -> Result<bool, VerifyError>;

    /// Verify a signature against a claimed SEC1 public key.
    ///
    /// Compares the recovered key directly. Falls back once to address
    /// verification when the header class is unknown or the header's
    /// compression flag disagrees with the supplied key's form.
    fn verify_by_public_key(
        &self,
        public_key: &[u8],
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
    ) -> Result<bool, VerifyError>;

    /// Run either verification on a worker, bounded by `stop`.
    ///
    /// # Errors
    /// * `VerifyError::Timeout` - the deadline elapsed first
    /// * `VerifyError::Cancelled` - the caller's token fired first
    async fn verify_with_deadline(
        &self,
        input: SignedMessageInput,
        network: NetworkParams,
        stop: StopSignal,
    ) -> Result<bool, VerifyError>;
}
