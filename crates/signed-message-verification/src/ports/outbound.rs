//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the verifier notifies while it works. Notifications are
//! observational: nothing a sink does feeds back into the verdict.

use crate::domain::entities::{AddressClass, DecodedSignature, FallbackReason};
use crate::domain::errors::VerifyError;
use std::time::Duration;

/// Receives diagnostic events from each verification stage.
///
/// Implementations must be thread-safe (`Send + Sync`); one sink is shared by
/// every concurrent verification.
pub trait DiagnosticsSink: Send + Sync {
    /// Header fields and scalars were decoded
    fn signature_decoded(&self, decoded: &DecodedSignature);

    /// A public key was recovered, serialized in the header's form
    fn key_recovered(&self, class: AddressClass, public_key: &[u8]);

    /// An address was derived for comparison
    fn address_derived(&self, class: AddressClass, address: &str);

    /// The public-key path handed over to address derivation
    fn fallback_triggered(&self, reason: FallbackReason);

    /// Final outcome of one top-level verification
    fn verification_finished(&self, outcome: &Result<bool, VerifyError>, elapsed: Duration);
}
