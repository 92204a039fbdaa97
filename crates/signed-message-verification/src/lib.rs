//! # Signed-Message Verification
//!
//! Verifies Bitcoin signed messages in the BIP-0137 format against a claimed
//! address or public key.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): header classification, message hashing,
//!   key recovery and address derivation; pure, no I/O
//! - **Ports Layer** (`ports/`): the verification API and the diagnostics sink
//! - **Adapters Layer** (`adapters/`): no-op, tracing and counting sinks
//! - **Service Layer** (`service.rs`): orchestration and the fallback protocol
//! - **Executor** (`executor.rs`): deadline and cancellation bound
//!
//! ## Example
//!
//! ```
//! use signed_message_verification::verify_bip137_signature;
//!
//! let valid = verify_bip137_signature(
//!     "194vDb9xwY6XQi5bLa7FRPBewJdUqympZ9",
//!     "Hello, Bitcoin testing!",
//!     "IOeVH/0KqgmS3XKwqCJiwlcHonwxKMQN6fbOW5UsXSDZB4EGCVTXx6c+ZU/Ae5qO94MSBZn2aPOiUsupRIwBaAU=",
//! )
//! .unwrap();
//! assert!(valid);
//! ```
//!
//! ## Security Notes
//!
//! - Structural failures are errors, never `Ok(false)`
//! - Address and key comparisons are exact, with no normalization
//! - This crate never signs and never handles private keys

pub mod adapters;
pub mod config;
pub mod domain;
pub mod executor;
pub mod ports;
pub mod service;
pub mod telemetry;

/// BIP-0137 signer for tests.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use adapters::diagnostics::{CountingDiagnostics, NoOpDiagnostics, TracingDiagnostics};
pub use config::{ConfigError, VerifierConfig};
pub use domain::address::{derive_address, derive_address_from_sec1, hash160};
pub use domain::entities::{
    AddressClass, Claim, DecodedSignature, FallbackReason, SignedMessageInput,
};
pub use domain::errors::VerifyError;
pub use domain::header::classify;
pub use domain::message::{canonicalize, compact_size};
pub use domain::network::NetworkParams;
pub use executor::{CancellableExecutor, StopSignal};
pub use ports::inbound::SignedMessageVerificationApi;
pub use ports::outbound::DiagnosticsSink;
pub use service::SignedMessageVerifier;
pub use telemetry::{init_tracing, TelemetryError};

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Verify against a claimed address on `network`.
pub fn verify_by_address(
    address: &str,
    message: &str,
    signature_base64: &str,
    network: &NetworkParams,
) -> Result<bool, VerifyError> {
    SignedMessageVerifier::default().verify_by_address(address, message, signature_base64, network)
}

/// Verify against a claimed SEC1 public key on `network`.
pub fn verify_by_public_key(
    public_key: &[u8],
    message: &str,
    signature_base64: &str,
    network: &NetworkParams,
) -> Result<bool, VerifyError> {
    SignedMessageVerifier::default().verify_by_public_key(
        public_key,
        message,
        signature_base64,
        network,
    )
}

/// Verify `input` on the blocking pool, bounded by a timeout, deadline or
/// cancellation token.
pub async fn verify_with_deadline(
    input: SignedMessageInput,
    network: NetworkParams,
    stop: impl Into<StopSignal>,
) -> Result<bool, VerifyError> {
    SignedMessageVerifier::default()
        .verify_with_deadline(input, network, stop.into())
        .await
}

/// Verify against a mainnet address.
pub fn verify_bip137_signature(
    address: &str,
    message: &str,
    signature_base64: &str,
) -> Result<bool, VerifyError> {
    verify_by_address(address, message, signature_base64, &NetworkParams::mainnet())
}

/// Verify against a public key, deriving mainnet addresses on fallback.
pub fn verify_bip137_signature_with_public_key(
    public_key: &[u8],
    message: &str,
    signature_base64: &str,
) -> Result<bool, VerifyError> {
    verify_by_public_key(public_key, message, signature_base64, &NetworkParams::mainnet())
}

/// Compressed P2PKH address of a SEC1 public key.
pub fn derive_address_from_public_key(
    public_key: &[u8],
    network: &NetworkParams,
) -> Result<String, VerifyError> {
    derive_address_from_sec1(public_key, AddressClass::P2pkh, true, network)
}
