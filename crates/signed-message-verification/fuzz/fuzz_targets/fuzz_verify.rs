//! Fuzz target for signed-message verification.
//!
//! Feeds arbitrary signatures, messages and claims through both public
//! paths.
//!
//! ## Running
//!
//! ```bash
//! cd crates/signed-message-verification
//! cargo +nightly fuzz run fuzz_verify
//! ```

#![no_main]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use libfuzzer_sys::fuzz_target;
use signed_message_verification::ports::inbound::SignedMessageVerificationApi;
use signed_message_verification::{classify, NetworkParams, SignedMessageVerifier};

/// Fuzz input structure for verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Raw signature bytes, base64-encoded before verification
    signature: Vec<u8>,
    /// Force the canonical 65-byte length half of the time
    pad_to_65: bool,
    message: String,
    address: String,
    public_key: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut signature = input.signature;
    if input.pad_to_65 {
        signature.resize(65, 0);
    }

    // Classification never panics and only fails on length
    match classify(&signature) {
        Ok(decoded) => {
            assert_eq!(signature.len(), 65);
            assert!(decoded.recovery_id <= 3);
        }
        Err(_) => assert_ne!(signature.len(), 65),
    }

    let verifier = SignedMessageVerifier::default();
    let net = NetworkParams::mainnet();
    let encoded = STANDARD.encode(&signature);

    // Verification is deterministic, whatever the input
    let first = verifier.verify_by_address(&input.address, &input.message, &encoded, &net);
    let second = verifier.verify_by_address(&input.address, &input.message, &encoded, &net);
    assert_eq!(first, second);

    let by_key = verifier.verify_by_public_key(&input.public_key, &input.message, &encoded, &net);
    let again = verifier.verify_by_public_key(&input.public_key, &input.message, &encoded, &net);
    assert_eq!(by_key, again);
});
