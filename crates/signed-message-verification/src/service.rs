//! # Signed-Message Verification Service
//!
//! Application service that implements [`SignedMessageVerificationApi`].
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignedMessageVerificationApi`)
//! - Notifies the outbound port (`DiagnosticsSink`) at each stage
//! - Delegates decoding, hashing, recovery and derivation to the domain layer
//!
//! ## Stages
//!
//! ```text
//! Decode -> Canonicalize -> Recover -> { DirectCompare | DeriveAndCompare } -> Done
//!                                              |
//!                                              +-- fallback (public-key path, once)
//! ```
//!
//! The cancellation token is checked before every stage. A token that is
//! never cancelled (the synchronous entry points) costs one atomic load per
//! stage.

use crate::adapters::diagnostics::NoOpDiagnostics;
use crate::config::VerifierConfig;
use crate::domain::address::derive_address;
use crate::domain::ecdsa::{parse_public_key, recover};
use crate::domain::entities::{
    AddressClass, Claim, DecodedSignature, FallbackReason, SignedMessageInput,
};
use crate::domain::errors::VerifyError;
use crate::domain::header::classify;
use crate::domain::message::canonicalize;
use crate::domain::network::NetworkParams;
use crate::executor::{CancellableExecutor, StopSignal};
use crate::ports::inbound::SignedMessageVerificationApi;
use crate::ports::outbound::DiagnosticsSink;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use k256::ecdsa::VerifyingKey;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Signed-message verifier.
///
/// Cheap to clone; clones share the diagnostics sink and configuration.
pub struct SignedMessageVerifier<D: DiagnosticsSink = NoOpDiagnostics> {
    diagnostics: Arc<D>,
    config: Arc<VerifierConfig>,
    executor: CancellableExecutor,
}

impl<D: DiagnosticsSink> Clone for SignedMessageVerifier<D> {
    fn clone(&self) -> Self {
        Self {
            diagnostics: Arc::clone(&self.diagnostics),
            config: Arc::clone(&self.config),
            executor: self.executor,
        }
    }
}

impl Default for SignedMessageVerifier<NoOpDiagnostics> {
    fn default() -> Self {
        Self::new(NoOpDiagnostics)
    }
}

impl SignedMessageVerifier<NoOpDiagnostics> {
    /// Verifier without diagnostics, configured from the environment.
    pub fn from_env() -> Self {
        Self::with_config(VerifierConfig::from_env(), NoOpDiagnostics)
    }
}

impl<D: DiagnosticsSink> SignedMessageVerifier<D> {
    /// Create a verifier with default configuration (mainnet, 5s bound).
    pub fn new(diagnostics: D) -> Self {
        Self::with_config(VerifierConfig::default(), diagnostics)
    }

    pub fn with_config(config: VerifierConfig, diagnostics: D) -> Self {
        Self::with_shared(config, Arc::new(diagnostics))
    }

    /// Share one sink across several verifiers.
    pub fn with_shared(config: VerifierConfig, diagnostics: Arc<D>) -> Self {
        Self {
            diagnostics,
            config: Arc::new(config),
            executor: CancellableExecutor::new(),
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Verify an input against the configured network.
    pub fn verify(&self, input: &SignedMessageInput) -> Result<bool, VerifyError> {
        self.finish(Instant::now(), |verifier| {
            verifier.evaluate(input, &verifier.config.network, &CancellationToken::new())
        })
    }

    /// Verify on the blocking pool, bounded by the configured timeout.
    pub async fn verify_bounded(&self, input: SignedMessageInput) -> Result<bool, VerifyError>
    where
        D: 'static,
    {
        let network = self.config.network.clone();
        let stop = StopSignal::Timeout(self.config.default_timeout);
        self.verify_with_deadline(input, network, stop).await
    }

    // =========================================================================
    // STAGES
    // =========================================================================

    fn evaluate(
        &self,
        input: &SignedMessageInput,
        network: &NetworkParams,
        cancel: &CancellationToken,
    ) -> Result<bool, VerifyError> {
        match &input.claim {
            Claim::Address(address) => self.check_address(
                address,
                &input.message,
                &input.signature_base64,
                network,
                cancel,
            ),
            Claim::PublicKey(public_key) => self.check_public_key(
                public_key,
                &input.message,
                &input.signature_base64,
                network,
                cancel,
            ),
        }
    }

    fn check_address(
        &self,
        address: &str,
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
        cancel: &CancellationToken,
    ) -> Result<bool, VerifyError> {
        if address.is_empty() {
            return Err(VerifyError::EmptyAddress);
        }
        require_message_and_signature(message, signature_base64)?;

        checkpoint(cancel, "decode")?;
        let decoded = self.decode(signature_base64)?;

        checkpoint(cancel, "canonicalize")?;
        let hash = canonicalize(message);

        checkpoint(cancel, "recover")?;
        let recovered = recover(
            &hash,
            decoded.recovery_id,
            &decoded.r,
            &decoded.s,
            decoded.compressed,
        )?;
        self.diagnostics
            .key_recovered(decoded.address_class, &recovered.to_bytes());

        checkpoint(cancel, "derive")?;
        let derived = derive_address(
            &recovered.key,
            decoded.address_class,
            decoded.compressed,
            network,
        )?;
        self.diagnostics
            .address_derived(decoded.address_class, &derived);

        match compare_exact(derived.as_bytes(), address.as_bytes()) {
            Ok(()) => Ok(true),
            Err(VerifyError::AddressMismatch) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn check_public_key(
        &self,
        public_key: &[u8],
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
        cancel: &CancellationToken,
    ) -> Result<bool, VerifyError> {
        if public_key.is_empty() {
            return Err(VerifyError::EmptyPublicKey);
        }
        require_message_and_signature(message, signature_base64)?;
        let supplied = parse_public_key(public_key)?;

        checkpoint(cancel, "decode")?;
        let decoded = self.decode(signature_base64)?;

        checkpoint(cancel, "canonicalize")?;
        let hash = canonicalize(message);

        // The recovery id of an unknown header is meaningless; skip straight
        // to address derivation.
        if matches!(decoded.address_class, AddressClass::Unknown(_)) {
            return self.fallback(
                FallbackReason::UnknownAddressClass,
                &supplied,
                &decoded,
                message,
                signature_base64,
                network,
                cancel,
            );
        }

        checkpoint(cancel, "recover")?;
        let recovered = recover(
            &hash,
            decoded.recovery_id,
            &decoded.r,
            &decoded.s,
            decoded.compressed,
        )?;
        let recovered_bytes = recovered.to_bytes();
        self.diagnostics
            .key_recovered(decoded.address_class, &recovered_bytes);

        checkpoint(cancel, "compare")?;
        if public_key.len() != recovered_bytes.len() {
            return self.fallback(
                FallbackReason::SerializationMismatch,
                &supplied,
                &decoded,
                message,
                signature_base64,
                network,
                cancel,
            );
        }

        match compare_exact(&recovered_bytes, public_key) {
            Ok(()) => Ok(true),
            Err(VerifyError::AddressMismatch) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Derive an address from the supplied key and run the address path once.
    #[allow(clippy::too_many_arguments)]
    fn fallback(
        &self,
        reason: FallbackReason,
        supplied: &VerifyingKey,
        decoded: &DecodedSignature,
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
        cancel: &CancellationToken,
    ) -> Result<bool, VerifyError> {
        self.diagnostics.fallback_triggered(reason);
        checkpoint(cancel, "fallback")?;

        let (class, compressed) = best_guess_class(decoded);
        let address = derive_address(supplied, class, compressed, network)?;
        self.diagnostics.address_derived(class, &address);

        self.check_address(&address, message, signature_base64, network, cancel)
    }

    // =========================================================================
    // HELPER FUNCTIONS
    // =========================================================================

    fn decode(&self, signature_base64: &str) -> Result<DecodedSignature, VerifyError> {
        let raw = STANDARD
            .decode(signature_base64)
            .map_err(|e| VerifyError::InvalidEncoding(e.to_string()))?;
        let decoded = classify(&raw)?;
        self.diagnostics.signature_decoded(&decoded);
        Ok(decoded)
    }

    fn finish<F>(&self, started: Instant, run: F) -> Result<bool, VerifyError>
    where
        F: FnOnce(&Self) -> Result<bool, VerifyError>,
    {
        let outcome = run(self);
        self.diagnostics
            .verification_finished(&outcome, started.elapsed());
        outcome
    }
}

#[async_trait]
impl<D: DiagnosticsSink + 'static> SignedMessageVerificationApi for SignedMessageVerifier<D> {
    fn verify_by_address(
        &self,
        address: &str,
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
    ) -> Result<bool, VerifyError> {
        self.finish(Instant::now(), |verifier| {
            verifier.check_address(
                address,
                message,
                signature_base64,
                network,
                &CancellationToken::new(),
            )
        })
    }

    fn verify_by_public_key(
        &self,
        public_key: &[u8],
        message: &str,
        signature_base64: &str,
        network: &NetworkParams,
    ) -> Result<bool, VerifyError> {
        self.finish(Instant::now(), |verifier| {
            verifier.check_public_key(
                public_key,
                message,
                signature_base64,
                network,
                &CancellationToken::new(),
            )
        })
    }

    async fn verify_with_deadline(
        &self,
        input: SignedMessageInput,
        network: NetworkParams,
        stop: StopSignal,
    ) -> Result<bool, VerifyError> {
        let started = Instant::now();
        let worker = self.clone();
        let outcome = self
            .executor
            .run_with_deadline(stop, move |cancel| {
                worker.evaluate(&input, &network, &cancel)
            })
            .await;
        self.diagnostics
            .verification_finished(&outcome, started.elapsed());
        outcome
    }
}

fn require_message_and_signature(message: &str, signature_base64: &str) -> Result<(), VerifyError> {
    if message.is_empty() {
        return Err(VerifyError::EmptyMessage);
    }
    if signature_base64.is_empty() {
        return Err(VerifyError::EmptySignature);
    }
    Ok(())
}

fn checkpoint(cancel: &CancellationToken, stage: &str) -> Result<(), VerifyError> {
    if cancel.is_cancelled() {
        return Err(VerifyError::Cancelled {
            reason: format!("stopped before {stage}"),
        });
    }
    Ok(())
}

/// Exact byte equality; `AddressMismatch` never leaves this module.
fn compare_exact(derived: &[u8], claimed: &[u8]) -> Result<(), VerifyError> {
    if derived == claimed {
        Ok(())
    } else {
        Err(VerifyError::AddressMismatch)
    }
}

/// Class and compression used to derive the fallback address.
///
/// Unknown headers guess P2PKH; the address path then rejects the header
/// itself, so an unknown class can never verify.
fn best_guess_class(decoded: &DecodedSignature) -> (AddressClass, bool) {
    match decoded.address_class {
        AddressClass::Unknown(_) => (AddressClass::P2pkh, true),
        class => (class, decoded.compressed),
    }
}
