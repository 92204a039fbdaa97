//! # Diagnostics Adapters
//!
//! Implementations of the [`DiagnosticsSink`] port.
//!
//! - [`NoOpDiagnostics`]: default, discards everything
//! - [`TracingDiagnostics`]: structured `tracing` events
//! - [`CountingDiagnostics`]: atomic counters for tests and health checks
//!
//! ## Levels
//!
//! | Event                 | Level                          |
//! |-----------------------|--------------------------------|
//! | signature decoded     | debug                          |
//! | key recovered         | trace (full key), debug        |
//! | address derived       | debug                          |
//! | fallback triggered    | info                           |
//! | verification finished | info / warn (retryable) / error |
//!
//! Signatures are masked at `debug`; full hex only appears at `trace`.

use crate::domain::entities::{AddressClass, DecodedSignature, FallbackReason};
use crate::domain::errors::VerifyError;
use crate::ports::outbound::DiagnosticsSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

// =============================================================================
// NO-OP
// =============================================================================

/// Sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDiagnostics;

impl DiagnosticsSink for NoOpDiagnostics {
    fn signature_decoded(&self, _: &DecodedSignature) {}
    fn key_recovered(&self, _: AddressClass, _: &[u8]) {}
    fn address_derived(&self, _: AddressClass, _: &str) {}
    fn fallback_triggered(&self, _: FallbackReason) {}
    fn verification_finished(&self, _: &Result<bool, VerifyError>, _: Duration) {}
}

// =============================================================================
// TRACING
// =============================================================================

/// Sink that emits `tracing` events under the `bip137` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn signature_decoded(&self, decoded: &DecodedSignature) {
        debug!(
            target: "bip137",
            header = decoded.header,
            recovery_id = decoded.recovery_id,
            compressed = decoded.compressed,
            class = %decoded.address_class,
            r = %mask_sensitive(&hex::encode(decoded.r)),
            s = %mask_sensitive(&hex::encode(decoded.s)),
            "Signature header decoded"
        );
        trace!(target: "bip137", r = %dump_hex(&decoded.r), s = %dump_hex(&decoded.s), "Signature scalars");
    }

    fn key_recovered(&self, class: AddressClass, public_key: &[u8]) {
        debug!(target: "bip137", %class, key_len = public_key.len(), "Public key recovered");
        trace!(target: "bip137", public_key = %hex::encode(public_key), "Recovered key bytes");
    }

    fn address_derived(&self, class: AddressClass, address: &str) {
        debug!(target: "bip137", %class, address, "Address derived");
    }

    fn fallback_triggered(&self, reason: FallbackReason) {
        info!(target: "bip137", %reason, "Falling back to address verification");
    }

    fn verification_finished(&self, outcome: &Result<bool, VerifyError>, elapsed: Duration) {
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        match outcome {
            Ok(valid) => info!(target: "bip137", valid, elapsed_us, "Verification finished"),
            Err(e) if e.is_retryable() => {
                warn!(target: "bip137", error = %e, elapsed_us, "Verification interrupted")
            }
            Err(e) => error!(target: "bip137", error = %e, elapsed_us, "Verification failed"),
        }
    }
}

// =============================================================================
// COUNTING
// =============================================================================

/// Thread-safe counters over diagnostic events.
#[derive(Debug, Default)]
pub struct CountingDiagnostics {
    /// Signatures that reached header decoding
    pub decoded: AtomicU64,
    /// Successful key recoveries
    pub keys_recovered: AtomicU64,
    /// Addresses derived (direct and fallback)
    pub addresses_derived: AtomicU64,
    /// Public-key verifications that fell back
    pub fallbacks: AtomicU64,
    /// Top-level verifications returning `Ok(true)`
    pub valid: AtomicU64,
    /// Top-level verifications returning `Ok(false)`
    pub invalid: AtomicU64,
    /// Top-level verifications returning an error
    pub errors: AtomicU64,
}

impl CountingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total finished verifications
    pub fn finished(&self) -> u64 {
        self.valid.load(Ordering::Relaxed)
            + self.invalid.load(Ordering::Relaxed)
            + self.errors.load(Ordering::Relaxed)
    }
}

impl DiagnosticsSink for CountingDiagnostics {
    fn signature_decoded(&self, _: &DecodedSignature) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    fn key_recovered(&self, _: AddressClass, _: &[u8]) {
        self.keys_recovered.fetch_add(1, Ordering::Relaxed);
    }

    fn address_derived(&self, _: AddressClass, _: &str) {
        self.addresses_derived.fetch_add(1, Ordering::Relaxed);
    }

    fn fallback_triggered(&self, _: FallbackReason) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    fn verification_finished(&self, outcome: &Result<bool, VerifyError>, _: Duration) {
        let counter = match outcome {
            Ok(true) => &self.valid,
            Ok(false) => &self.invalid,
            Err(_) => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Space-separated lowercase hex, `<empty>` for no bytes.
pub fn dump_hex(data: &[u8]) -> String {
    if data.is_empty() {
        return "<empty>".to_string();
    }
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the first and last four characters, elide the middle.
pub fn mask_sensitive(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
