//! # Ports Layer
//!
//! Trait definitions for inbound (API) and outbound (diagnostics) interfaces.

pub mod inbound;
pub mod outbound;
