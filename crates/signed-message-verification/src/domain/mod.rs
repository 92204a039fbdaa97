//! # Domain Layer
//!
//! Pure BIP-0137 logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod address;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod header;
pub mod message;
pub mod network;
