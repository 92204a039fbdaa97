//! # Network Parameters
//!
//! Version bytes and bech32 prefix used when deriving addresses. Values are
//! immutable and freely shared across concurrent verifications.

use super::errors::VerifyError;
use bech32::Hrp;
use serde::{Deserialize, Serialize};

/// Address-encoding parameters of one Bitcoin network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Human-readable network name
    pub name: String,
    /// Base58Check version byte for P2PKH
    pub p2pkh_prefix: u8,
    /// Base58Check version byte for P2SH
    pub p2sh_prefix: u8,
    /// Bech32 human-readable part for segwit addresses
    pub bech32_hrp: String,
}

impl NetworkParams {
    pub fn new(
        name: impl Into<String>,
        p2pkh_prefix: u8,
        p2sh_prefix: u8,
        bech32_hrp: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            p2pkh_prefix,
            p2sh_prefix,
            bech32_hrp: bech32_hrp.into(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new("mainnet", 0x00, 0x05, "bc")
    }

    pub fn testnet() -> Self {
        Self::new("testnet", 0x6f, 0xc4, "tb")
    }

    /// Signet shares testnet version bytes and HRP.
    pub fn signet() -> Self {
        Self::new("signet", 0x6f, 0xc4, "tb")
    }

    pub fn regtest() -> Self {
        Self::new("regtest", 0x6f, 0xc4, "bcrt")
    }

    /// Look up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Some(Self::mainnet()),
            "testnet" | "test" | "testnet3" => Some(Self::testnet()),
            "signet" => Some(Self::signet()),
            "regtest" => Some(Self::regtest()),
            _ => None,
        }
    }

    /// Parsed bech32 human-readable part.
    pub fn hrp(&self) -> Result<Hrp, VerifyError> {
        Hrp::parse(&self.bech32_hrp)
            .map_err(|e| VerifyError::InvalidNetworkParams(format!("bech32 hrp: {e}")))
    }

    /// Reject parameters that cannot encode every address class.
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.p2pkh_prefix == self.p2sh_prefix {
            return Err(VerifyError::InvalidNetworkParams(
                "p2pkh and p2sh prefixes must differ".to_string(),
            ));
        }
        self.hrp().map(|_| ())
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
