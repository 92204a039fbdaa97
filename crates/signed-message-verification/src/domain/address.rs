//! # Address Derivation
//!
//! Computes the address a public key controls under each supported class.
//!
//! - **P2PKH**: `Base58Check(p2pkh_prefix || HASH160(pubkey))`, pubkey in
//!   the form given by the compression flag
//! - **P2SH-P2WPKH**: `Base58Check(p2sh_prefix || HASH160(0x00 0x14 || HASH160(pubkey33)))`
//! - **P2WPKH**: `Bech32(hrp, v0, HASH160(pubkey33))`
//!
//! Segwit classes require the compressed key (`AddressClass::requires_compressed`).
//!
//! `HASH160(x) = RIPEMD160(SHA256(x))`.

use super::ecdsa::{parse_public_key, serialize_public_key};
use super::entities::AddressClass;
use super::errors::VerifyError;
use super::network::NetworkParams;
use bech32::segwit;
use k256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// RIPEMD160(SHA256(data)).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Derive the address of `key` for the given class.
///
/// Segwit classes always hash the compressed key, whatever `compressed`
/// says.
pub fn derive_address(
    key: &VerifyingKey,
    class: AddressClass,
    compressed: bool,
    network: &NetworkParams,
) -> Result<String, VerifyError> {
    let key_hash =
        || hash160(&serialize_public_key(key, compressed || class.requires_compressed()));

    match class {
        AddressClass::P2pkh => Ok(base58check(network.p2pkh_prefix, &key_hash())),
        AddressClass::P2shP2wpkh => {
            let redeem_script = p2wpkh_script(&key_hash());
            Ok(base58check(network.p2sh_prefix, &hash160(&redeem_script)))
        }
        AddressClass::P2wpkh => segwit::encode_v0(network.hrp()?, &key_hash())
            .map_err(|e| VerifyError::InvalidNetworkParams(format!("bech32 encode: {e}"))),
        AddressClass::Unknown(header) => Err(VerifyError::UnsupportedAddressClass { header }),
    }
}

/// Derive from caller-supplied SEC1 bytes.
pub fn derive_address_from_sec1(
    public_key: &[u8],
    class: AddressClass,
    compressed: bool,
    network: &NetworkParams,
) -> Result<String, VerifyError> {
    let key = parse_public_key(public_key)?;
    derive_address(&key, class, compressed, network)
}

/// `OP_0 PUSH20 <hash160(compressed pubkey)>`
fn p2wpkh_script(key_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(22);
    script.push(0x00);
    script.push(0x14);
    script.extend_from_slice(key_hash);
    script
}

fn base58check(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}
