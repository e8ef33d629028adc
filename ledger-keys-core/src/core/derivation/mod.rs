//! Hierarchical key derivation
//!
//! SLIP-10 for Ed25519, BIP-32 for secp256k1 and the pre-standard legacy
//! scheme. All functions here operate on raw key bytes; the key types in
//! `core::crypto::keys` wrap them.

pub mod bip32;
pub mod legacy;
pub mod path;
pub mod slip10;

pub use path::*;

use zeroize::Zeroizing;

use crate::shared::constants::{CHAIN_CODE_SIZE, PRIVATE_KEY_SIZE};
use crate::shared::error::KeyError;
use crate::shared::{KeyAlgorithm, KeyResult};

/// Key bytes and chain code produced by one derivation step
pub struct ChildKey {
    pub key: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    pub chain_code: [u8; CHAIN_CODE_SIZE],
}

impl ChildKey {
    /// Split a 64-byte HMAC-SHA512 output into `IL` (key) and `IR` (chain code)
    pub(crate) fn from_hmac_output(output: &[u8]) -> KeyResult<Self> {
        if output.len() != PRIVATE_KEY_SIZE + CHAIN_CODE_SIZE {
            return Err(KeyError::crypto(format!(
                "HMAC-SHA512 output must be 64 bytes, got {}",
                output.len()
            )));
        }
        let mut key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        key.copy_from_slice(&output[..PRIVATE_KEY_SIZE]);
        let mut chain_code = [0u8; CHAIN_CODE_SIZE];
        chain_code.copy_from_slice(&output[PRIVATE_KEY_SIZE..]);
        Ok(Self { key, chain_code })
    }
}

/// How a mnemonic is turned into a private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationStrategy {
    /// BIP-39 seed, then `m/44'/coin'/0'/0/index` (SLIP-10 or BIP-32)
    Standard { algorithm: KeyAlgorithm, index: u32 },
    /// SLIP-10 over an arbitrary path; every element is hardened
    LegacyEd25519 { path: DerivationPath },
    /// BIP-32 over an arbitrary path with per-element hardening
    LegacyEcdsa { path: DerivationPath },
    /// Pre-BIP-32 keys taken straight from the mnemonic entropy
    LegacyEntropy,
}
