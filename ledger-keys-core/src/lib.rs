//! Ledger Keys Core
//!
//! Key management for distributed-ledger client SDKs.
//! Creates, derives, serializes and protects Ed25519 and secp256k1 signing
//! keys, and recovers them from mnemonic phrases or encrypted files.
//!
//! ## Architecture
//!
//! - **Core**: key types and primitives, DER/PEM, mnemonics, derivation, keystores
//! - **Infrastructure**: runtime configuration and backend selection
//! - **Shared**: common types, constants, errors and utilities
//!
//! Every algorithm takes a `&dyn CryptoBackend`; the convenience entry points
//! use the pure-software backend.
//!
//! ## Security Features
//!
//! - Secret buffers are zeroized on drop
//! - Keystore MACs are verified in constant time before decryption
//! - Private keys never appear in `Debug` output or logs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_keys_core::{Mnemonic, PrivateKey};
//!
//! # fn main() -> Result<(), ledger_keys_core::KeyError> {
//! let mnemonic = Mnemonic::generate_24()?;
//! let key = mnemonic.to_standard_ed25519_private_key("", 0)?;
//! let child = key.derive(1)?;
//!
//! let signature = child.sign(b"hello");
//! assert!(child.public_key().verify(b"hello", &signature));
//!
//! let keystore = key.to_keystore("correct horse")?;
//! let restored = PrivateKey::from_keystore(&keystore, "correct horse")?;
//! assert_eq!(restored.public_key(), key.public_key());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod infrastructure;
pub mod shared;

pub use crate::core::crypto::backend::{software, CryptoBackend, SoftwareBackend};
pub use crate::core::crypto::keys::{
    DefaultKeyFactory, EcdsaPrivateKey, EcdsaPublicKey, Ed25519PrivateKey, Ed25519PublicKey, PrivateKey,
    PrivateKeyFactory, PublicKey,
};
pub use crate::core::crypto::password::PasswordConfig;
pub use crate::core::derivation::{ChildIndex, DerivationPath, DerivationStrategy, HardeningPolicy};
pub use crate::core::mnemonic::{LegacyWordList, Mnemonic};
pub use crate::infrastructure::{BackendKind, KeyConfig};
pub use crate::shared::error::{BadMnemonicError, KeyError, KeyResult, MnemonicErrorReason};
pub use crate::shared::types::KeyAlgorithm;

/// Load configuration and initialize logging at its level.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init() -> KeyResult<KeyConfig> {
    let config = KeyConfig::load()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }

    log::info!("{} {} initialized", NAME, VERSION);
    Ok(config)
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let first = init().expect("Failed to initialize");
        let second = init().expect("Failed to initialize twice");
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_to_end_recovery() {
        let mnemonic = Mnemonic::generate_12().unwrap();
        let key = mnemonic.to_standard_ecdsa_secp256k1_private_key("", 0).unwrap();
        let again = Mnemonic::from_string(&mnemonic.to_string())
            .unwrap()
            .to_standard_ecdsa_secp256k1_private_key("", 0)
            .unwrap();
        assert_eq!(key.public_key(), again.public_key());
        assert!(key.public_key().to_evm_address().is_ok());
    }
}
