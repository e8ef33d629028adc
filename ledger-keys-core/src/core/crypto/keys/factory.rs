//! Key construction seam
//!
//! Mnemonic recovery and derivation produce raw key material; a
//! [`PrivateKeyFactory`] turns it into [`PrivateKey`] values so that callers
//! can substitute their own key representation.

use super::PrivateKey;
use crate::shared::constants::*;
use crate::shared::{KeyAlgorithm, KeyResult};

/// Builds private keys from raw material
pub trait PrivateKeyFactory: Send + Sync {
    fn ed25519_from_parts(
        &self,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<PrivateKey>;

    fn ecdsa_from_parts(
        &self,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<PrivateKey>;

    /// Bytes of unknown algorithm
    fn from_bytes(&self, data: &[u8]) -> KeyResult<PrivateKey>;

    fn from_parts(
        &self,
        algorithm: KeyAlgorithm,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<PrivateKey> {
        match algorithm {
            KeyAlgorithm::Ed25519 => self.ed25519_from_parts(key, chain_code),
            KeyAlgorithm::EcdsaSecp256k1 => self.ecdsa_from_parts(key, chain_code),
        }
    }
}

/// Factory producing the crate's own key types
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyFactory;

impl PrivateKeyFactory for DefaultKeyFactory {
    fn ed25519_from_parts(
        &self,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<PrivateKey> {
        PrivateKey::from_parts(KeyAlgorithm::Ed25519, key, chain_code)
    }

    fn ecdsa_from_parts(
        &self,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<PrivateKey> {
        PrivateKey::from_parts(KeyAlgorithm::EcdsaSecp256k1, key, chain_code)
    }

    fn from_bytes(&self, data: &[u8]) -> KeyResult<PrivateKey> {
        PrivateKey::from_bytes(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factory() {
        let factory = DefaultKeyFactory;
        let key = factory
            .from_parts(KeyAlgorithm::Ed25519, &[1u8; 32], Some([2u8; 32]))
            .unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
        assert_eq!(key.chain_code(), Some(&[2u8; 32]));

        let key = factory.ecdsa_from_parts(&[1u8; 32], None).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaSecp256k1);
        assert!(!key.is_derivable());

        // Zero is not a valid secp256k1 scalar
        assert!(factory.ecdsa_from_parts(&[0u8; 32], None).is_err());
    }
}
