use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use super::{EcdsaPrivateKey, Ed25519PrivateKey, PublicKey};
use crate::core::crypto::backend::{software, CryptoBackend, RandomSource};
use crate::core::crypto::password::PasswordConfig;
use crate::core::derivation::{bip32, legacy, slip10};
use crate::core::encoding::pem;
use crate::core::keystore;
use crate::core::mnemonic::Mnemonic;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::utils::decode_hex;
use crate::shared::{KeyAlgorithm, KeyResult};

/// A private key of either supported algorithm
///
/// Keys are immutable; derivation always returns a new instance. Only keys
/// carrying a chain code (generated keys, or keys recovered from a
/// mnemonic/seed) support [`PrivateKey::derive`].
pub enum PrivateKey {
    Ed25519(Ed25519PrivateKey),
    EcdsaSecp256k1(EcdsaPrivateKey),
}

impl PrivateKey {
    /// Generate a random Ed25519 key
    pub fn generate() -> KeyResult<Self> {
        Self::generate_ed25519()
    }

    pub fn generate_ed25519() -> KeyResult<Self> {
        Self::generate_ed25519_with(software())
    }

    pub fn generate_ed25519_with(rng: &dyn RandomSource) -> KeyResult<Self> {
        log::debug!("Generating Ed25519 private key");
        Ok(PrivateKey::Ed25519(Ed25519PrivateKey::generate(rng)?))
    }

    pub fn generate_ecdsa() -> KeyResult<Self> {
        Self::generate_ecdsa_with(software())
    }

    pub fn generate_ecdsa_with(rng: &dyn RandomSource) -> KeyResult<Self> {
        log::debug!("Generating secp256k1 private key");
        Ok(PrivateKey::EcdsaSecp256k1(EcdsaPrivateKey::generate(rng)?))
    }

    /// Assemble a key from raw material
    pub fn from_parts(
        algorithm: KeyAlgorithm,
        key: &[u8; PRIVATE_KEY_SIZE],
        chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
    ) -> KeyResult<Self> {
        match algorithm {
            KeyAlgorithm::Ed25519 => Ok(PrivateKey::Ed25519(Ed25519PrivateKey::from_seed(key, chain_code))),
            KeyAlgorithm::EcdsaSecp256k1 => Ok(PrivateKey::EcdsaSecp256k1(EcdsaPrivateKey::from_scalar(
                key, chain_code,
            )?)),
        }
    }

    /// Decode bytes of unknown algorithm, trying Ed25519 before secp256k1.
    ///
    /// A bare 32-byte value is ambiguous and always decodes as Ed25519.
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        if data.len() == PRIVATE_KEY_SIZE {
            log::warn!(
                "32-byte private key is ambiguous; consider from_bytes_ed25519/from_bytes_ecdsa or DER-encoded input"
            );
        }

        let ed25519_error = match Ed25519PrivateKey::from_bytes(data) {
            Ok(key) => return Ok(PrivateKey::Ed25519(key)),
            Err(e) => e,
        };
        match EcdsaPrivateKey::from_bytes(data) {
            Ok(key) => Ok(PrivateKey::EcdsaSecp256k1(key)),
            Err(ecdsa_error) => Err(KeyError::bad_key(format!(
                "private key cannot be decoded from bytes: {}; {}",
                ed25519_error, ecdsa_error
            ))),
        }
    }

    pub fn from_bytes_ed25519(data: &[u8]) -> KeyResult<Self> {
        Ok(PrivateKey::Ed25519(Ed25519PrivateKey::from_bytes(data)?))
    }

    pub fn from_bytes_ecdsa(data: &[u8]) -> KeyResult<Self> {
        Ok(PrivateKey::EcdsaSecp256k1(EcdsaPrivateKey::from_bytes(data)?))
    }

    /// Decode a DER document, selecting the algorithm from its prefix
    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        if data.starts_with(&ED25519_PRIVATE_DER_PREFIX) {
            Ok(PrivateKey::Ed25519(Ed25519PrivateKey::from_bytes_der(data)?))
        } else if data.starts_with(&ECDSA_PRIVATE_DER_PREFIX) {
            Ok(PrivateKey::EcdsaSecp256k1(EcdsaPrivateKey::from_bytes_der(data)?))
        } else {
            Err(KeyError::bad_key(format!(
                "unrecognised private key DER encoding of {} bytes",
                data.len()
            )))
        }
    }

    pub fn from_string(text: &str) -> KeyResult<Self> {
        let bytes = Zeroizing::new(decode_hex(text)?);
        Self::from_bytes(&bytes)
    }

    pub fn from_string_der(text: &str) -> KeyResult<Self> {
        let bytes = Zeroizing::new(decode_hex(text)?);
        Self::from_bytes_der(&bytes)
    }

    pub fn from_string_ed25519(text: &str) -> KeyResult<Self> {
        let bytes = Zeroizing::new(decode_hex(text)?);
        Self::from_bytes_ed25519(&bytes)
    }

    pub fn from_string_ecdsa(text: &str) -> KeyResult<Self> {
        let bytes = Zeroizing::new(decode_hex(text)?);
        Self::from_bytes_ecdsa(&bytes)
    }

    /// SLIP-10 master key of a BIP-39 seed
    pub fn from_seed_ed25519(seed: &[u8]) -> KeyResult<Self> {
        Self::from_seed_ed25519_with(software(), seed)
    }

    pub fn from_seed_ed25519_with(backend: &dyn CryptoBackend, seed: &[u8]) -> KeyResult<Self> {
        let master = slip10::master_key(backend, seed)?;
        Self::from_parts(KeyAlgorithm::Ed25519, &master.key, Some(master.chain_code))
    }

    /// BIP-32 master key of a BIP-39 seed
    pub fn from_seed_ecdsa_secp256k1(seed: &[u8]) -> KeyResult<Self> {
        Self::from_seed_ecdsa_secp256k1_with(software(), seed)
    }

    pub fn from_seed_ecdsa_secp256k1_with(backend: &dyn CryptoBackend, seed: &[u8]) -> KeyResult<Self> {
        let master = bip32::master_key(backend, seed)?;
        Self::from_parts(KeyAlgorithm::EcdsaSecp256k1, &master.key, Some(master.chain_code))
    }

    /// Recover a key from a keystore created by [`PrivateKey::to_keystore`].
    ///
    /// The keystore carries no algorithm tag, so the payload goes through
    /// [`PrivateKey::from_bytes`]. The restored key has no chain code.
    pub fn from_keystore(data: &[u8], passphrase: &str) -> KeyResult<Self> {
        Self::from_keystore_with(software(), data, passphrase)
    }

    pub fn from_keystore_with(backend: &dyn CryptoBackend, data: &[u8], passphrase: &str) -> KeyResult<Self> {
        let bytes = keystore::load_keystore(backend, data, passphrase)?;
        Self::from_bytes(&bytes)
    }

    /// Read the first (encrypted) private key section of a PEM document
    pub fn from_pem(text: &str, passphrase: Option<&str>) -> KeyResult<Self> {
        pem::read_pem(software(), text, passphrase)
    }

    /// Standard Ed25519 recovery at index 0
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> KeyResult<Self> {
        mnemonic.to_standard_ed25519_private_key(passphrase, 0)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Ed25519(_) => KeyAlgorithm::Ed25519,
            PrivateKey::EcdsaSecp256k1(_) => KeyAlgorithm::EcdsaSecp256k1,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(key.public_key()),
            PrivateKey::EcdsaSecp256k1(key) => PublicKey::EcdsaSecp256k1(key.public_key()),
        }
    }

    /// Signature bytes without the message
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.sign(message).to_vec(),
            PrivateKey::EcdsaSecp256k1(key) => key.sign(message).to_vec(),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; CHAIN_CODE_SIZE]> {
        match self {
            PrivateKey::Ed25519(key) => key.chain_code(),
            PrivateKey::EcdsaSecp256k1(key) => key.chain_code(),
        }
    }

    pub fn is_derivable(&self) -> bool {
        self.chain_code().is_some()
    }

    /// Child key at `index`: SLIP-10 (always hardened) or BIP-32
    pub fn derive(&self, index: u32) -> KeyResult<Self> {
        self.derive_with(software(), index)
    }

    pub fn derive_with(&self, backend: &dyn CryptoBackend, index: u32) -> KeyResult<Self> {
        let chain_code = self
            .chain_code()
            .ok_or_else(|| KeyError::derivation("this private key does not support key derivation"))?;
        let key = self.raw_key();

        let child = match self {
            PrivateKey::Ed25519(_) => slip10::derive(backend, &key, chain_code, index)?,
            PrivateKey::EcdsaSecp256k1(_) => bip32::derive(backend, &key, chain_code, index)?,
        };
        Self::from_parts(self.algorithm(), &child.key, Some(child.chain_code))
    }

    /// Pre-SLIP-10 derivation; the child keeps this key's algorithm and has no chain code
    pub fn legacy_derive(&self, index: i64) -> KeyResult<Self> {
        self.legacy_derive_with(software(), index)
    }

    pub fn legacy_derive_with(&self, backend: &dyn CryptoBackend, index: i64) -> KeyResult<Self> {
        let key = self.raw_key();
        let derived = legacy::derive(backend, &key[..], index)?;
        Self::from_parts(self.algorithm(), &derived, None)
    }

    /// Raw bytes for Ed25519, DER for secp256k1
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        match self {
            PrivateKey::Ed25519(_) => self.to_bytes_raw(),
            PrivateKey::EcdsaSecp256k1(_) => self.to_bytes_der(),
        }
    }

    pub fn to_bytes_raw(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.raw_key().to_vec())
    }

    pub fn to_bytes_der(&self) -> Zeroizing<Vec<u8>> {
        match self {
            PrivateKey::Ed25519(key) => key.to_bytes_der(),
            PrivateKey::EcdsaSecp256k1(key) => key.to_bytes_der(),
        }
    }

    pub fn to_string_raw(&self) -> String {
        hex::encode(&self.raw_key()[..])
    }

    pub fn to_string_der(&self) -> String {
        hex::encode(&self.to_bytes_der()[..])
    }

    /// Encrypt the raw key into a keystore. The chain code is not stored.
    pub fn to_keystore(&self, passphrase: &str) -> KeyResult<Vec<u8>> {
        self.to_keystore_with(software(), passphrase, &PasswordConfig::default())
    }

    pub fn to_keystore_with(
        &self,
        backend: &dyn CryptoBackend,
        passphrase: &str,
        config: &PasswordConfig,
    ) -> KeyResult<Vec<u8>> {
        keystore::create_keystore(backend, &self.raw_key()[..], passphrase, config)
    }

    fn raw_key(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        match self {
            PrivateKey::Ed25519(key) => key.to_bytes_raw(),
            PrivateKey::EcdsaSecp256k1(key) => key.to_bytes_raw(),
        }
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_der())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivateKey::Ed25519(key) => key.fmt(f),
            PrivateKey::EcdsaSecp256k1(key) => key.fmt(f),
        }
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl From<Ed25519PrivateKey> for PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        PrivateKey::Ed25519(key)
    }
}

impl From<EcdsaPrivateKey> for PrivateKey {
    fn from(key: EcdsaPrivateKey) -> Self {
        PrivateKey::EcdsaSecp256k1(key)
    }
}
