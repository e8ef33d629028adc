use std::fmt;
use std::str::FromStr;

use super::{EcdsaPublicKey, Ed25519PublicKey};
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::utils::decode_hex;
use crate::shared::{KeyAlgorithm, KeyResult};

/// A public key of either supported algorithm
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
    EcdsaSecp256k1(EcdsaPublicKey),
}

impl PublicKey {
    /// Decode bytes of unknown algorithm, trying Ed25519 before secp256k1
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        let ed25519_error = match Ed25519PublicKey::from_bytes(data) {
            Ok(key) => return Ok(PublicKey::Ed25519(key)),
            Err(e) => e,
        };
        match EcdsaPublicKey::from_bytes(data) {
            Ok(key) => Ok(PublicKey::EcdsaSecp256k1(key)),
            Err(ecdsa_error) => Err(KeyError::bad_key(format!(
                "public key cannot be decoded from bytes: {}; {}",
                ed25519_error, ecdsa_error
            ))),
        }
    }

    pub fn from_bytes_ed25519(data: &[u8]) -> KeyResult<Self> {
        Ok(PublicKey::Ed25519(Ed25519PublicKey::from_bytes(data)?))
    }

    pub fn from_bytes_ecdsa(data: &[u8]) -> KeyResult<Self> {
        Ok(PublicKey::EcdsaSecp256k1(EcdsaPublicKey::from_bytes(data)?))
    }

    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        if data.starts_with(&ED25519_PUBLIC_DER_PREFIX) {
            Ok(PublicKey::Ed25519(Ed25519PublicKey::from_bytes_der(data)?))
        } else if data.starts_with(&ECDSA_PUBLIC_DER_PREFIX) || data.starts_with(&ECDSA_PUBLIC_DER_PREFIX_SPKI) {
            Ok(PublicKey::EcdsaSecp256k1(EcdsaPublicKey::from_bytes_der(data)?))
        } else {
            Err(KeyError::bad_key(format!(
                "unrecognised public key DER encoding of {} bytes",
                data.len()
            )))
        }
    }

    pub fn from_string(text: &str) -> KeyResult<Self> {
        Self::from_bytes(&decode_hex(text)?)
    }

    pub fn from_string_ed25519(text: &str) -> KeyResult<Self> {
        Self::from_bytes_ed25519(&decode_hex(text)?)
    }

    pub fn from_string_ecdsa(text: &str) -> KeyResult<Self> {
        Self::from_bytes_ecdsa(&decode_hex(text)?)
    }

    pub fn from_string_der(text: &str) -> KeyResult<Self> {
        Self::from_bytes_der(&decode_hex(text)?)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Ed25519(_) => KeyAlgorithm::Ed25519,
            PublicKey::EcdsaSecp256k1(_) => KeyAlgorithm::EcdsaSecp256k1,
        }
    }

    /// `false` for a wrong, malformed or foreign signature; never an error
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            PublicKey::Ed25519(key) => key.verify(message, signature),
            PublicKey::EcdsaSecp256k1(key) => key.verify(message, signature),
        }
    }

    /// Raw bytes for Ed25519, DER for secp256k1
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(_) => self.to_bytes_raw(),
            PublicKey::EcdsaSecp256k1(_) => self.to_bytes_der(),
        }
    }

    /// 32 bytes for Ed25519, the 33-byte compressed point for secp256k1
    pub fn to_bytes_raw(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => key.to_bytes_raw().to_vec(),
            PublicKey::EcdsaSecp256k1(key) => key.to_bytes_raw().to_vec(),
        }
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => key.to_bytes_der(),
            PublicKey::EcdsaSecp256k1(key) => key.to_bytes_der(),
        }
    }

    pub fn to_string_raw(&self) -> String {
        hex::encode(self.to_bytes_raw())
    }

    pub fn to_string_der(&self) -> String {
        hex::encode(self.to_bytes_der())
    }

    /// Hex EVM address, without `0x`; only secp256k1 keys have one
    pub fn to_evm_address(&self) -> KeyResult<String> {
        match self {
            PublicKey::EcdsaSecp256k1(key) => Ok(hex::encode(key.to_evm_address())),
            PublicKey::Ed25519(_) => Err(KeyError::bad_key(
                "EVM addresses are only defined for secp256k1 keys",
            )),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_der())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Ed25519(key) => key.fmt(f),
            PublicKey::EcdsaSecp256k1(key) => key.fmt(f),
        }
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PublicKey::Ed25519(key)
    }
}

impl From<EcdsaPublicKey> for PublicKey {
    fn from(key: EcdsaPublicKey) -> Self {
        PublicKey::EcdsaSecp256k1(key)
    }
}
