//! Ed25519 keys
//!
//! Private keys are held as 32-byte seeds (RFC 8032) plus an optional SLIP-10
//! chain code. Signatures are plain EdDSA over the raw message.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

use crate::core::crypto::backend::RandomSource;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// Ed25519 signing key with optional chain code
pub struct Ed25519PrivateKey {
    signing_key: SigningKey,
    chain_code: Option<Zeroizing<[u8; CHAIN_CODE_SIZE]>>,
}

impl Ed25519PrivateKey {
    /// Generate a new key from 64 random bytes.
    ///
    /// The first half seeds the signing key, the second half becomes the
    /// chain code, so generated keys are derivable.
    pub fn generate(rng: &dyn RandomSource) -> KeyResult<Self> {
        let mut entropy = Zeroizing::new([0u8; 64]);
        rng.fill_random(&mut entropy[..])?;

        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        seed.copy_from_slice(&entropy[..32]);
        let mut chain_code = [0u8; CHAIN_CODE_SIZE];
        chain_code.copy_from_slice(&entropy[32..]);

        Ok(Self::from_seed(&seed, Some(chain_code)))
    }

    pub fn from_seed(seed: &[u8; PRIVATE_KEY_SIZE], chain_code: Option<[u8; CHAIN_CODE_SIZE]>) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
            chain_code: chain_code.map(Zeroizing::new),
        }
    }

    /// Parse a 32-byte seed, a 48-byte DER document or a 64-byte secret||public pair
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        match data.len() {
            32 | 64 => Self::from_bytes_raw(data),
            48 => Self::from_bytes_der(data),
            len => Err(KeyError::bad_key(format!(
                "invalid private key length: {} bytes",
                len
            ))),
        }
    }

    pub fn from_bytes_raw(data: &[u8]) -> KeyResult<Self> {
        match data.len() {
            32 => {
                let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
                seed.copy_from_slice(data);
                Ok(Self::from_seed(&seed, None))
            }
            64 => {
                let mut pair = Zeroizing::new([0u8; ED25519_KEYPAIR_SIZE]);
                pair.copy_from_slice(data);
                // Rejects a public half that does not belong to the secret half
                let signing_key = SigningKey::from_keypair_bytes(&pair)?;
                Ok(Self {
                    signing_key,
                    chain_code: None,
                })
            }
            len => Err(KeyError::bad_key(format!(
                "invalid private key length: {} bytes",
                len
            ))),
        }
    }

    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        if data.len() != ED25519_PRIVATE_DER_PREFIX.len() + PRIVATE_KEY_SIZE {
            return Err(KeyError::bad_key(format!(
                "invalid private key length: {} bytes",
                data.len()
            )));
        }
        if !data.starts_with(&ED25519_PRIVATE_DER_PREFIX) {
            return Err(KeyError::bad_key("invalid Ed25519 private key DER prefix"));
        }
        Self::from_bytes_raw(&data[ED25519_PRIVATE_DER_PREFIX.len()..])
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            key: self.signing_key.verifying_key(),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; CHAIN_CODE_SIZE]> {
        self.chain_code.as_deref()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.signing_key.sign(message).to_bytes()
    }

    /// The 32-byte seed
    pub fn to_bytes_raw(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    pub fn to_bytes_der(&self) -> Zeroizing<Vec<u8>> {
        let mut der = Zeroizing::new(Vec::with_capacity(ED25519_PRIVATE_DER_PREFIX.len() + PRIVATE_KEY_SIZE));
        der.extend_from_slice(&ED25519_PRIVATE_DER_PREFIX);
        der.extend_from_slice(&self.to_bytes_raw()[..]);
        der
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public_key", &self.public_key())
            .field("derivable", &self.chain_code.is_some())
            .finish()
    }
}

/// Ed25519 verifying key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey {
    key: VerifyingKey,
}

impl Ed25519PublicKey {
    /// Parse 32 raw bytes or a 44-byte DER document
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        match data.len() {
            32 => Self::from_bytes_raw(data),
            44 => Self::from_bytes_der(data),
            len => Err(KeyError::bad_key(format!(
                "invalid public key length: {} bytes",
                len
            ))),
        }
    }

    pub fn from_bytes_raw(data: &[u8]) -> KeyResult<Self> {
        let bytes: [u8; ED25519_PUBLIC_KEY_SIZE] = data.try_into().map_err(|_| {
            KeyError::bad_key(format!("invalid public key length: {} bytes", data.len()))
        })?;
        Ok(Self {
            key: VerifyingKey::from_bytes(&bytes)?,
        })
    }

    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        if data.len() != ED25519_PUBLIC_DER_PREFIX.len() + ED25519_PUBLIC_KEY_SIZE {
            return Err(KeyError::bad_key(format!(
                "invalid public key length: {} bytes",
                data.len()
            )));
        }
        if !data.starts_with(&ED25519_PUBLIC_DER_PREFIX) {
            return Err(KeyError::bad_key("invalid Ed25519 public key DER prefix"));
        }
        Self::from_bytes_raw(&data[ED25519_PUBLIC_DER_PREFIX.len()..])
    }

    /// Check an EdDSA signature; malformed signatures yield `false`
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_slice(signature) {
            Ok(signature) => self.key.verify(message, &signature).is_ok(),
            Err(_) => false,
        }
    }

    pub fn to_bytes_raw(&self) -> [u8; ED25519_PUBLIC_KEY_SIZE] {
        self.key.to_bytes()
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(ED25519_PUBLIC_DER_PREFIX.len() + ED25519_PUBLIC_KEY_SIZE);
        der.extend_from_slice(&ED25519_PUBLIC_DER_PREFIX);
        der.extend_from_slice(&self.to_bytes_raw());
        der
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", hex::encode(self.to_bytes_raw()))
    }
}
