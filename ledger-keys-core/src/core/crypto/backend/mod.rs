//! Pluggable cryptographic primitives
//!
//! Every algorithm in this crate takes a `&dyn CryptoBackend` rather than
//! reaching for a concrete implementation. The only implementation shipped is
//! [`SoftwareBackend`]; a platform integration supplies its own by implementing
//! the five primitive traits.

pub mod software;

pub use software::*;

use crate::core::crypto::encryption::EncryptionAlgorithm;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::KeyResult;
use zeroize::Zeroizing;

/// Source of cryptographically secure random bytes
pub trait RandomSource: Send + Sync {
    fn fill_random(&self, dest: &mut [u8]) -> KeyResult<()>;
}

/// Message digests
pub trait Hasher: Send + Sync {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>>;
}

/// Keyed HMAC
pub trait HmacSigner: Send + Sync {
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> KeyResult<Vec<u8>>;
}

/// PBKDF2 with an HMAC PRF
pub trait Pbkdf2: Send + Sync {
    fn pbkdf2(
        &self,
        algorithm: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
    ) -> KeyResult<Zeroizing<Vec<u8>>>;
}

/// AES block cipher modes
pub trait BlockCipher: Send + Sync {
    fn encrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>>;
    fn decrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>>;
}

/// Everything an algorithm may need
pub trait CryptoBackend: RandomSource + Hasher + HmacSigner + Pbkdf2 + BlockCipher {
    /// Upcast for callers that only need randomness
    fn as_random(&self) -> &dyn RandomSource;
}

impl<T: RandomSource + Hasher + HmacSigner + Pbkdf2 + BlockCipher> CryptoBackend for T {
    fn as_random(&self) -> &dyn RandomSource {
        self
    }
}

static SOFTWARE_BACKEND: SoftwareBackend = SoftwareBackend;

/// The pure-software backend, used by the convenience entry points
pub fn software() -> &'static SoftwareBackend {
    &SOFTWARE_BACKEND
}

/// Backend whose randomness replays a fixed byte sequence.
///
/// All other primitives delegate to [`SoftwareBackend`]. Intended for
/// deterministic tests of generation code paths.
#[cfg(test)]
pub struct FixedRandom {
    bytes: std::sync::Mutex<Vec<u8>>,
}

#[cfg(test)]
impl FixedRandom {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: std::sync::Mutex::new(bytes) }
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn fill_random(&self, dest: &mut [u8]) -> KeyResult<()> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| crate::shared::KeyError::internal("fixed random source poisoned"))?;
        if bytes.len() < dest.len() {
            return Err(crate::shared::KeyError::internal("fixed random source exhausted"));
        }
        let rest = bytes.split_off(dest.len());
        dest.copy_from_slice(&bytes);
        *bytes = rest;
        Ok(())
    }
}

#[cfg(test)]
impl Hasher for FixedRandom {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>> {
        software().digest(algorithm, data)
    }
}

#[cfg(test)]
impl HmacSigner for FixedRandom {
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        software().hmac(algorithm, key, data)
    }
}

#[cfg(test)]
impl Pbkdf2 for FixedRandom {
    fn pbkdf2(
        &self,
        algorithm: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
    ) -> KeyResult<Zeroizing<Vec<u8>>> {
        software().pbkdf2(algorithm, password, salt, iterations, key_length)
    }
}

#[cfg(test)]
impl BlockCipher for FixedRandom {
    fn encrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        software().encrypt(algorithm, key, iv, data)
    }

    fn decrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        software().decrypt(algorithm, key, iv, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_random_replays_bytes() {
        let backend = FixedRandom::new(vec![1, 2, 3, 4, 5]);
        let mut first = [0u8; 2];
        let mut second = [0u8; 3];
        backend.fill_random(&mut first).unwrap();
        backend.fill_random(&mut second).unwrap();
        assert_eq!(first, [1, 2]);
        assert_eq!(second, [3, 4, 5]);

        let mut more = [0u8; 1];
        assert!(backend.fill_random(&mut more).is_err());
    }

    #[test]
    fn test_backend_as_trait_object() {
        let backend: &dyn CryptoBackend = software();
        let digest = backend.digest(HashAlgorithm::SHA256, b"abc").unwrap();
        assert_eq!(digest.len(), 32);

        let mut bytes = [0u8; 16];
        backend.as_random().fill_random(&mut bytes).unwrap();
    }
}
