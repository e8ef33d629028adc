use super::{BlockCipher, Hasher, HmacSigner, Pbkdf2, RandomSource};
use crate::core::crypto::encryption::{EncryptionAlgorithm, EncryptionManager};
use crate::core::crypto::hashing::{HashAlgorithm, HashManager};
use crate::core::crypto::password::PasswordKeyDeriver;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

/// Pure-Rust implementation of every primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareBackend;

impl RandomSource for SoftwareBackend {
    fn fill_random(&self, dest: &mut [u8]) -> KeyResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| KeyError::crypto(format!("secure random source failed: {}", e)))
    }
}

impl Hasher for SoftwareBackend {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>> {
        Ok(HashManager::new().hash(data, algorithm))
    }
}

impl HmacSigner for SoftwareBackend {
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        HashManager::new().hmac(algorithm, key, data)
    }
}

impl Pbkdf2 for SoftwareBackend {
    fn pbkdf2(
        &self,
        algorithm: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
    ) -> KeyResult<Zeroizing<Vec<u8>>> {
        PasswordKeyDeriver::new().derive_key(algorithm, password, salt, iterations, key_length)
    }
}

impl BlockCipher for SoftwareBackend {
    fn encrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        EncryptionManager::new().encrypt(algorithm, key, iv, data)
    }

    fn decrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        EncryptionManager::new().decrypt(algorithm, key, iv, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_differ() {
        let backend = SoftwareBackend;
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        backend.fill_random(&mut a).unwrap();
        backend.fill_random(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_backend_delegates() {
        let backend = SoftwareBackend;
        let key = [1u8; 16];
        let iv = [2u8; 16];
        let ciphertext = backend.encrypt(EncryptionAlgorithm::AES128CTR, &key, &iv, b"payload").unwrap();
        let plaintext = backend.decrypt(EncryptionAlgorithm::AES128CTR, &key, &iv, &ciphertext).unwrap();
        assert_eq!(plaintext, b"payload");

        let mac = backend.hmac(HashAlgorithm::SHA384, b"key", b"data").unwrap();
        assert_eq!(mac.len(), 48);

        let derived = backend.pbkdf2(HashAlgorithm::SHA256, b"pw", b"salt", 1, 32).unwrap();
        assert_eq!(derived.len(), 32);
    }
}
