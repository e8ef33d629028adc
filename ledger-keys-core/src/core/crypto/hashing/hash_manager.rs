use crate::shared::error::KeyError;
use crate::shared::KeyResult;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};
use sha3::Keccak256;
use super::HashAlgorithm;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Hash manager
pub struct HashManager;

impl HashManager {
    pub fn new() -> Self {
        Self
    }

    /// Hash data with specified algorithm
    pub fn hash(&self, data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
        match algorithm {
            HashAlgorithm::SHA256 => self.sha256(data).to_vec(),
            HashAlgorithm::SHA384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::SHA512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Keccak256 => self.keccak256(data).to_vec(),
        }
    }

    /// Hash data with SHA256
    pub fn sha256(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Hash data with Keccak256
    pub fn keccak256(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Keyed HMAC over `data`
    ///
    /// Keccak256 has no HMAC profile in this crate and is rejected.
    pub fn hmac(&self, algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        match algorithm {
            HashAlgorithm::SHA256 => {
                let mut mac = HmacSha256::new_from_slice(key)
                    .map_err(|e| KeyError::crypto(format!("HMAC-SHA256 key error: {}", e)))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HashAlgorithm::SHA384 => {
                let mut mac = HmacSha384::new_from_slice(key)
                    .map_err(|e| KeyError::crypto(format!("HMAC-SHA384 key error: {}", e)))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HashAlgorithm::SHA512 => {
                let mut mac = HmacSha512::new_from_slice(key)
                    .map_err(|e| KeyError::crypto(format!("HMAC-SHA512 key error: {}", e)))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HashAlgorithm::Keccak256 => Err(KeyError::crypto("HMAC is not supported for Keccak256")),
        }
    }
}

impl Default for HashManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let manager = HashManager::new();
        assert_eq!(
            hex::encode(manager.hash(b"abc", HashAlgorithm::SHA256)),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keccak256() {
        let manager = HashManager::new();
        assert_eq!(
            hex::encode(manager.hash(b"", HashAlgorithm::Keccak256)),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_output_sizes() {
        let manager = HashManager::new();
        for algorithm in [
            HashAlgorithm::SHA256,
            HashAlgorithm::SHA384,
            HashAlgorithm::SHA512,
            HashAlgorithm::Keccak256,
        ] {
            assert_eq!(manager.hash(b"data", algorithm).len(), algorithm.output_size());
        }
    }

    #[test]
    fn test_hmac_sha256_rfc4231_case2() {
        let manager = HashManager::new();
        let mac = manager
            .hmac(HashAlgorithm::SHA256, b"Jefe", b"what do ya want for nothing?")
            .unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_lengths() {
        let manager = HashManager::new();
        assert_eq!(manager.hmac(HashAlgorithm::SHA384, b"k", b"d").unwrap().len(), 48);
        assert_eq!(manager.hmac(HashAlgorithm::SHA512, b"k", b"d").unwrap().len(), 64);
        assert!(manager.hmac(HashAlgorithm::Keccak256, b"k", b"d").is_err());
    }
}
