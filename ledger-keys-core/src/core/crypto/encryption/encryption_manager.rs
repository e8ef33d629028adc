use crate::shared::error::KeyError;
use crate::shared::KeyResult;
use ctr::cipher::block_padding::Pkcs7;
use ctr::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use super::EncryptionAlgorithm;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// AES encryption manager
pub struct EncryptionManager;

impl EncryptionManager {
    pub fn new() -> Self {
        Self
    }

    /// Encrypt `data` under `key` and `iv`
    pub fn encrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        Self::check_sizes(algorithm, key, iv)?;
        match algorithm {
            EncryptionAlgorithm::AES128CTR => self.apply_ctr(key, iv, data),
            EncryptionAlgorithm::AES128CBC => {
                let cipher = Aes128CbcEnc::new_from_slices(key, iv)
                    .map_err(|e| KeyError::crypto(format!("AES-128-CBC init failed: {}", e)))?;
                Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
            }
        }
    }

    /// Decrypt `data` under `key` and `iv`
    pub fn decrypt(&self, algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        Self::check_sizes(algorithm, key, iv)?;
        match algorithm {
            EncryptionAlgorithm::AES128CTR => self.apply_ctr(key, iv, data),
            EncryptionAlgorithm::AES128CBC => {
                let cipher = Aes128CbcDec::new_from_slices(key, iv)
                    .map_err(|e| KeyError::crypto(format!("AES-128-CBC init failed: {}", e)))?;
                cipher
                    .decrypt_padded_vec_mut::<Pkcs7>(data)
                    .map_err(|_| KeyError::crypto("AES-128-CBC decryption failed: bad padding"))
            }
        }
    }

    // CTR is its own inverse
    fn apply_ctr(&self, key: &[u8], iv: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        let mut cipher = Aes128Ctr::new_from_slices(key, iv)
            .map_err(|e| KeyError::crypto(format!("AES-128-CTR init failed: {}", e)))?;
        let mut buffer = data.to_vec();
        cipher.apply_keystream(&mut buffer);
        Ok(buffer)
    }

    fn check_sizes(algorithm: EncryptionAlgorithm, key: &[u8], iv: &[u8]) -> KeyResult<()> {
        if key.len() != algorithm.key_size() {
            return Err(KeyError::crypto(format!(
                "{:?} requires a {}-byte key, got {}",
                algorithm,
                algorithm.key_size(),
                key.len()
            )));
        }
        if iv.len() != algorithm.iv_size() {
            return Err(KeyError::crypto(format!(
                "{:?} requires a {}-byte IV, got {}",
                algorithm,
                algorithm.iv_size(),
                iv.len()
            )));
        }
        Ok(())
    }
}

impl Default for EncryptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST SP 800-38A F.5.1 (CTR-AES128.Encrypt), first block
    #[test]
    fn test_ctr_known_answer() {
        let manager = EncryptionManager::new();
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ciphertext = manager.encrypt(EncryptionAlgorithm::AES128CTR, &key, &iv, &plaintext).unwrap();
        assert_eq!(hex::encode(&ciphertext), "874d6191b620e3261bef6864990db6ce");

        let decrypted = manager.decrypt(EncryptionAlgorithm::AES128CTR, &key, &iv, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    // NIST SP 800-38A F.2.1 (CBC-AES128.Encrypt), first block before padding
    #[test]
    fn test_cbc_known_answer() {
        let manager = EncryptionManager::new();
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ciphertext = manager.encrypt(EncryptionAlgorithm::AES128CBC, &key, &iv, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(hex::encode(&ciphertext[..16]), "7649abac8119b246cee98e9b12e9197d");

        let decrypted = manager.decrypt(EncryptionAlgorithm::AES128CBC, &key, &iv, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_cbc_bad_padding() {
        let manager = EncryptionManager::new();
        let key = [7u8; 16];
        let iv = [9u8; 16];
        let ciphertext = manager.encrypt(EncryptionAlgorithm::AES128CBC, &key, &iv, b"secret").unwrap();

        let wrong_key = [8u8; 16];
        // A wrong key almost always yields invalid padding
        let result = manager.decrypt(EncryptionAlgorithm::AES128CBC, &wrong_key, &iv, &ciphertext);
        if let Ok(plaintext) = result {
            assert_ne!(plaintext, b"secret");
        }
    }

    #[test]
    fn test_invalid_sizes() {
        let manager = EncryptionManager::new();
        assert!(manager.encrypt(EncryptionAlgorithm::AES128CTR, &[0u8; 32], &[0u8; 16], b"x").is_err());
        assert!(manager.encrypt(EncryptionAlgorithm::AES128CBC, &[0u8; 16], &[0u8; 12], b"x").is_err());
    }
}
