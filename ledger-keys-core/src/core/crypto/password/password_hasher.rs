use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;
use pbkdf2::pbkdf2;
use zeroize::Zeroizing;

/// PBKDF2 key derivation over the HMAC variants the crate uses
pub struct PasswordKeyDeriver;

impl PasswordKeyDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Derive `key_length` bytes from `password` and `salt`
    pub fn derive_key(
        &self,
        algorithm: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
    ) -> KeyResult<Zeroizing<Vec<u8>>> {
        if iterations == 0 {
            return Err(KeyError::crypto("PBKDF2 iteration count must be at least 1"));
        }

        let mut key = Zeroizing::new(vec![0u8; key_length]);
        match algorithm {
            HashAlgorithm::SHA256 => pbkdf2::<hmac::Hmac<sha2::Sha256>>(password, salt, iterations, &mut key),
            HashAlgorithm::SHA384 => pbkdf2::<hmac::Hmac<sha2::Sha384>>(password, salt, iterations, &mut key),
            HashAlgorithm::SHA512 => pbkdf2::<hmac::Hmac<sha2::Sha512>>(password, salt, iterations, &mut key),
            HashAlgorithm::Keccak256 => {
                return Err(KeyError::crypto("PBKDF2 is not supported with Keccak256"));
            }
        }
        .map_err(|e| KeyError::crypto(format!("PBKDF2 error: {:?}", e)))?;

        Ok(key)
    }
}

impl Default for PasswordKeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}
