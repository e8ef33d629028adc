//! Pre-SLIP-10 derivation
//!
//! Kept only to recover keys created by wallets that predate hierarchical
//! derivation. New keys must never be derived this way.

use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// PBKDF2-HMAC-SHA512(seed || be64(index), salt = [0xFF], 2048 rounds, 32 bytes)
///
/// The index is signed: `-1` maps to `ff..ff`, and values up to 40 bits wide
/// are valid.
pub fn derive(backend: &dyn CryptoBackend, seed: &[u8], index: i64) -> KeyResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    if seed.len() != PRIVATE_KEY_SIZE {
        return Err(KeyError::bad_key(format!(
            "legacy derivation requires a 32-byte seed, got {}",
            seed.len()
        )));
    }

    let mut password = Zeroizing::new(Vec::with_capacity(PRIVATE_KEY_SIZE + 8));
    password.extend_from_slice(seed);
    password.extend_from_slice(&index.to_be_bytes());

    let derived = backend.pbkdf2(
        HashAlgorithm::SHA512,
        &password,
        &LEGACY_DERIVE_SALT,
        LEGACY_DERIVE_ITERATIONS,
        PRIVATE_KEY_SIZE,
    )?;

    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    key.copy_from_slice(&derived);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::backend::software;

    #[test]
    fn test_index_encoding_changes_output() {
        let seed = [7u8; 32];
        let zero = derive(software(), &seed, 0).unwrap();
        let minus_one = derive(software(), &seed, -1).unwrap();
        let wide = derive(software(), &seed, 0xff_ffff_ffff).unwrap();
        assert_ne!(*zero, *minus_one);
        assert_ne!(*zero, *wide);
        assert_eq!(*zero, *derive(software(), &seed, 0).unwrap());
    }

    #[test]
    fn test_requires_32_byte_seed() {
        assert!(derive(software(), &[0u8; 31], 0).is_err());
    }
}
