//! SLIP-10 derivation for Ed25519
//!
//! Only hardened children exist for Ed25519; every index is hardened here
//! regardless of what the caller passes.

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::constants::{CHAIN_CODE_SIZE, HARDENED_BIT, PRIVATE_KEY_SIZE, SLIP10_SEED_KEY};
use crate::shared::KeyResult;
use zeroize::Zeroizing;

use super::ChildKey;

/// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
pub fn master_key(backend: &dyn CryptoBackend, seed: &[u8]) -> KeyResult<ChildKey> {
    let output = Zeroizing::new(backend.hmac(HashAlgorithm::SHA512, SLIP10_SEED_KEY, seed)?);
    ChildKey::from_hmac_output(&output)
}

/// I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index | 2^31))
///
/// `index` is hardened implicitly, so `i` and `i | 2^31` select the same
/// child. Callers that must refuse pre-hardened input check it themselves.
pub fn derive(
    backend: &dyn CryptoBackend,
    key: &[u8; PRIVATE_KEY_SIZE],
    chain_code: &[u8; CHAIN_CODE_SIZE],
    index: u32,
) -> KeyResult<ChildKey> {
    let mut data = Zeroizing::new([0u8; 37]);
    data[1..33].copy_from_slice(key);
    data[33..].copy_from_slice(&(index | HARDENED_BIT).to_be_bytes());

    let output = Zeroizing::new(backend.hmac(HashAlgorithm::SHA512, chain_code, &data[..])?);
    ChildKey::from_hmac_output(&output)
}

/// Master key followed by each path element
pub fn derive_path(backend: &dyn CryptoBackend, seed: &[u8], indices: &[u32]) -> KeyResult<ChildKey> {
    let mut current = master_key(backend, seed)?;
    for index in indices {
        current = derive(backend, &current.key, &current.chain_code, *index)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::backend::software;

    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    // SLIP-0010 test vector 1 for ed25519
    #[test]
    fn test_master_key() {
        let master = master_key(software(), &hex::decode(SEED).unwrap()).unwrap();
        assert_eq!(
            hex::encode(*master.key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_first_hardened_child() {
        let child = derive_path(software(), &hex::decode(SEED).unwrap(), &[0]).unwrap();
        assert_eq!(
            hex::encode(*child.key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }

    #[test]
    fn test_index_is_always_hardened() {
        let seed = hex::decode(SEED).unwrap();
        let normal = derive_path(software(), &seed, &[44, 3030]).unwrap();
        let hardened = derive_path(software(), &seed, &[44 | HARDENED_BIT, 3030 | HARDENED_BIT]).unwrap();
        assert_eq!(*normal.key, *hardened.key);
        assert_eq!(normal.chain_code, hardened.chain_code);
    }

    #[test]
    fn test_derive_accepts_pre_hardened_index() {
        let master = master_key(software(), &hex::decode(SEED).unwrap()).unwrap();
        let plain = derive(software(), &master.key, &master.chain_code, 0).unwrap();
        let hardened = derive(software(), &master.key, &master.chain_code, HARDENED_BIT).unwrap();
        assert_eq!(*plain.key, *hardened.key);
        assert_eq!(
            hex::encode(*hardened.key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }
}
