//! BIP-32 derivation for secp256k1
//!
//! Supports hardened and normal children. When `IL` is not a valid scalar or
//! the child key would be zero, derivation moves on to the next index as
//! BIP-32 prescribes.

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

use super::ChildKey;

pub fn is_hardened(index: u32) -> bool {
    index & HARDENED_BIT != 0
}

pub fn to_hardened_index(index: u32) -> u32 {
    index | HARDENED_BIT
}

/// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
pub fn master_key(backend: &dyn CryptoBackend, seed: &[u8]) -> KeyResult<ChildKey> {
    if seed.len() < BIP32_MIN_SEED_SIZE || seed.len() > BIP32_MAX_SEED_SIZE {
        return Err(KeyError::bad_key(format!(
            "BIP-32 seed must be between {} and {} bytes, got {}",
            BIP32_MIN_SEED_SIZE,
            BIP32_MAX_SEED_SIZE,
            seed.len()
        )));
    }

    let output = Zeroizing::new(backend.hmac(HashAlgorithm::SHA512, BIP32_SEED_KEY, seed)?);
    let master = ChildKey::from_hmac_output(&output)?;
    SecretKey::from_byte_array(*master.key)
        .map_err(|_| KeyError::derivation("seed produces an invalid BIP-32 master key"))?;
    Ok(master)
}

/// Derive child `index` of `(key, chain_code)`
pub fn derive(
    backend: &dyn CryptoBackend,
    key: &[u8; PRIVATE_KEY_SIZE],
    chain_code: &[u8; CHAIN_CODE_SIZE],
    index: u32,
) -> KeyResult<ChildKey> {
    let secp = Secp256k1::new();
    let parent = SecretKey::from_byte_array(*key)
        .map_err(|_| KeyError::bad_key("invalid secp256k1 parent key"))?;
    let parent_public = PublicKey::from_secret_key(&secp, &parent).serialize();

    let mut index = index;
    loop {
        let mut data = Zeroizing::new([0u8; 37]);
        if is_hardened(index) {
            // 0x00 || ser256(kpar) || ser32(i)
            data[1..33].copy_from_slice(key);
        } else {
            // serP(Kpar) || ser32(i)
            data[..33].copy_from_slice(&parent_public);
        }
        data[33..].copy_from_slice(&index.to_be_bytes());

        let output = Zeroizing::new(backend.hmac(HashAlgorithm::SHA512, chain_code, &data[..])?);
        let candidate = ChildKey::from_hmac_output(&output)?;

        // parse256(IL) >= n or ki == 0: proceed with the next index
        let child = Scalar::from_be_bytes(*candidate.key)
            .ok()
            .and_then(|tweak| parent.add_tweak(&tweak).ok());

        match child {
            Some(child) => {
                log::debug!("BIP-32 child derived at index {:#010x}", index);
                return Ok(ChildKey {
                    key: Zeroizing::new(child.secret_bytes()),
                    chain_code: candidate.chain_code,
                });
            }
            None => {
                log::warn!("BIP-32 index {:#010x} yields an invalid key, trying next index", index);
                index = index
                    .checked_add(1)
                    .ok_or_else(|| KeyError::derivation("BIP-32 child index space exhausted"))?;
            }
        }
    }
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

    // BIP-32 test vector 1
    #[test]
    fn test_master_key() {
        let master = master_key(software(), &hex::decode(SEED).unwrap()).unwrap();
        assert_eq!(
            hex::encode(*master.key),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    #[test]
    fn test_hardened_then_normal_child() {
        let seed = hex::decode(SEED).unwrap();

        let hardened = derive_path(software(), &seed, &[to_hardened_index(0)]).unwrap();
        assert_eq!(
            hex::encode(*hardened.key),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );

        let normal = derive_path(software(), &seed, &[to_hardened_index(0), 1]).unwrap();
        assert_eq!(
            hex::encode(*normal.key),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
        assert_eq!(
            hex::encode(normal.chain_code),
            "2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19"
        );
    }

    #[test]
    fn test_matches_bip32_crate() {
        use ::bip32::{ChildNumber, XPrv};

        let seed = [0x42u8; 64];
        let path = [to_hardened_index(44), to_hardened_index(3030), to_hardened_index(0), 0, 7];

        let mut expected = XPrv::new(seed).expect("Failed to create XPrv");
        for index in path {
            expected = expected
                .derive_child(ChildNumber(index))
                .expect("Failed to derive child XPrv");
        }

        let derived = derive_path(software(), &seed, &path).unwrap();
        assert_eq!(derived.key.to_vec(), expected.private_key().to_bytes().to_vec());
        assert_eq!(derived.chain_code, expected.attrs().chain_code);
    }

    #[test]
    fn test_seed_length_bounds() {
        assert!(master_key(software(), &[0u8; 15]).is_err());
        assert!(master_key(software(), &[0u8; 65]).is_err());
        assert!(master_key(software(), &[1u8; 16]).is_ok());
    }

    #[test]
    fn test_hardening_helpers() {
        assert!(is_hardened(0x8000_0000));
        assert!(!is_hardened(0x7fff_ffff));
        assert_eq!(to_hardened_index(44), 0x8000_002c);
    }
}
