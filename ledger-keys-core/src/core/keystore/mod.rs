//! Encrypted private key containers
//!
//! The keystore is a versioned JSON record: PBKDF2-HMAC-SHA256 derives a
//! 32-byte key, the first half encrypts the key bytes with AES-128-CTR and
//! the second half authenticates the ciphertext with HMAC-SHA384. The MAC
//! is checked before anything is decrypted.
//!
//! PKCS#8 import lives in [`pkcs8`].

pub mod pkcs8;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::encryption::EncryptionAlgorithm;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::core::crypto::password::{PasswordAlgorithm, PasswordConfig};
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::utils::{constant_time_eq, decode_hex, encode_hex};
use crate::shared::KeyResult;

#[derive(Debug, Serialize, Deserialize)]
struct Keystore {
    version: u64,
    crypto: KeystoreCrypto,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeystoreCrypto {
    ciphertext: String,
    cipherparams: CipherParams,
    cipher: String,
    kdf: String,
    kdfparams: KdfParams,
    mac: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CipherParams {
    iv: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct KdfParams {
    #[serde(rename = "dkLen")]
    dk_len: usize,
    salt: String,
    c: u32,
    prf: String,
}

/// Encrypt `private_key` under `passphrase`
pub fn create_keystore(
    backend: &dyn CryptoBackend,
    private_key: &[u8],
    passphrase: &str,
    config: &PasswordConfig,
) -> KeyResult<Vec<u8>> {
    config.validate()?;

    let mut salt = vec![0u8; config.salt_length];
    backend.fill_random(&mut salt)?;
    let mut iv = [0u8; KEYSTORE_IV_SIZE];
    backend.fill_random(&mut iv)?;

    let derived = backend.pbkdf2(
        config.algorithm.hash(),
        passphrase.as_bytes(),
        &salt,
        config.iterations,
        config.key_length,
    )?;
    let (cipher_key, mac_key) = derived.split_at(AES_128_KEY_SIZE);

    let ciphertext = backend.encrypt(EncryptionAlgorithm::AES128CTR, cipher_key, &iv, private_key)?;
    let mac = backend.hmac(HashAlgorithm::SHA384, mac_key, &ciphertext)?;

    let keystore = Keystore {
        version: u64::from(KEYSTORE_VERSION),
        crypto: KeystoreCrypto {
            ciphertext: encode_hex(&ciphertext),
            cipherparams: CipherParams { iv: encode_hex(&iv) },
            cipher: EncryptionAlgorithm::AES128CTR.name().to_string(),
            kdf: KEYSTORE_KDF.to_string(),
            kdfparams: KdfParams {
                dk_len: config.key_length,
                salt: encode_hex(&salt),
                c: config.iterations,
                prf: config.algorithm.keystore_name().to_string(),
            },
            mac: encode_hex(&mac),
        },
    };

    log::info!("Created keystore with {} PBKDF2 iterations", config.iterations);
    serde_json::to_vec(&keystore).map_err(|e| KeyError::internal(format!("keystore serialization failed: {}", e)))
}

/// Decrypt the key bytes of a keystore. A wrong passphrase is reported as
/// [`KeyError::KeyMismatch`].
///
/// Iteration counts above [`KEYSTORE_MAX_ITERATIONS`] are refused before any
/// key derivation runs.
pub fn load_keystore(backend: &dyn CryptoBackend, data: &[u8], passphrase: &str) -> KeyResult<Zeroizing<Vec<u8>>> {
    let keystore: Keystore = serde_json::from_slice(data)
        .map_err(|e| KeyError::bad_key(format!("keystore parsing failed: {}", e)))?;

    if keystore.version != u64::from(KEYSTORE_VERSION) {
        return Err(KeyError::config(format!(
            "unsupported keystore version: {}",
            keystore.version
        )));
    }
    let crypto = keystore.crypto;
    if crypto.kdf != KEYSTORE_KDF {
        return Err(KeyError::config(format!(
            "unsupported key derivation function: {}",
            crypto.kdf
        )));
    }
    let prf = PasswordAlgorithm::from_keystore_name(&crypto.kdfparams.prf)?;
    let cipher = EncryptionAlgorithm::from_name(&crypto.cipher)?;
    if crypto.kdfparams.dk_len != KEYSTORE_DK_LEN {
        return Err(KeyError::config(format!(
            "unsupported derived key length: {}",
            crypto.kdfparams.dk_len
        )));
    }

    if crypto.kdfparams.c == 0 || crypto.kdfparams.c > KEYSTORE_MAX_ITERATIONS {
        return Err(KeyError::config(format!(
            "unsupported PBKDF2 iteration count: {}",
            crypto.kdfparams.c
        )));
    }

    let salt = decode_hex(&crypto.kdfparams.salt)?;
    let iv = decode_hex(&crypto.cipherparams.iv)?;
    let ciphertext = decode_hex(&crypto.ciphertext)?;
    let mac = decode_hex(&crypto.mac)?;

    log::debug!("Loading keystore with {} PBKDF2 iterations", crypto.kdfparams.c);
    let derived = backend.pbkdf2(
        prf.hash(),
        passphrase.as_bytes(),
        &salt,
        crypto.kdfparams.c,
        crypto.kdfparams.dk_len,
    )?;
    let (cipher_key, mac_key) = derived.split_at(AES_128_KEY_SIZE);

    let expected = backend.hmac(HashAlgorithm::SHA384, mac_key, &ciphertext)?;
    if !constant_time_eq(&expected, &mac) {
        log::warn!("Keystore MAC verification failed");
        return Err(KeyError::key_mismatch("HMAC mismatch; passphrase is incorrect"));
    }

    Ok(Zeroizing::new(backend.decrypt(cipher, cipher_key, &iv, &ciphertext)?))
}

/// [`create_keystore`] on the blocking thread pool
pub async fn create_keystore_blocking(
    backend: &'static dyn CryptoBackend,
    private_key: Zeroizing<Vec<u8>>,
    passphrase: Zeroizing<String>,
    config: PasswordConfig,
) -> KeyResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || create_keystore(backend, &private_key, &passphrase, &config))
        .await?
}

/// [`load_keystore`] on the blocking thread pool
pub async fn load_keystore_blocking(
    backend: &'static dyn CryptoBackend,
    data: Vec<u8>,
    passphrase: Zeroizing<String>,
) -> KeyResult<Zeroizing<Vec<u8>>> {
    tokio::task::spawn_blocking(move || load_keystore(backend, &data, &passphrase))
        .await?
}
