//! Constants for the key management core
//!
//! This module contains all byte-exact constants used throughout the crate.

// Key sizes
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const CHAIN_CODE_SIZE: usize = 32;
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;
pub const ED25519_KEYPAIR_SIZE: usize = 64;
pub const ECDSA_COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;
pub const ECDSA_UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;
pub const SIGNATURE_SIZE: usize = 64;
pub const EVM_ADDRESS_SIZE: usize = 20;

// DER prefixes
pub const ED25519_PRIVATE_DER_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];
pub const ED25519_PUBLIC_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];
pub const ECDSA_PRIVATE_DER_PREFIX: [u8; 18] = [
    0x30, 0x30, 0x02, 0x01, 0x00, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x04, 0x22,
    0x04, 0x20,
];
pub const ECDSA_PUBLIC_DER_PREFIX: [u8; 14] = [
    0x30, 0x2d, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];
/// id-ecPublicKey + secp256k1 SubjectPublicKeyInfo prefix, accepted on import only
pub const ECDSA_PUBLIC_DER_PREFIX_SPKI: [u8; 23] = [
    0x30, 0x36, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05, 0x2b,
    0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

// Object identifiers
pub const OID_PBES2: &str = "1.2.840.113549.1.5.13";
pub const OID_PBKDF2: &str = "1.2.840.113549.1.5.12";
pub const OID_HMAC_SHA256: &str = "1.2.840.113549.2.9";
pub const OID_AES_128_CBC: &str = "2.16.840.1.101.3.4.1.2";
pub const OID_ED25519: &str = "1.3.101.112";
pub const OID_SECP256K1: &str = "1.3.132.0.10";
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

// Derivation
pub const SLIP10_SEED_KEY: &[u8] = b"ed25519 seed";
pub const BIP32_SEED_KEY: &[u8] = b"Bitcoin seed";
pub const HARDENED_BIT: u32 = 0x8000_0000;
pub const LEDGER_COIN_TYPE: u32 = 3030;
pub const ETH_COIN_TYPE: u32 = 60;
pub const BIP44_PURPOSE: u32 = 44;
pub const BIP32_MIN_SEED_SIZE: usize = 16;
pub const BIP32_MAX_SEED_SIZE: usize = 64;
pub const LEGACY_DERIVE_SALT: [u8; 1] = [0xff];
pub const LEGACY_DERIVE_ITERATIONS: u32 = 2048;

// Mnemonic
pub const MNEMONIC_SEED_ITERATIONS: u32 = 2048;
pub const MNEMONIC_SEED_SIZE: usize = 64;
pub const MNEMONIC_SALT_PREFIX: &str = "mnemonic";
pub const BIP39_WORD_COUNT: usize = 2048;
pub const LEGACY_WORD_COUNT: usize = 1600;
pub const LEGACY_MNEMONIC_WORDS: usize = 22;
pub const LEGACY_ENTROPY_SIZE: usize = 32;
pub const STANDARD_MNEMONIC_LENGTHS: [usize; 2] = [12, 24];

// Keystore
pub const KEYSTORE_VERSION: u32 = 1;
pub const KEYSTORE_CIPHER: &str = "aes-128-ctr";
pub const KEYSTORE_KDF: &str = "pbkdf2";
pub const KEYSTORE_PRF: &str = "hmac-sha256";
pub const KEYSTORE_ITERATIONS: u32 = 262_144;
/// Largest iteration count accepted when loading a keystore
pub const KEYSTORE_MAX_ITERATIONS: u32 = 10_000_000;
pub const KEYSTORE_DK_LEN: usize = 32;
pub const KEYSTORE_SALT_SIZE: usize = 32;
pub const KEYSTORE_IV_SIZE: usize = 16;
pub const AES_128_KEY_SIZE: usize = 16;

// PKCS8
pub const PKCS8_DEFAULT_KEY_LENGTH: usize = 16;

// PEM section labels
pub const PEM_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
pub const PEM_ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
pub const PEM_EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
