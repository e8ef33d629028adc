//! Cryptographic functionality for the key management core
//!
//! This module provides the primitive backend, hashing, symmetric encryption,
//! password-based key derivation and the Ed25519/secp256k1 key types.
//!
//! SECURITY: private key material is zeroized on drop and is never written
//! to `Debug` output or logs.

pub mod backend;
pub mod keys;
pub mod encryption;
pub mod hashing;
pub mod password;

// Re-export all public items from submodules
pub use backend::*;
pub use keys::*;
pub use encryption::*;
pub use hashing::*;
pub use password::*;
