//! Password-based key derivation for the key management core
//!
//! This module handles PBKDF2 and the PRF identifiers accepted in keystores and PKCS8.

pub mod password_hasher;
pub mod password_config;
pub mod password_algorithm;

// Re-export all public items from submodules
pub use password_hasher::*;
pub use password_config::*;
pub use password_algorithm::*;
