//! Encryption functionality for the key management core
//!
//! This module handles AES-128-CTR (keystore) and AES-128-CBC (PKCS8 PBES2).

pub mod encryption_manager;
pub mod encryption_algorithm;

// Re-export all public items from submodules
pub use encryption_manager::*;
pub use encryption_algorithm::*;
