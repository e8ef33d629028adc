//! Hashing functionality for the key management core
//!
//! This module handles SHA-2, Keccak-256 and the HMAC constructions built on them.

pub mod hash_manager;
pub mod hash_algorithm;

// Re-export all public items from submodules
pub use hash_manager::*;
pub use hash_algorithm::*;
