//! Core key management functionality
//!
//! Cryptographic primitives and key types, byte encodings, mnemonic
//! phrases, hierarchical derivation and encrypted key containers.

pub mod crypto;
pub mod derivation;
pub mod encoding;
pub mod keystore;
pub mod mnemonic;
