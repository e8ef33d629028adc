//! Asymmetric keys
//!
//! Algorithm-specific key types plus the algorithm-agnostic [`PrivateKey`]
//! and [`PublicKey`] wrappers used by the rest of the crate.

pub mod ecdsa;
pub mod ed25519;
pub mod factory;
pub mod private_key;
pub mod public_key;

pub use ecdsa::*;
pub use ed25519::*;
pub use factory::*;
pub use private_key::*;
pub use public_key::*;
