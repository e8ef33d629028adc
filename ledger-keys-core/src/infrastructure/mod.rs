//! Infrastructure layer
//!
//! Runtime configuration and the wiring of the primitive backend chosen by it.

pub mod config;

pub use self::config::{BackendKind, KeyConfig};
