//! Error handling for the key management core
//!
//! This module defines the error types used throughout the crate. Every
//! cryptographic boundary returns a [`KeyResult`] and fails closed: a caller
//! either receives a fully validated key or one of these errors.

use std::fmt;
use thiserror::Error;

/// Key management error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Bad key: {0}")]
    BadKey(String),

    #[error(transparent)]
    BadMnemonic(#[from] BadMnemonicError),

    #[error("Key mismatch: {0}")]
    KeyMismatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KeyError {
    /// Create a bad key error
    pub fn bad_key(message: impl Into<String>) -> Self {
        Self::BadKey(message.into())
    }

    /// Create a key mismatch error
    pub fn key_mismatch(message: impl Into<String>) -> Self {
        Self::KeyMismatch(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a derivation error
    pub fn derivation(message: impl Into<String>) -> Self {
        Self::Derivation(message.into())
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Reason of a mnemonic failure, if this is one
    pub fn mnemonic_reason(&self) -> Option<MnemonicErrorReason> {
        match self {
            Self::BadMnemonic(err) => Some(err.reason),
            _ => None,
        }
    }
}

/// Why a mnemonic was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicErrorReason {
    BadLength,
    UnknownWords,
    ChecksumMismatch,
}

impl fmt::Display for MnemonicErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength => write!(f, "mnemonic has an invalid number of words"),
            Self::UnknownWords => write!(f, "mnemonic contains words that are not in the word list"),
            Self::ChecksumMismatch => write!(f, "mnemonic checksum does not match"),
        }
    }
}

/// Classified mnemonic failure.
///
/// For [`MnemonicErrorReason::UnknownWords`] the offending word positions are
/// carried so callers can highlight them without re-validating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Bad mnemonic: {reason}")]
pub struct BadMnemonicError {
    pub reason: MnemonicErrorReason,
    pub unknown_word_indices: Vec<usize>,
}

impl BadMnemonicError {
    pub fn bad_length() -> Self {
        Self {
            reason: MnemonicErrorReason::BadLength,
            unknown_word_indices: Vec::new(),
        }
    }

    pub fn unknown_words(indices: Vec<usize>) -> Self {
        Self {
            reason: MnemonicErrorReason::UnknownWords,
            unknown_word_indices: indices,
        }
    }

    pub fn checksum_mismatch() -> Self {
        Self {
            reason: MnemonicErrorReason::ChecksumMismatch,
            unknown_word_indices: Vec::new(),
        }
    }
}

// Library error conversions
impl From<hex::FromHexError> for KeyError {
    fn from(err: hex::FromHexError) -> Self {
        Self::encoding(format!("Hex decoding error: {}", err))
    }
}

impl From<base64::DecodeError> for KeyError {
    fn from(err: base64::DecodeError) -> Self {
        Self::encoding(format!("Base64 decoding error: {}", err))
    }
}

impl From<serde_json::Error> for KeyError {
    fn from(err: serde_json::Error) -> Self {
        Self::encoding(format!("JSON error: {}", err))
    }
}

impl From<bip39::Error> for KeyError {
    fn from(err: bip39::Error) -> Self {
        Self::internal(format!("BIP-39 error: {}", err))
    }
}

impl From<secp256k1::Error> for KeyError {
    fn from(err: secp256k1::Error) -> Self {
        Self::bad_key(format!("secp256k1 error: {}", err))
    }
}

impl From<ed25519_dalek::SignatureError> for KeyError {
    fn from(err: ed25519_dalek::SignatureError) -> Self {
        Self::bad_key(format!("Ed25519 error: {}", err))
    }
}

impl From<tokio::task::JoinError> for KeyError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

impl From<config::ConfigError> for KeyError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Result type for key management operations
pub type KeyResult<T> = Result<T, KeyError>;
