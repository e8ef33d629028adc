use crate::shared::constants::KEYSTORE_CIPHER;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// Symmetric cipher modes used by the keystore and PKCS8 import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    /// AES-128 in big-endian counter mode, no padding
    AES128CTR,
    /// AES-128 in CBC mode with PKCS#7 padding
    AES128CBC,
}

impl EncryptionAlgorithm {
    pub fn key_size(&self) -> usize {
        16
    }

    pub fn iv_size(&self) -> usize {
        16
    }

    /// Name used in the keystore `cipher` field
    pub fn name(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::AES128CTR => KEYSTORE_CIPHER,
            EncryptionAlgorithm::AES128CBC => "aes-128-cbc",
        }
    }

    pub fn from_name(name: &str) -> KeyResult<Self> {
        match name {
            KEYSTORE_CIPHER => Ok(EncryptionAlgorithm::AES128CTR),
            "aes-128-cbc" => Ok(EncryptionAlgorithm::AES128CBC),
            other => Err(KeyError::config(format!("unsupported cipher: {}", other))),
        }
    }
}
