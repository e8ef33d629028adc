use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::constants::{KEYSTORE_PRF, OID_HMAC_SHA256};
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// Pseudo-random functions accepted for PBKDF2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordAlgorithm {
    HmacSha256,
    HmacSha512,
}

impl PasswordAlgorithm {
    pub fn hash(&self) -> HashAlgorithm {
        match self {
            PasswordAlgorithm::HmacSha256 => HashAlgorithm::SHA256,
            PasswordAlgorithm::HmacSha512 => HashAlgorithm::SHA512,
        }
    }

    /// Name used in the keystore `kdfparams.prf` field
    pub fn keystore_name(&self) -> &'static str {
        match self {
            PasswordAlgorithm::HmacSha256 => KEYSTORE_PRF,
            PasswordAlgorithm::HmacSha512 => "hmac-sha512",
        }
    }

    /// Only HMAC-SHA256 is accepted in keystores
    pub fn from_keystore_name(name: &str) -> KeyResult<Self> {
        match name {
            KEYSTORE_PRF => Ok(PasswordAlgorithm::HmacSha256),
            other => Err(KeyError::config(format!(
                "unsupported key derivation hash function: {}",
                other
            ))),
        }
    }

    /// Only HMAC-SHA256 is accepted in PKCS8 PBKDF2 parameters
    pub fn from_oid(oid: &str) -> KeyResult<Self> {
        if oid == OID_HMAC_SHA256 {
            Ok(PasswordAlgorithm::HmacSha256)
        } else {
            Err(KeyError::bad_key(format!("unsupported PRF {}", oid)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keystore_names() {
        let prf = PasswordAlgorithm::from_keystore_name("hmac-sha256").unwrap();
        assert_eq!(prf, PasswordAlgorithm::HmacSha256);
        assert_eq!(prf.keystore_name(), "hmac-sha256");
        assert!(matches!(
            PasswordAlgorithm::from_keystore_name("hmac-sha1"),
            Err(KeyError::Config(_))
        ));
    }

    #[test]
    fn test_from_oid() {
        assert_eq!(PasswordAlgorithm::from_oid("1.2.840.113549.2.9").unwrap(), PasswordAlgorithm::HmacSha256);
        let err = PasswordAlgorithm::from_oid("1.2.840.113549.2.7").unwrap_err();
        assert!(err.to_string().contains("1.2.840.113549.2.7"));
    }
}
