use super::PasswordAlgorithm;
use crate::shared::constants::{KEYSTORE_DK_LEN, KEYSTORE_ITERATIONS, KEYSTORE_MAX_ITERATIONS, KEYSTORE_SALT_SIZE};
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// PBKDF2 configuration for keystore encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub algorithm: PasswordAlgorithm,
    pub salt_length: usize,
    pub iterations: u32,
    pub key_length: usize,
}

impl PasswordConfig {
    /// Keystore defaults with a custom iteration count
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> KeyResult<()> {
        if self.iterations == 0 {
            return Err(KeyError::config("PBKDF2 iteration count must be at least 1"));
        }
        if self.iterations > KEYSTORE_MAX_ITERATIONS {
            return Err(KeyError::config(format!(
                "PBKDF2 iteration count must not exceed {}",
                KEYSTORE_MAX_ITERATIONS
            )));
        }
        if self.key_length != KEYSTORE_DK_LEN {
            return Err(KeyError::config(format!(
                "keystore derived key length must be {} bytes",
                KEYSTORE_DK_LEN
            )));
        }
        if self.salt_length == 0 {
            return Err(KeyError::config("salt length must be at least 1 byte"));
        }
        Ok(())
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::HmacSha256,
            salt_length: KEYSTORE_SALT_SIZE,
            iterations: KEYSTORE_ITERATIONS,
            key_length: KEYSTORE_DK_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_config_default() {
        let config = PasswordConfig::default();
        assert_eq!(config.salt_length, 32);
        assert_eq!(config.iterations, 262_144);
        assert_eq!(config.key_length, 32);
        assert_eq!(config.algorithm, PasswordAlgorithm::HmacSha256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_password_config_validation() {
        assert!(PasswordConfig::with_iterations(0).validate().is_err());
        assert!(PasswordConfig::with_iterations(1).validate().is_ok());
        assert!(PasswordConfig::with_iterations(10_000_000).validate().is_ok());
        assert!(PasswordConfig::with_iterations(10_000_001).validate().is_err());

        let config = PasswordConfig {
            key_length: 16,
            ..PasswordConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
