//! Runtime configuration
//!
//! Values are layered: built-in defaults, then an optional
//! `ledger-keys.toml`, then `LEDGER_KEYS_*` environment variables (a `.env`
//! file is loaded first if present).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::crypto::backend::{software, CryptoBackend};
use crate::core::crypto::password::PasswordConfig;
use crate::core::mnemonic::Mnemonic;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

pub const CONFIG_FILE_NAME: &str = "ledger-keys";
pub const ENV_PREFIX: &str = "LEDGER_KEYS";

/// Primitive implementation selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Software,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    pub keystore_iterations: u32,
    pub default_mnemonic_words: usize,
    pub log_level: String,
    pub backend: BackendKind,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            keystore_iterations: KEYSTORE_ITERATIONS,
            default_mnemonic_words: 24,
            log_level: "info".to_string(),
            backend: BackendKind::Software,
        }
    }
}

impl KeyConfig {
    /// Defaults, `ledger-keys.toml` in the working directory, then the environment
    pub fn load() -> KeyResult<Self> {
        dotenv::dotenv().ok();
        Self::build(config::File::with_name(CONFIG_FILE_NAME).required(false))
    }

    /// Same layering with an explicit configuration file
    pub fn load_from(path: &Path) -> KeyResult<Self> {
        dotenv::dotenv().ok();
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> KeyResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("keystore_iterations", i64::from(defaults.keystore_iterations))?
            .set_default("default_mnemonic_words", defaults.default_mnemonic_words as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("backend", "software")?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: KeyConfig = settings.try_deserialize()?;
        loaded.validate()?;
        log::debug!("Loaded configuration: {:?}", loaded);
        Ok(loaded)
    }

    pub fn validate(&self) -> KeyResult<()> {
        if self.keystore_iterations == 0 {
            return Err(KeyError::config("keystore_iterations must be at least 1"));
        }
        if self.keystore_iterations > KEYSTORE_MAX_ITERATIONS {
            return Err(KeyError::config(format!(
                "keystore_iterations must not exceed {}",
                KEYSTORE_MAX_ITERATIONS
            )));
        }
        if !STANDARD_MNEMONIC_LENGTHS.contains(&self.default_mnemonic_words) {
            return Err(KeyError::config(format!(
                "default_mnemonic_words must be 12 or 24, got {}",
                self.default_mnemonic_words
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(KeyError::config(format!("invalid log_level: {}", self.log_level)));
        }
        Ok(())
    }

    pub fn backend(&self) -> &'static dyn CryptoBackend {
        match self.backend {
            BackendKind::Software => software(),
        }
    }

    /// Keystore PBKDF2 parameters with the configured iteration count
    pub fn password_config(&self) -> PasswordConfig {
        PasswordConfig::with_iterations(self.keystore_iterations)
    }

    /// Fresh mnemonic of the configured length
    pub fn generate_mnemonic(&self) -> KeyResult<Mnemonic> {
        Mnemonic::generate_with(self.backend().as_random(), self.default_mnemonic_words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(contents.as_bytes()).expect("Failed to write config");
        file
    }

    #[test]
    fn test_defaults() {
        let config = KeyConfig::default();
        assert_eq!(config.keystore_iterations, 262_144);
        assert_eq!(config.default_mnemonic_words, 24);
        assert_eq!(config.backend, BackendKind::Software);
        assert!(config.validate().is_ok());
        assert_eq!(config.password_config(), PasswordConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("keystore_iterations = 1000\ndefault_mnemonic_words = 12\nlog_level = \"debug\"\n");
        let config = KeyConfig::load_from(file.path()).unwrap();
        assert_eq!(config.keystore_iterations, 1000);
        assert_eq!(config.default_mnemonic_words, 12);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.password_config().iterations, 1000);
        assert_eq!(config.generate_mnemonic().unwrap().words().len(), 12);
    }

    #[test]
    fn test_file_values_are_validated() {
        let file = write_config("default_mnemonic_words = 18\n");
        let err = KeyConfig::load_from(file.path()).unwrap_err();
        assert_eq!(err, KeyError::config("default_mnemonic_words must be 12 or 24, got 18"));

        let file = write_config("keystore_iterations = 0\n");
        assert!(matches!(KeyConfig::load_from(file.path()), Err(KeyError::Config(_))));

        let file = write_config("backend = \"hsm\"\n");
        assert!(matches!(KeyConfig::load_from(file.path()), Err(KeyError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let config = KeyConfig {
            log_level: "loud".to_string(),
            ..KeyConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), KeyError::config("invalid log_level: loud"));

        let config = KeyConfig {
            keystore_iterations: 20_000_000,
            ..KeyConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            KeyError::config("keystore_iterations must not exceed 10000000")
        );
    }
}
