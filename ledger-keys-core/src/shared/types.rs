use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::KeyError;

/// Signature algorithm of a key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Ed25519,
    EcdsaSecp256k1,
}

impl KeyAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Ed25519 => "ED25519",
            KeyAlgorithm::EcdsaSecp256k1 => "secp256k1",
        }
    }

}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "secp256k1" | "ecdsa" | "ecdsa_secp256k1" => Ok(KeyAlgorithm::EcdsaSecp256k1),
            other => Err(KeyError::config(format!("unknown key algorithm: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_algorithm_parse() {
        assert_eq!("ED25519".parse::<KeyAlgorithm>().unwrap(), KeyAlgorithm::Ed25519);
        assert_eq!("secp256k1".parse::<KeyAlgorithm>().unwrap(), KeyAlgorithm::EcdsaSecp256k1);
        assert!("rsa".parse::<KeyAlgorithm>().is_err());
    }

    #[test]
    fn test_key_algorithm_display() {
        assert_eq!(KeyAlgorithm::Ed25519.to_string(), "ED25519");
        assert_eq!(KeyAlgorithm::EcdsaSecp256k1.to_string(), "secp256k1");
    }
}
