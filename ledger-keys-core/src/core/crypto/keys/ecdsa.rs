//! ECDSA secp256k1 keys
//!
//! Messages are hashed with Keccak-256 before signing; signatures are the
//! 64-byte compact `r || s` form.

use std::fmt;

use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::core::crypto::backend::RandomSource;
use crate::core::crypto::hashing::HashManager;
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

// Candidate scalars fall outside the curve order with probability ~2^-128
const MAX_GENERATE_ATTEMPTS: usize = 8;

/// secp256k1 secret scalar with optional BIP-32 chain code
pub struct EcdsaPrivateKey {
    secret: SecretKey,
    chain_code: Option<Zeroizing<[u8; CHAIN_CODE_SIZE]>>,
}

impl EcdsaPrivateKey {
    /// Draw random scalars until one is valid for the curve
    pub fn generate(rng: &dyn RandomSource) -> KeyResult<Self> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
            rng.fill_random(&mut candidate[..])?;
            if let Ok(secret) = SecretKey::from_byte_array(*candidate) {
                return Ok(Self {
                    secret,
                    chain_code: None,
                });
            }
        }
        Err(KeyError::crypto("Generated invalid private key"))
    }

    pub fn from_scalar(scalar: &[u8; PRIVATE_KEY_SIZE], chain_code: Option<[u8; CHAIN_CODE_SIZE]>) -> KeyResult<Self> {
        let secret = SecretKey::from_byte_array(*scalar)
            .map_err(|_| KeyError::bad_key("invalid secp256k1 private key scalar"))?;
        Ok(Self {
            secret,
            chain_code: chain_code.map(Zeroizing::new),
        })
    }

    /// Parse a 32-byte scalar or a 50-byte DER document
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        match data.len() {
            32 => Self::from_bytes_raw(data),
            50 => Self::from_bytes_der(data),
            len => Err(KeyError::bad_key(format!(
                "invalid private key length: {} bytes",
                len
            ))),
        }
    }

    pub fn from_bytes_raw(data: &[u8]) -> KeyResult<Self> {
        let scalar: Zeroizing<[u8; PRIVATE_KEY_SIZE]> = Zeroizing::new(data.try_into().map_err(|_| {
            KeyError::bad_key(format!("invalid private key length: {} bytes", data.len()))
        })?);
        Self::from_scalar(&scalar, None)
    }

    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        if data.len() != ECDSA_PRIVATE_DER_PREFIX.len() + PRIVATE_KEY_SIZE {
            return Err(KeyError::bad_key(format!(
                "invalid private key length: {} bytes",
                data.len()
            )));
        }
        if !data.starts_with(&ECDSA_PRIVATE_DER_PREFIX) {
            return Err(KeyError::bad_key("invalid secp256k1 private key DER prefix"));
        }
        Self::from_bytes_raw(&data[ECDSA_PRIVATE_DER_PREFIX.len()..])
    }

    pub fn public_key(&self) -> EcdsaPublicKey {
        let secp = Secp256k1::new();
        EcdsaPublicKey {
            key: PublicKey::from_secret_key(&secp, &self.secret),
        }
    }

    pub fn chain_code(&self) -> Option<&[u8; CHAIN_CODE_SIZE]> {
        self.chain_code.as_deref()
    }

    /// Sign Keccak-256(message)
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        let secp = Secp256k1::new();
        let digest = HashManager::new().keccak256(message);
        let message = Message::from_digest(digest);
        secp.sign_ecdsa(message, &self.secret).serialize_compact()
    }

    pub fn to_bytes_raw(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        Zeroizing::new(self.secret.secret_bytes())
    }

    pub fn to_bytes_der(&self) -> Zeroizing<Vec<u8>> {
        let mut der = Zeroizing::new(Vec::with_capacity(ECDSA_PRIVATE_DER_PREFIX.len() + PRIVATE_KEY_SIZE));
        der.extend_from_slice(&ECDSA_PRIVATE_DER_PREFIX);
        der.extend_from_slice(&self.to_bytes_raw()[..]);
        der
    }
}

impl Drop for EcdsaPrivateKey {
    fn drop(&mut self) {
        self.secret.non_secure_erase();
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("public_key", &self.public_key())
            .field("derivable", &self.chain_code.is_some())
            .finish()
    }
}

/// secp256k1 public point
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcdsaPublicKey {
    key: PublicKey,
}

impl EcdsaPublicKey {
    /// Parse a compressed/uncompressed point or either supported DER form
    pub fn from_bytes(data: &[u8]) -> KeyResult<Self> {
        match data.len() {
            ECDSA_COMPRESSED_PUBLIC_KEY_SIZE | ECDSA_UNCOMPRESSED_PUBLIC_KEY_SIZE => Self::from_bytes_raw(data),
            47 | 56 => Self::from_bytes_der(data),
            len => Err(KeyError::bad_key(format!(
                "invalid public key length: {} bytes",
                len
            ))),
        }
    }

    pub fn from_bytes_raw(data: &[u8]) -> KeyResult<Self> {
        let key = PublicKey::from_slice(data)
            .map_err(|e| KeyError::bad_key(format!("invalid secp256k1 public key: {}", e)))?;
        Ok(Self { key })
    }

    pub fn from_bytes_der(data: &[u8]) -> KeyResult<Self> {
        let point = if data.len() == ECDSA_PUBLIC_DER_PREFIX.len() + ECDSA_COMPRESSED_PUBLIC_KEY_SIZE
            && data.starts_with(&ECDSA_PUBLIC_DER_PREFIX)
        {
            &data[ECDSA_PUBLIC_DER_PREFIX.len()..]
        } else if data.len() == ECDSA_PUBLIC_DER_PREFIX_SPKI.len() + ECDSA_COMPRESSED_PUBLIC_KEY_SIZE
            && data.starts_with(&ECDSA_PUBLIC_DER_PREFIX_SPKI)
        {
            &data[ECDSA_PUBLIC_DER_PREFIX_SPKI.len()..]
        } else {
            return Err(KeyError::bad_key(format!(
                "invalid secp256k1 public key DER of {} bytes",
                data.len()
            )));
        };
        Self::from_bytes_raw(point)
    }

    /// Check a compact signature over Keccak-256(message); malformed input yields `false`
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        if signature.len() != SIGNATURE_SIZE {
            return false;
        }
        let signature = match Signature::from_compact(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        let secp = Secp256k1::new();
        let digest = HashManager::new().keccak256(message);
        secp.verify_ecdsa(Message::from_digest(digest), &signature, &self.key).is_ok()
    }

    /// 33-byte compressed point
    pub fn to_bytes_raw(&self) -> [u8; ECDSA_COMPRESSED_PUBLIC_KEY_SIZE] {
        self.key.serialize()
    }

    pub fn to_bytes_uncompressed(&self) -> [u8; ECDSA_UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        self.key.serialize_uncompressed()
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(ECDSA_PUBLIC_DER_PREFIX.len() + ECDSA_COMPRESSED_PUBLIC_KEY_SIZE);
        der.extend_from_slice(&ECDSA_PUBLIC_DER_PREFIX);
        der.extend_from_slice(&self.to_bytes_raw());
        der
    }

    /// Last 20 bytes of Keccak-256 over the uncompressed point, without its `04` tag
    pub fn to_evm_address(&self) -> [u8; EVM_ADDRESS_SIZE] {
        let uncompressed = self.to_bytes_uncompressed();
        let digest = HashManager::new().keccak256(&uncompressed[1..]);
        let mut address = [0u8; EVM_ADDRESS_SIZE];
        address.copy_from_slice(&digest[32 - EVM_ADDRESS_SIZE..]);
        address
    }

    pub(crate) fn point(&self) -> &PublicKey {
        &self.key
    }
}

impl fmt::Debug for EcdsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaPublicKey({})", hex::encode(self.to_bytes_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::backend::software;

    // Private key 1 maps to the generator point
    const ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const GENERATOR: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn test_generator_point() {
        let key = EcdsaPrivateKey::from_bytes(&hex::decode(ONE).unwrap()).unwrap();
        assert_eq!(hex::encode(key.public_key().to_bytes_raw()), GENERATOR);
    }

    #[test]
    fn test_evm_address_of_generator() {
        let key = EcdsaPrivateKey::from_bytes(&hex::decode(ONE).unwrap()).unwrap();
        assert_eq!(
            hex::encode(key.public_key().to_evm_address()),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_sign_verify() {
        let key = EcdsaPrivateKey::generate(software()).expect("Failed to generate key");
        let message = b"transfer 100";
        let signature = key.sign(message);

        let public_key = key.public_key();
        assert!(public_key.verify(message, &signature));
        assert!(!public_key.verify(b"transfer 101", &signature));

        let mut tampered = signature;
        tampered[10] ^= 0x01;
        assert!(!public_key.verify(message, &tampered));
        assert!(!public_key.verify(message, &signature[..63]));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let key = EcdsaPrivateKey::from_bytes(&hex::decode(ONE).unwrap()).unwrap();
        assert_eq!(key.sign(b"same").to_vec(), key.sign(b"same").to_vec());
    }

    #[test]
    fn test_private_der_round_trip() {
        let key = EcdsaPrivateKey::from_bytes(&hex::decode(ONE).unwrap()).unwrap();
        let der = key.to_bytes_der();
        assert_eq!(der.len(), 50);
        assert_eq!(
            hex::encode(&der[..]),
            format!("3030020100300706052b8104000a04220420{}", ONE)
        );
        let parsed = EcdsaPrivateKey::from_bytes(&der).unwrap();
        assert_eq!(parsed.to_bytes_raw(), key.to_bytes_raw());
    }

    #[test]
    fn test_public_der_forms() {
        let key = EcdsaPrivateKey::from_bytes(&hex::decode(ONE).unwrap()).unwrap();
        let public_key = key.public_key();

        let der = public_key.to_bytes_der();
        assert_eq!(der.len(), 47);
        assert_eq!(hex::encode(&der), format!("302d300706052b8104000a032200{}", GENERATOR));
        assert_eq!(EcdsaPublicKey::from_bytes(&der).unwrap(), public_key);

        let spki = hex::decode(format!("3036301006072a8648ce3d020106052b8104000a032200{}", GENERATOR)).unwrap();
        assert_eq!(EcdsaPublicKey::from_bytes(&spki).unwrap(), public_key);

        let uncompressed = public_key.to_bytes_uncompressed();
        assert_eq!(EcdsaPublicKey::from_bytes(&uncompressed).unwrap(), public_key);
    }

    #[test]
    fn test_rejects_invalid_scalars() {
        assert!(EcdsaPrivateKey::from_bytes(&[0u8; 32]).is_err());
        // Curve order n
        let order = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
        assert!(EcdsaPrivateKey::from_bytes(&order).is_err());
        assert!(EcdsaPrivateKey::from_bytes(&[1u8; 33]).is_err());
    }
}
