//! PKCS#8 private key containers
//!
//! Decryption supports a single profile: PBES2 with PBKDF2-HMAC-SHA256 and
//! AES-128-CBC. Every other algorithm identifier is rejected by OID.

use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::encryption::EncryptionAlgorithm;
use crate::core::crypto::password::PasswordAlgorithm;
use crate::core::encoding::der::{self, Asn1, DerReader, Oid, TAG_INTEGER, TAG_OCTET_STRING, TAG_SEQUENCE};
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

fn decode_bad_key(data: &[u8], what: &str) -> KeyResult<Asn1> {
    der::decode(data).map_err(|e| KeyError::bad_key(format!("error parsing {}: {}", what, e)))
}

/// `AlgorithmIdentifier ::= SEQUENCE { algorithm OID, parameters ANY OPTIONAL }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: Oid,
    pub parameters: Option<Asn1>,
}

impl AlgorithmIdentifier {
    pub fn from_asn1(node: &Asn1) -> KeyResult<Self> {
        match node.as_seq() {
            Some([Asn1::Oid(algorithm), rest @ ..]) => Ok(Self {
                algorithm: algorithm.clone(),
                parameters: rest.first().cloned(),
            }),
            _ => Err(KeyError::bad_key(format!(
                "error parsing AlgorithmIdentifier from {}",
                node.kind()
            ))),
        }
    }

    fn parameters(&self) -> KeyResult<&Asn1> {
        self.parameters.as_ref().ok_or_else(|| {
            KeyError::bad_key(format!("missing parameters for {}", self.algorithm))
        })
    }
}

/// `PBES2-params ::= SEQUENCE { keyDerivationFunc, encryptionScheme }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbes2Params {
    pub kdf: AlgorithmIdentifier,
    pub encryption_scheme: AlgorithmIdentifier,
}

impl Pbes2Params {
    pub fn from_asn1(node: &Asn1) -> KeyResult<Self> {
        match node.as_seq() {
            Some([kdf, scheme]) => Ok(Self {
                kdf: AlgorithmIdentifier::from_asn1(kdf)?,
                encryption_scheme: AlgorithmIdentifier::from_asn1(scheme)?,
            }),
            _ => Err(KeyError::bad_key(format!(
                "error parsing PBES2 parameters from {}",
                node.kind()
            ))),
        }
    }
}

/// `PBKDF2-params ::= SEQUENCE { salt, iterationCount, keyLength OPTIONAL, prf OPTIONAL }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub key_length: Option<u32>,
    pub prf: Option<AlgorithmIdentifier>,
}

impl Pbkdf2Params {
    pub fn from_asn1(node: &Asn1) -> KeyResult<Self> {
        let items = node.as_seq().unwrap_or_default();
        let (salt, iterations) = match items {
            [Asn1::Bytes(salt), Asn1::Int(iterations), ..] => (salt.clone(), *iterations),
            _ => {
                return Err(KeyError::bad_key(format!(
                    "error parsing PBKDF2 parameters from {}",
                    node.kind()
                )))
            }
        };

        let mut params = Self {
            salt,
            iterations,
            key_length: None,
            prf: None,
        };
        match &items[2..] {
            [] => {}
            [prf @ Asn1::Seq(_), ..] => params.prf = Some(AlgorithmIdentifier::from_asn1(prf)?),
            [Asn1::Int(key_length), rest @ ..] => {
                params.key_length = Some(*key_length);
                if let Some(prf) = rest.first() {
                    params.prf = Some(AlgorithmIdentifier::from_asn1(prf)?);
                }
            }
            [other, ..] => {
                return Err(KeyError::bad_key(format!(
                    "unexpected {} in PBKDF2 parameters",
                    other.kind()
                )))
            }
        }
        Ok(params)
    }

    pub fn key_length(&self) -> usize {
        self.key_length
            .map(|len| len as usize)
            .unwrap_or(PKCS8_DEFAULT_KEY_LENGTH)
    }

    /// PRF to use; an absent PRF means HMAC-SHA-1, which is not supported
    pub fn prf(&self) -> KeyResult<PasswordAlgorithm> {
        match &self.prf {
            None => Err(KeyError::bad_key("unsupported PRF HMAC-SHA-1")),
            Some(prf) => PasswordAlgorithm::from_oid(&prf.algorithm.to_string()),
        }
    }
}

/// AES-128-CBC with its IV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionScheme {
    pub algorithm: EncryptionAlgorithm,
    pub iv: Vec<u8>,
}

impl EncryptionScheme {
    pub fn from_identifier(identifier: &AlgorithmIdentifier) -> KeyResult<Self> {
        if !identifier.algorithm.matches(OID_AES_128_CBC) {
            return Err(KeyError::bad_key(format!(
                "unsupported encryption scheme: {}",
                identifier.algorithm
            )));
        }
        match &identifier.parameters {
            Some(Asn1::Bytes(iv)) => Ok(Self {
                algorithm: EncryptionAlgorithm::AES128CBC,
                iv: iv.clone(),
            }),
            other => Err(KeyError::bad_key(format!(
                "expected IV as bytes for AES-128-CBC, got {}",
                other.as_ref().map(Asn1::kind).unwrap_or("nothing")
            ))),
        }
    }
}

/// `PrivateKeyInfo ::= SEQUENCE { version 0, algorithm, privateKey OCTET STRING }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub version: u32,
    pub algorithm: AlgorithmIdentifier,
    pub private_key: Zeroizing<Vec<u8>>,
}

impl PrivateKeyInfo {
    pub fn parse(data: &[u8]) -> KeyResult<Self> {
        Self::from_asn1(&decode_bad_key(data, "PrivateKeyInfo")?)
    }

    pub fn from_asn1(node: &Asn1) -> KeyResult<Self> {
        let items = match node.as_seq() {
            Some(items) if items.len() == 3 => items,
            _ => {
                return Err(KeyError::bad_key(format!(
                    "error parsing PrivateKeyInfo from {}",
                    node.kind()
                )))
            }
        };

        match &items[0] {
            Asn1::Int(0) => {}
            other => {
                return Err(KeyError::bad_key(format!(
                    "expected version = 0, got {:?}",
                    other.as_int()
                )))
            }
        }
        let algorithm = AlgorithmIdentifier::from_asn1(&items[1])?;
        let private_key = match &items[2] {
            Asn1::Bytes(bytes) => Zeroizing::new(bytes.clone()),
            other => {
                return Err(KeyError::bad_key(format!(
                    "expected octet string as 3rd element, got {}",
                    other.kind()
                )))
            }
        };

        Ok(Self {
            version: 0,
            algorithm,
            private_key,
        })
    }

    /// Raw 32-byte key for Ed25519 or bare secp256k1 key info
    pub fn key_bytes(&self) -> KeyResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
        let inner = decode_bad_key(&self.private_key, "private key")?;
        let bytes = inner
            .as_bytes()
            .ok_or_else(|| KeyError::bad_key(format!("expected inner octet string, got {}", inner.kind())))?;
        let inner = Zeroizing::new(bytes.to_vec());
        to_key_array(&inner)
    }
}

/// `EncryptedPrivateKeyInfo ::= SEQUENCE { encryptionAlgorithm, encryptedData OCTET STRING }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub data: Vec<u8>,
}

impl EncryptedPrivateKeyInfo {
    pub fn parse(data: &[u8]) -> KeyResult<Self> {
        let node = decode_bad_key(data, "EncryptedPrivateKeyInfo")?;
        match node.as_seq() {
            Some([algorithm, Asn1::Bytes(data)]) => Ok(Self {
                algorithm: AlgorithmIdentifier::from_asn1(algorithm)?,
                data: data.clone(),
            }),
            _ => Err(KeyError::bad_key(format!(
                "error parsing EncryptedPrivateKeyInfo from {}",
                node.kind()
            ))),
        }
    }

    pub fn decrypt(&self, backend: &dyn CryptoBackend, passphrase: &str) -> KeyResult<PrivateKeyInfo> {
        if !self.algorithm.algorithm.matches(OID_PBES2) || self.algorithm.parameters.is_none() {
            return Err(KeyError::bad_key(format!(
                "unsupported key encryption algorithm: {}",
                self.algorithm.algorithm
            )));
        }
        let pbes2 = Pbes2Params::from_asn1(self.algorithm.parameters()?)?;

        if !pbes2.kdf.algorithm.matches(OID_PBKDF2) || pbes2.kdf.parameters.is_none() {
            return Err(KeyError::bad_key(format!(
                "unsupported key derivation function: {}",
                pbes2.kdf.algorithm
            )));
        }
        let pbkdf2 = Pbkdf2Params::from_asn1(pbes2.kdf.parameters()?)?;
        let prf = pbkdf2.prf()?;
        let scheme = EncryptionScheme::from_identifier(&pbes2.encryption_scheme)?;
        if pbkdf2.key_length() != scheme.algorithm.key_size() {
            return Err(KeyError::bad_key(format!(
                "unsupported PBKDF2 key length: {}",
                pbkdf2.key_length()
            )));
        }

        log::debug!(
            "Decrypting PKCS#8 key: PBKDF2 with {} iterations, {} byte key",
            pbkdf2.iterations,
            pbkdf2.key_length()
        );

        let key = backend.pbkdf2(
            prf.hash(),
            passphrase.as_bytes(),
            &pbkdf2.salt,
            pbkdf2.iterations,
            pbkdf2.key_length(),
        )?;
        let decrypted = Zeroizing::new(
            backend
                .decrypt(scheme.algorithm, &key, &scheme.iv, &self.data)
                .map_err(|e| KeyError::bad_key(format!("failed to decrypt private key: {}", e)))?,
        );

        PrivateKeyInfo::parse(&decrypted)
    }
}

/// Private scalar of a SEC1 `ECPrivateKey`; the optional curve and public
/// key fields are not read
pub fn sec1_private_key(data: &[u8]) -> KeyResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    let bad = |e: KeyError| KeyError::bad_key(format!("error parsing EC private key: {}", e));

    let mut outer = DerReader::new(data);
    let body = outer.read_expected(TAG_SEQUENCE).map_err(bad)?;
    let mut reader = DerReader::new(body);

    let version = reader.read_expected(TAG_INTEGER).map_err(bad)?;
    if version != &[1u8][..] {
        return Err(KeyError::bad_key("expected EC private key version 1"));
    }
    let key = reader.read_expected(TAG_OCTET_STRING).map_err(bad)?;
    to_key_array(key)
}

fn to_key_array(bytes: &[u8]) -> KeyResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    if bytes.len() != PRIVATE_KEY_SIZE {
        return Err(KeyError::bad_key(format!(
            "invalid private key length: {} bytes",
            bytes.len()
        )));
    }
    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    key.copy_from_slice(bytes);
    Ok(key)
}
