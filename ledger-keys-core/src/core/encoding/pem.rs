//! PEM private key import
//!
//! Accepts PKCS#8 `PRIVATE KEY`, PBES2-encrypted `ENCRYPTED PRIVATE KEY`
//! and unencrypted SEC1 `EC PRIVATE KEY` sections.

use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::keys::PrivateKey;
use crate::core::keystore::pkcs8::{sec1_private_key, EncryptedPrivateKeyInfo, PrivateKeyInfo};
use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::utils::decode_base64;
use crate::shared::{KeyAlgorithm, KeyResult};

/// Text between the `BEGIN`/`END` markers of the first section labelled `label`
pub fn find_section<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let begin = format!("-----BEGIN {}-----", label);
    let end = format!("-----END {}-----", label);

    let start = text.find(&begin)? + begin.len();
    let len = text[start..].find(&end)?;
    Some(&text[start..start + len])
}

/// Base64 body of a section with all whitespace removed
fn decode_body(body: &str) -> KeyResult<Zeroizing<Vec<u8>>> {
    if body.contains("Proc-Type:") {
        return Err(KeyError::bad_key(
            "OpenSSL-style encrypted PEM (Proc-Type header) is not supported; convert the key to PKCS#8",
        ));
    }
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(Zeroizing::new(decode_base64(&compact)?))
}

/// Read the private key in `text`.
///
/// With a non-empty passphrase only an `ENCRYPTED PRIVATE KEY` section is
/// considered and it must hold an Ed25519 key. Without one, plain PKCS#8
/// and SEC1 sections are tried in that order.
pub fn read_pem(backend: &dyn CryptoBackend, text: &str, passphrase: Option<&str>) -> KeyResult<PrivateKey> {
    if let Some(passphrase) = passphrase.filter(|p| !p.is_empty()) {
        let body = find_section(text, PEM_ENCRYPTED_PRIVATE_KEY_LABEL).ok_or_else(|| {
            KeyError::bad_key(format!(
                "no {} section found in PEM text",
                PEM_ENCRYPTED_PRIVATE_KEY_LABEL
            ))
        })?;
        log::debug!("Importing encrypted PKCS#8 private key from PEM");

        let der = decode_body(body)?;
        let info = EncryptedPrivateKeyInfo::parse(&der)?.decrypt(backend, passphrase)?;
        if !info.algorithm.algorithm.matches(OID_ED25519) {
            return Err(KeyError::bad_key(format!(
                "expected an Ed25519 key in encrypted PEM, found {}",
                info.algorithm.algorithm
            )));
        }
        return from_private_key_info(&info);
    }

    if let Some(body) = find_section(text, PEM_PRIVATE_KEY_LABEL) {
        log::debug!("Importing plain PKCS#8 private key from PEM");
        let der = decode_body(body)?;
        return from_private_key_info(&PrivateKeyInfo::parse(&der)?);
    }

    if let Some(body) = find_section(text, PEM_EC_PRIVATE_KEY_LABEL) {
        log::debug!("Importing SEC1 EC private key from PEM");
        let der = decode_body(body)?;
        let key = sec1_private_key(&der)?;
        return PrivateKey::from_parts(KeyAlgorithm::EcdsaSecp256k1, &key, None);
    }

    if find_section(text, PEM_ENCRYPTED_PRIVATE_KEY_LABEL).is_some() {
        return Err(KeyError::bad_key("PEM private key is encrypted; a passphrase is required"));
    }
    Err(KeyError::bad_key("no private key section found in PEM text"))
}

/// Key of a PKCS#8 `PrivateKeyInfo`, selected by its algorithm identifier
fn from_private_key_info(info: &PrivateKeyInfo) -> KeyResult<PrivateKey> {
    let algorithm = &info.algorithm.algorithm;

    if algorithm.matches(OID_ED25519) {
        let key = info.key_bytes()?;
        PrivateKey::from_parts(KeyAlgorithm::Ed25519, &key, None)
    } else if algorithm.matches(OID_SECP256K1) {
        let key = info.key_bytes()?;
        PrivateKey::from_parts(KeyAlgorithm::EcdsaSecp256k1, &key, None)
    } else if algorithm.matches(OID_EC_PUBLIC_KEY) {
        let curve = info.algorithm.parameters.as_ref().and_then(|p| p.as_oid());
        match curve {
            Some(curve) if curve.matches(OID_SECP256K1) => {
                let key = sec1_private_key(&info.private_key)?;
                PrivateKey::from_parts(KeyAlgorithm::EcdsaSecp256k1, &key, None)
            }
            Some(curve) => Err(KeyError::bad_key(format!("unsupported EC curve: {}", curve))),
            None => Err(KeyError::bad_key("missing EC curve parameter")),
        }
    } else {
        Err(KeyError::bad_key(format!(
            "unsupported private key algorithm: {}",
            algorithm
        )))
    }
}
