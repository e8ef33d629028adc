//! Byte codecs: DER and PEM
//!
//! Hex and base64 helpers live in `shared::utils`.

pub mod der;
pub mod pem;

pub use der::{decode as decode_der, Asn1, DerReader, Oid};
pub use pem::{find_section, read_pem};
