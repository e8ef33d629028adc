//! Minimal DER reader
//!
//! Understands exactly the universal tags needed for PKCS#8 import:
//! INTEGER, OCTET STRING, NULL, OBJECT IDENTIFIER and SEQUENCE. Anything
//! else is rejected rather than skipped.

use std::fmt;

use crate::shared::error::KeyError;
use crate::shared::KeyResult;

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_NULL: u8 = 0x05;
pub const TAG_OID: u8 = 0x06;
pub const TAG_SEQUENCE: u8 = 0x30;

/// Deepest SEQUENCE nesting accepted by [`decode`]
const MAX_DEPTH: usize = 16;

/// A decoded DER node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1 {
    Int(u32),
    Bytes(Vec<u8>),
    Null,
    Oid(Oid),
    Seq(Vec<Asn1>),
}

impl Asn1 {
    pub fn as_int(&self) -> Option<u32> {
        match self {
            Asn1::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Asn1::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Asn1::Oid(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Asn1]> {
        match self {
            Asn1::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the node kind, used in parse errors
    pub fn kind(&self) -> &'static str {
        match self {
            Asn1::Int(_) => "INTEGER",
            Asn1::Bytes(_) => "OCTET STRING",
            Asn1::Null => "NULL",
            Asn1::Oid(_) => "OBJECT IDENTIFIER",
            Asn1::Seq(_) => "SEQUENCE",
        }
    }
}

/// Object identifier arcs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(Vec<u64>);

impl Oid {
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    /// Compare against dotted text such as `1.3.101.112`
    pub fn matches(&self, dotted: &str) -> bool {
        self.to_string() == dotted
    }

    fn decode(bytes: &[u8]) -> KeyResult<Self> {
        let (first, rest) = bytes
            .split_first()
            .ok_or_else(|| KeyError::encoding("empty OBJECT IDENTIFIER"))?;

        // The first octet packs the first two arcs as 40 * a + b
        let mut arcs = vec![u64::from(*first / 40), u64::from(*first % 40)];
        let mut value: u64 = 0;
        let mut pending = false;
        for byte in rest {
            value = value
                .checked_mul(128)
                .and_then(|v| v.checked_add(u64::from(byte & 0x7f)))
                .ok_or_else(|| KeyError::encoding("OBJECT IDENTIFIER arc overflows 64 bits"))?;
            if byte & 0x80 == 0 {
                arcs.push(value);
                value = 0;
                pending = false;
            } else {
                pending = true;
            }
        }
        if pending {
            return Err(KeyError::encoding("truncated OBJECT IDENTIFIER arc"));
        }
        Ok(Oid(arcs))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dotted = self
            .0
            .iter()
            .map(|arc| arc.to_string())
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&dotted)
    }
}

/// Cursor over a DER byte string
pub struct DerReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> DerReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    fn read_byte(&mut self) -> KeyResult<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or_else(|| KeyError::encoding("unexpected end of DER input"))?;
        self.position += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> KeyResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                KeyError::encoding(format!(
                    "DER value of {} bytes exceeds the {} bytes remaining",
                    len,
                    self.data.len().saturating_sub(self.position)
                ))
            })?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Definite-length prefix, short or long form (at most 4 length octets)
    pub fn read_length(&mut self) -> KeyResult<usize> {
        let first = self.read_byte()?;
        if first < 0x80 {
            return Ok(usize::from(first));
        }

        let octets = usize::from(first & 0x7f);
        if octets == 0 {
            return Err(KeyError::encoding("indefinite DER length is not allowed"));
        }
        let len = decode_unsigned(self.read_slice(octets)?)?;
        usize::try_from(len).map_err(|_| KeyError::encoding("DER length does not fit in memory"))
    }

    /// Next tag and its value bytes, without interpreting them
    pub fn read_tlv(&mut self) -> KeyResult<(u8, &'a [u8])> {
        let tag = self.read_byte()?;
        let len = self.read_length()?;
        Ok((tag, self.read_slice(len)?))
    }

    /// Next value, which must carry `tag`
    pub fn read_expected(&mut self, tag: u8) -> KeyResult<&'a [u8]> {
        let (found, value) = self.read_tlv()?;
        if found != tag {
            return Err(KeyError::encoding(format!(
                "expected DER tag 0x{:02x}, found 0x{:02x}",
                tag, found
            )));
        }
        Ok(value)
    }

    /// Decode the next node
    pub fn read_node(&mut self) -> KeyResult<Asn1> {
        self.read_node_at(0)
    }

    fn read_node_at(&mut self, depth: usize) -> KeyResult<Asn1> {
        let (tag, value) = self.read_tlv()?;
        match tag {
            TAG_INTEGER => Ok(Asn1::Int(decode_unsigned(value)?)),
            TAG_OCTET_STRING => Ok(Asn1::Bytes(value.to_vec())),
            TAG_NULL => Ok(Asn1::Null),
            TAG_OID => Ok(Asn1::Oid(Oid::decode(value)?)),
            TAG_SEQUENCE => {
                if depth >= MAX_DEPTH {
                    return Err(KeyError::encoding("DER nesting is too deep"));
                }
                let mut inner = DerReader::new(value);
                let mut items = Vec::new();
                while !inner.is_empty() {
                    items.push(inner.read_node_at(depth + 1)?);
                }
                Ok(Asn1::Seq(items))
            }
            other => Err(KeyError::encoding(format!("unsupported DER type tag: {}", other))),
        }
    }
}

/// Decode the first node of `data`; trailing bytes are ignored
pub fn decode(data: &[u8]) -> KeyResult<Asn1> {
    DerReader::new(data).read_node()
}

/// Minimal DER length prefix for `len`
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|byte| **byte == 0).count();
    let mut encoded = Vec::with_capacity(1 + bytes.len() - skip);
    encoded.push(0x80 | (bytes.len() - skip) as u8);
    encoded.extend_from_slice(&bytes[skip..]);
    encoded
}

/// Big-endian unsigned value of 1 to 4 bytes
fn decode_unsigned(bytes: &[u8]) -> KeyResult<u32> {
    match bytes.len() {
        0 => Err(KeyError::encoding("empty DER integer")),
        1..=4 => Ok(bytes.iter().fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte))),
        len => Err(KeyError::encoding(format!(
            "unsupported DER integer length of {} bytes",
            len
        ))),
    }
}
