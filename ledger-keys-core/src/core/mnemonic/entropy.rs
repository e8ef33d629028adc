//! Word indices to entropy
//!
//! BIP-39 packs 11 bits per word with a SHA-256 checksum in the trailing
//! bits. The legacy 22-word format instead reads the word indices as one
//! base-1600 number, giving 33 bytes whose last byte is a CRC-8 checksum.

use zeroize::Zeroizing;

use crate::core::crypto::backend::CryptoBackend;
use crate::core::crypto::hashing::HashAlgorithm;
use crate::shared::constants::*;
use crate::shared::error::{BadMnemonicError, KeyError};
use crate::shared::KeyResult;

const BITS_PER_WORD: usize = 11;

/// Position of `word` in the BIP-39 English list
pub fn bip39_index(word: &str) -> Option<u16> {
    bip39::Language::English
        .word_list()
        .iter()
        .position(|candidate| *candidate == word)
        .map(|index| index as u16)
}

/// Entropy of a BIP-39 phrase, with its checksum verified
pub fn bip39_entropy(backend: &dyn CryptoBackend, indices: &[u16]) -> KeyResult<Zeroizing<Vec<u8>>> {
    let total_bits = indices.len() * BITS_PER_WORD;
    let checksum_bits = total_bits / 33;
    let entropy_len = (total_bits - checksum_bits) / 8;
    if checksum_bits == 0 || checksum_bits > 8 {
        return Err(BadMnemonicError::bad_length().into());
    }

    let mut packed = Zeroizing::new(vec![0u8; (total_bits + 7) / 8]);
    for (word, index) in indices.iter().enumerate() {
        if usize::from(*index) >= BIP39_WORD_COUNT {
            return Err(KeyError::internal(format!("word index {} out of range", index)));
        }
        for bit in 0..BITS_PER_WORD {
            if index & (1 << (BITS_PER_WORD - 1 - bit)) != 0 {
                let position = word * BITS_PER_WORD + bit;
                packed[position / 8] |= 1 << (7 - position % 8);
            }
        }
    }

    let entropy = Zeroizing::new(packed[..entropy_len].to_vec());
    let stored = packed[entropy_len] >> (8 - checksum_bits);
    let digest = backend.digest(HashAlgorithm::SHA256, &entropy)?;
    let expected = digest
        .first()
        .map(|byte| byte >> (8 - checksum_bits))
        .ok_or_else(|| KeyError::crypto("empty SHA-256 digest"))?;

    if stored != expected {
        return Err(BadMnemonicError::checksum_mismatch().into());
    }
    Ok(entropy)
}

/// Entropy and embedded checksum of a legacy phrase
pub fn legacy_entropy(indices: &[u16]) -> (Zeroizing<[u8; LEGACY_ENTROPY_SIZE]>, u8) {
    let data = convert_radix(indices, LEGACY_WORD_COUNT as u32);
    let checksum = data[LEGACY_ENTROPY_SIZE];

    let mut entropy = Zeroizing::new([0u8; LEGACY_ENTROPY_SIZE]);
    for (out, byte) in entropy.iter_mut().zip(data.iter()) {
        *out = byte ^ checksum;
    }
    (entropy, checksum)
}

/// Whether the embedded checksum matches. The CRC covers every entropy
/// byte except the last.
pub fn legacy_checksum_matches(entropy: &[u8; LEGACY_ENTROPY_SIZE], checksum: u8) -> bool {
    crc8(&entropy[..LEGACY_ENTROPY_SIZE - 1]) == checksum
}

/// CRC-8, reflected polynomial 0xb2, initial value and final xor 0xff
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xff;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 1 == 0 { crc >> 1 } else { (crc >> 1) ^ 0xb2 };
        }
    }
    crc ^ 0xff
}

/// Big-endian base-256 digits of a number given as base-`radix` digits
fn convert_radix(digits: &[u16], radix: u32) -> Zeroizing<[u8; LEGACY_ENTROPY_SIZE + 1]> {
    let mut out = Zeroizing::new([0u8; LEGACY_ENTROPY_SIZE + 1]);
    for digit in digits {
        let mut carry = u32::from(*digit);
        for byte in out.iter_mut().rev() {
            let value = u32::from(*byte) * radix + carry;
            *byte = (value & 0xff) as u8;
            carry = value >> 8;
        }
    }
    out
}
