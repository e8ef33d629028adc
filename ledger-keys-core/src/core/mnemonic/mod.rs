//! Mnemonic phrases
//!
//! Standard phrases are 12 or 24 BIP-39 English words. The 22-word legacy
//! format is recognized when the caller supplies its word list. A
//! [`Mnemonic`] is validated once, at construction.

pub mod entropy;
pub mod legacy_words;

pub use legacy_words::LegacyWordList;

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::core::crypto::backend::{software, CryptoBackend, RandomSource};
use crate::core::crypto::hashing::HashAlgorithm;
use crate::core::crypto::keys::{DefaultKeyFactory, PrivateKey, PrivateKeyFactory};
use crate::core::derivation::{bip32, slip10, DerivationPath, DerivationStrategy};
use crate::shared::constants::*;
use crate::shared::error::{BadMnemonicError, KeyError};
use crate::shared::{KeyAlgorithm, KeyResult};

/// A validated mnemonic phrase
#[derive(Clone)]
pub struct Mnemonic {
    words: Zeroizing<Vec<String>>,
    /// Word indices of a legacy phrase
    legacy: Option<Zeroizing<Vec<u16>>>,
}

impl Mnemonic {
    /// Random phrase of `words` words (12 or 24)
    pub fn generate(words: usize) -> KeyResult<Self> {
        Self::generate_with(software().as_random(), words)
    }

    pub fn generate_12() -> KeyResult<Self> {
        Self::generate(12)
    }

    pub fn generate_24() -> KeyResult<Self> {
        Self::generate(24)
    }

    pub fn generate_with(rng: &dyn RandomSource, words: usize) -> KeyResult<Self> {
        let entropy_len = match words {
            12 => 16,
            24 => 32,
            other => {
                return Err(KeyError::config(format!(
                    "unsupported phrase length {}, only 12 or 24 are supported",
                    other
                )))
            }
        };

        let mut entropy = Zeroizing::new([0u8; 32]);
        rng.fill_random(&mut entropy[..entropy_len])?;
        let phrase = Zeroizing::new(bip39::Mnemonic::from_entropy(&entropy[..entropy_len])?.to_string());

        log::debug!("Generated {}-word mnemonic", words);
        Ok(Self {
            words: Zeroizing::new(phrase.split(' ').map(str::to_string).collect()),
            legacy: None,
        })
    }

    /// Validate a standard phrase. 22-word input fails with `BadLength`
    /// since no legacy word list is available.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> KeyResult<Self> {
        Self::validate(software(), collect_words(words), None)
    }

    /// Validate a standard or legacy phrase
    pub fn from_words_with_legacy<S: AsRef<str>>(words: &[S], legacy: &LegacyWordList) -> KeyResult<Self> {
        Self::validate(software(), collect_words(words), Some(legacy))
    }

    /// Split on whitespace and commas, lower-case, then validate
    pub fn from_string(text: &str) -> KeyResult<Self> {
        Self::validate(software(), split_phrase(text), None)
    }

    pub fn from_string_with_legacy(text: &str, legacy: &LegacyWordList) -> KeyResult<Self> {
        Self::validate(software(), split_phrase(text), Some(legacy))
    }

    fn validate(
        backend: &dyn CryptoBackend,
        words: Vec<String>,
        legacy: Option<&LegacyWordList>,
    ) -> KeyResult<Self> {
        let words = Zeroizing::new(words);

        if words.len() == LEGACY_MNEMONIC_WORDS {
            let list = legacy.ok_or_else(|| {
                log::warn!("22-word mnemonic rejected: no legacy word list supplied");
                BadMnemonicError::bad_length()
            })?;
            let indices = Zeroizing::new(lookup(&words, |word| list.index_of(word))?);

            let (entropy, checksum) = entropy::legacy_entropy(&indices);
            if !entropy::legacy_checksum_matches(&entropy, checksum) {
                log::warn!("Legacy mnemonic rejected: checksum mismatch");
                return Err(BadMnemonicError::checksum_mismatch().into());
            }
            return Ok(Self { words, legacy: Some(indices) });
        }

        if !STANDARD_MNEMONIC_LENGTHS.contains(&words.len()) {
            log::warn!("Mnemonic rejected: {} words", words.len());
            return Err(BadMnemonicError::bad_length().into());
        }
        let indices = Zeroizing::new(lookup(&words, entropy::bip39_index)?);
        entropy::bip39_entropy(backend, &indices)?;

        Ok(Self { words, legacy: None })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy.is_some()
    }

    /// BIP-39 seed: PBKDF2-HMAC-SHA512 over the phrase, salted with
    /// `"mnemonic" + passphrase`, both NFKD-normalized
    pub fn to_seed(&self, passphrase: &str) -> KeyResult<Zeroizing<Vec<u8>>> {
        self.to_seed_with(software(), passphrase)
    }

    pub fn to_seed_with(&self, backend: &dyn CryptoBackend, passphrase: &str) -> KeyResult<Zeroizing<Vec<u8>>> {
        let password = Zeroizing::new(self.words.join(" ").nfkd().collect::<String>());
        let salt = Zeroizing::new(
            format!("{}{}", MNEMONIC_SALT_PREFIX, passphrase)
                .nfkd()
                .collect::<String>(),
        );
        backend.pbkdf2(
            HashAlgorithm::SHA512,
            password.as_bytes(),
            salt.as_bytes(),
            MNEMONIC_SEED_ITERATIONS,
            MNEMONIC_SEED_SIZE,
        )
    }

    /// Recover a key with the given strategy, built by `factory`
    pub fn to_private_key(
        &self,
        backend: &dyn CryptoBackend,
        factory: &dyn PrivateKeyFactory,
        passphrase: &str,
        strategy: &DerivationStrategy,
    ) -> KeyResult<PrivateKey> {
        match strategy {
            DerivationStrategy::Standard { algorithm: KeyAlgorithm::Ed25519, index } => {
                if bip32::is_hardened(*index) {
                    return Err(KeyError::derivation("the index should not be pre-hardened"));
                }
                let seed = self.to_seed_with(backend, passphrase)?;
                let path = [BIP44_PURPOSE, LEDGER_COIN_TYPE, 0, 0, *index];
                let child = slip10::derive_path(backend, &seed, &path)?;
                factory.ed25519_from_parts(&child.key, Some(child.chain_code))
            }
            DerivationStrategy::Standard { algorithm: KeyAlgorithm::EcdsaSecp256k1, index } => {
                let seed = self.to_seed_with(backend, passphrase)?;
                let path = [
                    bip32::to_hardened_index(BIP44_PURPOSE),
                    bip32::to_hardened_index(LEDGER_COIN_TYPE),
                    bip32::to_hardened_index(0),
                    0,
                    *index,
                ];
                let child = bip32::derive_path(backend, &seed, &path)?;
                factory.ecdsa_from_parts(&child.key, Some(child.chain_code))
            }
            DerivationStrategy::LegacyEd25519 { path } => {
                let seed = self.to_seed_with(backend, passphrase)?;
                let child = slip10::derive_path(backend, &seed, &path.to_indices())?;
                factory.ed25519_from_parts(&child.key, Some(child.chain_code))
            }
            DerivationStrategy::LegacyEcdsa { path } => {
                let seed = self.to_seed_with(backend, passphrase)?;
                let child = bip32::derive_path(backend, &seed, &path.to_indices())?;
                factory.ecdsa_from_parts(&child.key, Some(child.chain_code))
            }
            DerivationStrategy::LegacyEntropy => self.legacy_key(backend, factory),
        }
    }

    /// Ed25519 key at `m/44'/3030'/0'/0'/index'`
    pub fn to_standard_ed25519_private_key(&self, passphrase: &str, index: u32) -> KeyResult<PrivateKey> {
        self.to_private_key(
            software(),
            &DefaultKeyFactory,
            passphrase,
            &DerivationStrategy::Standard { algorithm: KeyAlgorithm::Ed25519, index },
        )
    }

    /// secp256k1 key at `m/44'/3030'/0'/0/index`
    pub fn to_standard_ecdsa_secp256k1_private_key(&self, passphrase: &str, index: u32) -> KeyResult<PrivateKey> {
        self.to_private_key(
            software(),
            &DefaultKeyFactory,
            passphrase,
            &DerivationStrategy::Standard { algorithm: KeyAlgorithm::EcdsaSecp256k1, index },
        )
    }

    #[deprecated(note = "use to_standard_ed25519_private_key")]
    pub fn to_ed25519_private_key(&self, passphrase: &str, path: &DerivationPath) -> KeyResult<PrivateKey> {
        self.to_private_key(
            software(),
            &DefaultKeyFactory,
            passphrase,
            &DerivationStrategy::LegacyEd25519 { path: path.clone() },
        )
    }

    #[deprecated(note = "use to_standard_ecdsa_secp256k1_private_key")]
    pub fn to_ecdsa_private_key(&self, passphrase: &str, path: &DerivationPath) -> KeyResult<PrivateKey> {
        self.to_private_key(
            software(),
            &DefaultKeyFactory,
            passphrase,
            &DerivationStrategy::LegacyEcdsa { path: path.clone() },
        )
    }

    /// Key used by wallets that predate BIP-32: the phrase entropy itself.
    /// Only 22- and 24-word phrases carry 32 bytes of entropy.
    pub fn to_legacy_private_key(&self) -> KeyResult<PrivateKey> {
        self.legacy_key(software(), &DefaultKeyFactory)
    }

    fn legacy_key(&self, backend: &dyn CryptoBackend, factory: &dyn PrivateKeyFactory) -> KeyResult<PrivateKey> {
        if let Some(indices) = &self.legacy {
            let (entropy, _) = entropy::legacy_entropy(indices);
            return factory.ed25519_from_parts(&entropy, None);
        }

        let indices = Zeroizing::new(lookup(&self.words, entropy::bip39_index)?);
        let entropy = entropy::bip39_entropy(backend, &indices)?;
        let key: Zeroizing<[u8; PRIVATE_KEY_SIZE]> = Zeroizing::new(
            entropy[..]
                .try_into()
                .map_err(|_| {
                    KeyError::bad_key(format!(
                        "legacy recovery needs 32 bytes of entropy, a {}-word phrase has {}",
                        self.words.len(),
                        entropy.len()
                    ))
                })?,
        );
        factory.ed25519_from_parts(&key, None)
    }
}

/// Indices of every word, or `UnknownWords` listing each position not found
fn lookup(words: &[String], index_of: impl Fn(&str) -> Option<u16>) -> KeyResult<Vec<u16>> {
    let mut indices = Vec::with_capacity(words.len());
    let mut unknown = Vec::new();
    for (position, word) in words.iter().enumerate() {
        match index_of(word) {
            Some(index) => indices.push(index),
            None => unknown.push(position),
        }
    }
    if !unknown.is_empty() {
        log::warn!("Mnemonic rejected: {} unknown words", unknown.len());
        return Err(BadMnemonicError::unknown_words(unknown).into());
    }
    Ok(indices)
}

fn collect_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|word| word.as_ref().trim().to_string()).collect()
}

fn split_phrase(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.words.len())
            .field("legacy", &self.is_legacy())
            .finish()
    }
}

impl FromStr for Mnemonic {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::backend::FixedRandom;
    use crate::shared::error::MnemonicErrorReason;

    const MNEMONIC_24: &str = "inmate flip alley wear offer often piece magnet surge toddler submit right radio absent pear floor belt raven price stove replace reduce plate home";
    const MNEMONIC_12: &str = "finish furnace tomorrow wine mass goose festival air palm easy region guilt";
    const MNEMONIC_LEGACY_V2: &str = "obvious favorite remain caution remove laptop base vacant increase video erase pass sniff sausage knock grid argue salt romance way alone fever slush dune";

    // Indices into the synthetic legacy list whose CRC checks out
    const LEGACY_INDICES: [u16; 22] = [
        169, 715, 354, 328, 337, 938, 920, 1095, 1238, 774, 287, 834, 258, 1173, 394, 1077, 1153,
        675, 1464, 980, 639, 1011,
    ];
    const LEGACY_ENTROPY: &str = "b3b3b3b3ca2133f4ecc561218c7d508c7e608e3937de849ae2b3b99a40f5cb6e";

    fn legacy_phrase() -> Vec<String> {
        LEGACY_INDICES.iter().map(|i| format!("w{:04}", i)).collect()
    }

    fn reason(err: KeyError) -> MnemonicErrorReason {
        err.mnemonic_reason().expect("Expected a mnemonic error")
    }

    #[test]
    fn test_generate() {
        let mnemonic = Mnemonic::generate_24().unwrap();
        assert_eq!(mnemonic.words().len(), 24);
        assert!(!mnemonic.is_legacy());
        Mnemonic::from_string(&mnemonic.to_string()).expect("Failed to reparse generated mnemonic");

        assert_eq!(Mnemonic::generate_12().unwrap().words().len(), 12);

        let err = Mnemonic::generate(18).unwrap_err();
        assert_eq!(
            err,
            KeyError::config("unsupported phrase length 18, only 12 or 24 are supported")
        );
    }

    #[test]
    fn test_generate_deterministic() {
        let rng = FixedRandom::new(vec![0u8; 16]);
        let mnemonic = Mnemonic::generate_with(&rng, 12).unwrap();
        assert_eq!(
            mnemonic.to_string(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
    }

    #[test]
    fn test_seed_vectors() {
        let mnemonic = Mnemonic::from_words(&[
            "radar", "blur", "cabbage", "chef", "fix", "engine", "embark", "joy", "scheme", "fiction",
            "master", "release",
        ])
        .unwrap();
        assert_eq!(
            hex::encode(&mnemonic.to_seed("").unwrap()[..]),
            "ed37b3442b3d550d0fbb6f01f20aac041c245d4911e13452cac7b1676a070eda66771b71c0083b34cc57ca9c327c459a0ec3600dbaf7f238ff27626c8430a806"
        );

        // BIP-39 reference vectors, passphrase "TREZOR"
        let vectors = [
            (
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
            ),
            (
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
                "ac27495480225222079d7be181583751e86f571027b0497b5b5d11218e0a8a13332572917f0f8e5a589620c6f15b11c61dee327651a14c34e18231052e48c069",
            ),
            (
                "void come effort suffer camp survey warrior heavy shoot primary clutch crush open amazing screen patrol group space point ten exist slush involve unfold",
                "01f5bced59dec48e362f2c45b5de68b9fd6c92c6634f44d6d40aab69056506f0e35524a518034ddc1192e1dacd32c1ed3eaa3c3b131c88ed8e7e54c49a5d0998",
            ),
        ];
        for (phrase, seed) in vectors {
            let mnemonic = Mnemonic::from_string(phrase).unwrap();
            assert_eq!(hex::encode(&mnemonic.to_seed("TREZOR").unwrap()[..]), seed);
        }
    }

    #[test]
    fn test_from_string_separators() {
        let messy = MNEMONIC_12.replace(' ', " ,\n").to_uppercase();
        let mnemonic: Mnemonic = messy.parse().unwrap();
        assert_eq!(mnemonic.to_string(), MNEMONIC_12);
    }

    #[test]
    fn test_rejection_reasons() {
        let thirteen = format!("{} abandon", MNEMONIC_12);
        assert_eq!(reason(Mnemonic::from_string(&thirteen).unwrap_err()), MnemonicErrorReason::BadLength);

        let mut words: Vec<&str> = MNEMONIC_12.split(' ').collect();
        words[4] = "notaword";
        words[9] = "qwerty";
        let err = Mnemonic::from_words(&words).unwrap_err();
        assert_eq!(err, KeyError::BadMnemonic(BadMnemonicError::unknown_words(vec![4, 9])));

        let mut words: Vec<&str> = MNEMONIC_24.split(' ').collect();
        words[23] = "abandon";
        assert_eq!(
            reason(Mnemonic::from_words(&words).unwrap_err()),
            MnemonicErrorReason::ChecksumMismatch
        );
    }

    #[test]
    fn test_standard_ed25519() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_24).unwrap();

        let key = mnemonic.to_standard_ed25519_private_key("", 0).unwrap();
        assert_eq!(key.to_string_raw(), "f8dcc99a1ced1cc59bc2fee161c26ca6d6af657da9aa654da724441343ecd16f");
        assert_eq!(
            key.public_key().to_string_raw(),
            "2e42c9f5a5cdbde64afa65ce3dbaf013d5f9ff8d177f6ef4eb89fbe8c084ec0d"
        );
        assert_eq!(
            hex::encode(key.chain_code().unwrap()),
            "404914563637c92d688deb9d41f3f25cbe8d6659d859cc743712fcfac72d7eda"
        );

        let key = mnemonic.to_standard_ed25519_private_key("", 2147483647).unwrap();
        assert_eq!(key.to_string_raw(), "e978a6407b74a0730f7aeb722ad64ab449b308e56006c8bff9aad070b9b66ddf");
        assert_eq!(
            key.public_key().to_string_raw(),
            "c4b33dca1f83509f17b69b2686ee46b8556143f79f4b9df7fe7ed3864c0c64d0"
        );

        let key = mnemonic.to_standard_ed25519_private_key("some pass", 0).unwrap();
        assert_eq!(key.to_string_raw(), "abeca64d2337db386e289482a252334c68c7536daaefff55dc169ddb77fbae28");

        let mnemonic = Mnemonic::from_string(MNEMONIC_12).unwrap();
        let key = mnemonic.to_standard_ed25519_private_key("", 0).unwrap();
        assert_eq!(key.to_string_raw(), "020487611f3167a68482b0f4aacdeb02cc30c52e53852af7b73779f67eeca3c5");
        assert_eq!(
            hex::encode(key.chain_code().unwrap()),
            "48c89d67e9920e443f09d2b14525213ff83b245c8b98d63747ea0801e6d0ff3f"
        );
    }

    #[test]
    fn test_standard_ed25519_rejects_hardened_index() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_24).unwrap();
        let err = mnemonic
            .to_standard_ed25519_private_key("", bip32::to_hardened_index(10))
            .unwrap_err();
        assert_eq!(err, KeyError::derivation("the index should not be pre-hardened"));
    }

    #[test]
    fn test_standard_ecdsa() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_24).unwrap();

        let key = mnemonic.to_standard_ecdsa_secp256k1_private_key("", 0).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaSecp256k1);
        assert_eq!(key.to_string_raw(), "0fde7bfd57ae6ec310bdd8b95967d98e8762a2c02da6f694b152cf9860860ab8");
        assert_eq!(
            key.public_key().to_string_raw(),
            "03b1c064b4d04d52e51f6c8e8bb1bff75d62fa7b1446412d5901d424f6aedd6fd4"
        );
        assert_eq!(
            hex::encode(key.chain_code().unwrap()),
            "7717bc71194c257d4b233e16cf48c24adef630052f874a262d19aeb2b527620d"
        );

        let key = mnemonic
            .to_standard_ecdsa_secp256k1_private_key("", bip32::to_hardened_index(0))
            .unwrap();
        assert_eq!(key.to_string_raw(), "aab7d720a32c2d1ea6123f58b074c865bb07f6c621f14cb012f66c08e64996bb");

        let key = mnemonic
            .to_standard_ecdsa_secp256k1_private_key("some pass", 2147483647)
            .unwrap();
        assert_eq!(key.to_string_raw(), "60cb2496a623e1201d4e0e7ce5da3833cd4ec7d6c2c06bce2bcbcbc9dfef22d6");
        assert_eq!(
            key.public_key().to_string_raw(),
            "02b59f348a6b69bd97afa80115e2d5331749b3c89c61297255430c487d6677f404"
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_ed25519_path() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_24).unwrap();
        let key = mnemonic
            .to_ed25519_private_key("", &DerivationPath::ledger_legacy())
            .unwrap();
        assert_eq!(
            key.to_string_der(),
            "302e020100300506032b657004220420853f15aecd22706b105da1d709b4ac05b4906170c2b9c7495dff9af49e1391da"
        );

        let key = mnemonic
            .to_ed25519_private_key("\u{03B4}\u{03BF}\u{03BA}\u{03B9}\u{03BC}\u{03AE}", &DerivationPath::ledger_legacy())
            .unwrap();
        assert_eq!(
            key.to_string_der(),
            "302e020100300506032b6570042204203fefe1000db9485372851d542453b07e7970de4e2ecede7187d733ac037f4d2c"
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_ecdsa_path_matches_standard() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_24).unwrap();
        let path = DerivationPath::slip44_ecdsa_ledger().child("0".parse().unwrap());
        let key = mnemonic.to_ecdsa_private_key("", &path).unwrap();
        let standard = mnemonic.to_standard_ecdsa_secp256k1_private_key("", 0).unwrap();
        assert_eq!(key.to_bytes_raw(), standard.to_bytes_raw());
    }

    #[test]
    fn test_legacy_v2_entropy() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_LEGACY_V2).unwrap();
        let key = mnemonic.to_legacy_private_key().unwrap();
        assert_eq!(key.to_string_raw(), "98aa82d6125b5efa04bf8372be7931d05cd77f5ef3330b97d6ee7c006eaaf312");
        assert_eq!(
            key.public_key().to_string_raw(),
            "e0ce688d614f22f96d9d213ca513d58a7d03d954fe45790006e6e86b25456465"
        );
        assert!(!key.is_derivable());

        let short = Mnemonic::from_string(MNEMONIC_12).unwrap();
        assert!(short.to_legacy_private_key().is_err());
    }

    #[test]
    fn test_legacy_22_words() {
        let list = legacy_words::synthetic_list();
        let words = legacy_phrase();

        let mnemonic = Mnemonic::from_words_with_legacy(&words, &list).unwrap();
        assert!(mnemonic.is_legacy());
        let key = mnemonic.to_legacy_private_key().unwrap();
        assert_eq!(key.to_string_raw(), LEGACY_ENTROPY);

        // same words through the strategy entry point
        let key = mnemonic
            .to_private_key(software(), &DefaultKeyFactory, "", &DerivationStrategy::LegacyEntropy)
            .unwrap();
        assert_eq!(key.to_string_raw(), LEGACY_ENTROPY);

        // without the list a 22-word phrase has no valid length
        assert_eq!(reason(Mnemonic::from_words(&words).unwrap_err()), MnemonicErrorReason::BadLength);
    }

    #[test]
    fn test_legacy_22_word_rejections() {
        let list = legacy_words::synthetic_list();

        let mut words = legacy_phrase();
        words[21] = format!("w{:04}", LEGACY_INDICES[21] + 1);
        assert_eq!(
            reason(Mnemonic::from_words_with_legacy(&words, &list).unwrap_err()),
            MnemonicErrorReason::ChecksumMismatch
        );

        let mut words = legacy_phrase();
        words[3] = "abandon".to_string();
        let err = Mnemonic::from_words_with_legacy(&words, &list).unwrap_err();
        assert_eq!(err, KeyError::BadMnemonic(BadMnemonicError::unknown_words(vec![3])));

        let phrase = legacy_phrase().join(", ").to_uppercase();
        assert!(Mnemonic::from_string_with_legacy(&phrase, &list).is_ok());
    }

    #[test]
    fn test_debug_hides_words() {
        let mnemonic = Mnemonic::from_string(MNEMONIC_12).unwrap();
        let debug = format!("{:?}", mnemonic);
        assert_eq!(debug, "Mnemonic { words: 12, legacy: false }");
    }
}
