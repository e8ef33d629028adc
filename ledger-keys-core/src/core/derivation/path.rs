//! Derivation paths
//!
//! A path is a list of child indices, each explicitly normal or hardened.
//! Which levels of a BIP-44 path are hardened is decided by a
//! [`HardeningPolicy`] supplied by the caller.

use std::fmt;
use std::str::FromStr;

use crate::shared::constants::*;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// One element of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildIndex {
    Normal(u32),
    Hardened(u32),
}

impl ChildIndex {
    /// Build an index below 2^31 with the requested hardening
    pub fn new(index: u32, hardened: bool) -> KeyResult<Self> {
        if index & HARDENED_BIT != 0 {
            return Err(KeyError::derivation(format!(
                "child index {} is out of range; pass the unhardened value",
                index
            )));
        }
        Ok(if hardened {
            ChildIndex::Hardened(index)
        } else {
            ChildIndex::Normal(index)
        })
    }

    /// Interpret a raw 32-bit index; the high bit marks hardening
    pub fn from_raw(raw: u32) -> Self {
        if raw & HARDENED_BIT != 0 {
            ChildIndex::Hardened(raw & !HARDENED_BIT)
        } else {
            ChildIndex::Normal(raw)
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            ChildIndex::Normal(index) | ChildIndex::Hardened(index) => *index,
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildIndex::Hardened(_))
    }

    /// Raw 32-bit value as fed to BIP-32
    pub fn to_raw(&self) -> u32 {
        match self {
            ChildIndex::Normal(index) => *index,
            ChildIndex::Hardened(index) => *index | HARDENED_BIT,
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildIndex::Normal(index) => write!(f, "{}", index),
            ChildIndex::Hardened(index) => write!(f, "{}'", index),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (digits, hardened) = match s.strip_suffix('\'').or_else(|| s.strip_suffix('h')) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|e| KeyError::derivation(format!("Invalid index '{}': {}", digits, e)))?;
        ChildIndex::new(index, hardened)
    }
}

/// Which levels of a path are hardened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardeningPolicy {
    AllHardened,
    NoneHardened,
    /// Level `n` is hardened when `levels[n]` is true; deeper levels are normal
    PerLevel(Vec<bool>),
}

impl HardeningPolicy {
    /// BIP-44: purpose, coin type and account are hardened; change and index are not
    pub fn standard() -> Self {
        HardeningPolicy::PerLevel(vec![true, true, true, false, false])
    }

    pub fn hardens(&self, level: usize) -> bool {
        match self {
            HardeningPolicy::AllHardened => true,
            HardeningPolicy::NoneHardened => false,
            HardeningPolicy::PerLevel(levels) => levels.get(level).copied().unwrap_or(false),
        }
    }
}

impl Default for HardeningPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ordered list of child indices below the master key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    elements: Vec<ChildIndex>,
}

impl DerivationPath {
    pub fn new(elements: Vec<ChildIndex>) -> Self {
        Self { elements }
    }

    /// Apply `policy` to plain indices
    pub fn from_indices(indices: &[u32], policy: &HardeningPolicy) -> KeyResult<Self> {
        let elements = indices
            .iter()
            .enumerate()
            .map(|(level, index)| ChildIndex::new(*index, policy.hardens(level)))
            .collect::<KeyResult<Vec<_>>>()?;
        Ok(Self { elements })
    }

    /// `m/44'/coin_type'/account'/change[/index]` under `policy`
    pub fn bip44(
        coin_type: u32,
        account: u32,
        change: u32,
        index: Option<u32>,
        policy: &HardeningPolicy,
    ) -> KeyResult<Self> {
        let mut indices = vec![BIP44_PURPOSE, coin_type, account, change];
        if let Some(index) = index {
            indices.push(index);
        }
        Self::from_indices(&indices, policy)
    }

    /// `m/44/3030/0/0` unhardened, the path of the deprecated recovery
    /// routes. SLIP-10 still hardens every level; BIP-32 does not.
    pub fn ledger_legacy() -> Self {
        Self::new(
            [BIP44_PURPOSE, LEDGER_COIN_TYPE, 0, 0]
                .iter()
                .map(|index| ChildIndex::Normal(*index))
                .collect(),
        )
    }

    /// `m/44'/3030'/0'/0`
    pub fn slip44_ecdsa_ledger() -> Self {
        Self::new(vec![
            ChildIndex::Hardened(BIP44_PURPOSE),
            ChildIndex::Hardened(LEDGER_COIN_TYPE),
            ChildIndex::Hardened(0),
            ChildIndex::Normal(0),
        ])
    }

    /// `m/44'/60'/0'/0/0`
    pub fn slip44_ecdsa_eth() -> Self {
        Self::new(vec![
            ChildIndex::Hardened(BIP44_PURPOSE),
            ChildIndex::Hardened(ETH_COIN_TYPE),
            ChildIndex::Hardened(0),
            ChildIndex::Normal(0),
            ChildIndex::Normal(0),
        ])
    }

    pub fn elements(&self) -> &[ChildIndex] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Path extended by one element
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut elements = self.elements.clone();
        elements.push(index);
        Self { elements }
    }

    pub fn to_indices(&self) -> Vec<u32> {
        self.elements.iter().map(ChildIndex::to_raw).collect()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = s
            .strip_prefix('m')
            .ok_or_else(|| KeyError::derivation(format!("Path must start with 'm': {}", s)))?;
        if rest.is_empty() {
            return Ok(Self::default());
        }
        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| KeyError::derivation(format!("Path must start with 'm/': {}", s)))?;

        let elements = rest
            .split('/')
            .map(str::parse)
            .collect::<KeyResult<Vec<ChildIndex>>>()?;
        Ok(Self { elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path: DerivationPath = "m/44'/3030'/0'/0/7".parse().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.to_string(), "m/44'/3030'/0'/0/7");
        assert_eq!(
            path.to_indices(),
            vec![0x8000_002c, 0x8000_0bd6, 0x8000_0000, 0, 7]
        );

        let h_path: DerivationPath = "m/44h/60h/0h/0/0".parse().unwrap();
        assert_eq!(h_path, DerivationPath::slip44_ecdsa_eth());

        assert!("m".parse::<DerivationPath>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!("44'/0".parse::<DerivationPath>().is_err());
        assert!("m/abc".parse::<DerivationPath>().is_err());
        assert!("m/2147483648".parse::<DerivationPath>().is_err());
        assert!("m//1".parse::<DerivationPath>().is_err());
    }

    #[test]
    fn test_bip44_policy() {
        let standard = DerivationPath::bip44(3030, 0, 0, Some(5), &HardeningPolicy::standard()).unwrap();
        assert_eq!(standard.to_string(), "m/44'/3030'/0'/0/5");

        let hardened = DerivationPath::bip44(3030, 0, 0, Some(5), &HardeningPolicy::AllHardened).unwrap();
        assert_eq!(hardened.to_string(), "m/44'/3030'/0'/0'/5'");

        let custom = DerivationPath::bip44(
            3030,
            0,
            0,
            None,
            &HardeningPolicy::PerLevel(vec![true, false, true]),
        )
        .unwrap();
        assert_eq!(custom.to_string(), "m/44'/3030/0'/0");
    }

    #[test]
    fn test_child_index_raw() {
        assert_eq!(ChildIndex::from_raw(0x8000_0001), ChildIndex::Hardened(1));
        assert_eq!(ChildIndex::from_raw(1), ChildIndex::Normal(1));
        assert_eq!(ChildIndex::Hardened(1).to_raw(), 0x8000_0001);
        assert!(ChildIndex::new(0x8000_0000, false).is_err());
    }

    #[test]
    fn test_well_known_paths() {
        assert_eq!(DerivationPath::ledger_legacy().to_string(), "m/44/3030/0/0");
        assert_eq!(DerivationPath::slip44_ecdsa_ledger().to_string(), "m/44'/3030'/0'/0");
        let child = DerivationPath::slip44_ecdsa_ledger().child(ChildIndex::Normal(3));
        assert_eq!(child.to_string(), "m/44'/3030'/0'/0/3");
    }
}
