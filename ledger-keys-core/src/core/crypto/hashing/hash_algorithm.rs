/// Hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    SHA256,
    SHA384,
    SHA512,
    Keccak256,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::SHA256 | HashAlgorithm::Keccak256 => 32,
            HashAlgorithm::SHA384 => 48,
            HashAlgorithm::SHA512 => 64,
        }
    }
}
