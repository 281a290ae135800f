//! PBKDF2 iteration presets

/// Total PBKDF2 iteration count `c`, counting the first block computed at setup
///
/// # Security Considerations
///
/// - For password hashing use at least `Default`
/// - `Fast` is only for tests and development
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KdfPasses {
    /// 1,000 iterations
    Fast,
    /// 10,000 iterations
    Moderate,
    /// 600,000 iterations, the OWASP figure for PBKDF2-HMAC-SHA256
    #[default]
    Default,
    /// 1,000,000 iterations
    Strong,
    /// 10,000,000 iterations, one chained segment of the timelock encryptor
    Maximum,
}

impl KdfPasses {
    /// Iteration count of this preset
    #[must_use]
    pub fn iterations(&self) -> u32 {
        match self {
            Self::Fast => 1_000,
            Self::Moderate => 10_000,
            Self::Default => 600_000,
            Self::Strong => 1_000_000,
            Self::Maximum => 10_000_000,
        }
    }

    /// Whether this preset is suitable for password hashing
    #[must_use]
    pub fn is_password_safe(&self) -> bool {
        self.iterations() >= 600_000
    }
}

impl From<KdfPasses> for u32 {
    fn from(passes: KdfPasses) -> Self {
        passes.iterations()
    }
}
