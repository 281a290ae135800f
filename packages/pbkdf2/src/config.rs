//! Engine and schedule configuration

use crate::error::{KdfError, Result};
use crate::layout::{DEFAULT_MAX_LANES, DEFAULT_SALT_LEN, HASH_LEN, MAX_PASSWORD_LEN};
use serde::{Deserialize, Serialize};

/// Sizing of a [`LaneEngine`](crate::LaneEngine)'s buffers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lanes the buffers are allocated for
    #[serde(default = "default_max_lanes")]
    pub max_lanes: usize,
    /// Length of the common salt prefix in bytes
    #[serde(default = "default_salt_len")]
    pub salt_len: usize,
    /// PBKDF2 block index appended after the lane suffix
    #[serde(default = "default_block_index")]
    pub block_index: u32,
    /// Longest password record stride the hash buffer must hold
    #[serde(default = "default_max_password_len")]
    pub max_password_len: usize,
}

fn default_max_lanes() -> usize {
    DEFAULT_MAX_LANES
}

fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

fn default_block_index() -> u32 {
    1
}

fn default_max_password_len() -> usize {
    HASH_LEN
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_lanes: default_max_lanes(),
            salt_len: default_salt_len(),
            block_index: default_block_index(),
            max_password_len: default_max_password_len(),
        }
    }
}

impl EngineConfig {
    /// Configuration for `max_lanes` lanes with default salt and block index
    #[must_use]
    pub fn with_max_lanes(max_lanes: usize) -> Self {
        Self {
            max_lanes,
            ..Self::default()
        }
    }

    /// Set the common salt prefix length
    #[must_use]
    pub fn salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Set the PBKDF2 block index
    #[must_use]
    pub fn block_index(mut self, block_index: u32) -> Self {
        self.block_index = block_index;
        self
    }

    /// Set the longest password record stride
    #[must_use]
    pub fn max_password_len(mut self, max_password_len: usize) -> Self {
        self.max_password_len = max_password_len;
        self
    }

    /// Bytes in the hash buffer: one derived key or one password record per lane
    #[must_use]
    pub fn hash_buf_len(&self) -> usize {
        self.max_password_len.max(HASH_LEN) * self.max_lanes
    }

    /// Check the configuration can be allocated and run
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidConfig`] when the lane capacity is zero or
    /// does not fit the 32-bit lane suffix, the salt buffer or password stride
    /// would outgrow one block, or the block index is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_lanes == 0 {
            return Err(KdfError::invalid_config("max_lanes must be non-zero"));
        }
        if u32::try_from(self.max_lanes).is_err() {
            return Err(KdfError::invalid_config(format!(
                "max_lanes {} exceeds the 32-bit lane suffix",
                self.max_lanes
            )));
        }
        if self.salt_len > MAX_PASSWORD_LEN - crate::layout::COUNTER_LEN {
            return Err(KdfError::invalid_config(format!(
                "salt_len {} leaves no room for the lane suffix",
                self.salt_len
            )));
        }
        if self.block_index == 0 {
            return Err(KdfError::invalid_config("PBKDF2 block index starts at 1"));
        }
        if self.max_password_len > MAX_PASSWORD_LEN {
            return Err(KdfError::invalid_config(format!(
                "max_password_len {} exceeds one block",
                self.max_password_len
            )));
        }
        Ok(())
    }
}

/// How a host driver paces a derivation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Legs advanced per stride call before yielding
    #[serde(default = "default_legs_per_stride")]
    pub legs_per_stride: u64,
    /// Iterations per chained segment; `None` runs one segment
    #[serde(default)]
    pub segment_iterations: Option<u32>,
}

fn default_legs_per_stride() -> u64 {
    2 * 4096
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            legs_per_stride: default_legs_per_stride(),
            segment_iterations: None,
        }
    }
}

impl ScheduleConfig {
    /// Check the schedule can make progress
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidConfig`] for a zero stride or segment size.
    pub fn validate(&self) -> Result<()> {
        if self.legs_per_stride == 0 {
            return Err(KdfError::invalid_config("legs_per_stride must be non-zero"));
        }
        if self.segment_iterations == Some(0) {
            return Err(KdfError::invalid_config(
                "segment_iterations must be non-zero",
            ));
        }
        Ok(())
    }
}
