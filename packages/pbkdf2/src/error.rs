//! Error handling for the lane engine and its drivers

use thiserror::Error;

/// PBKDF2 lane engine errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdfError {
    /// More lanes requested than the engine was sized for
    #[error("Lane capacity exceeded: requested {requested}, capacity {capacity}")]
    LaneCapacityExceeded {
        /// Lanes requested by the caller
        requested: usize,
        /// Lanes the engine was allocated for
        capacity: usize,
    },

    /// A batch needs at least one lane
    #[error("Batch must contain at least one lane")]
    EmptyBatch,

    /// Password does not fit in one SHA-256 block
    #[error("Password too long: {len} bytes, maximum {max}")]
    PasswordTooLong {
        /// Offending password length in bytes
        len: usize,
        /// Largest accepted length in bytes
        max: usize,
    },

    /// Packed password records do not fit in the hash buffer
    #[error("Password records need {required} bytes, hash buffer holds {capacity}")]
    PasswordRegionOverflow {
        /// Bytes needed for `lane_count * elem_len`
        required: usize,
        /// Hash buffer capacity in bytes
        capacity: usize,
    },

    /// Lane index outside the active batch
    #[error("Lane {lane} out of range for a batch of {lanes} lanes")]
    LaneOutOfRange {
        /// Requested lane index
        lane: usize,
        /// Active lane count
        lanes: usize,
    },

    /// Phase function called in the wrong batch state
    #[error("Invalid batch phase: expected {expected}, found {actual}")]
    InvalidPhase {
        /// Phase the operation requires
        expected: &'static str,
        /// Phase the engine is in
        actual: &'static str,
    },

    /// Salt prefix length does not match the engine configuration
    #[error("Invalid salt length: expected {expected}, got {actual}")]
    InvalidSalt {
        /// Configured salt prefix length
        expected: usize,
        /// Supplied salt length
        actual: usize,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid parameters passed to an operation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KdfError {
    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Create an `invalid_config` error
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for lane engine operations
pub type Result<T> = std::result::Result<T, KdfError>;
