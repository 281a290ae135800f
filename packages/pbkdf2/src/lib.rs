//! # Timelock PBKDF2
//!
//! PBKDF2-HMAC-SHA256 for many independent lanes at once, split into three
//! phases a host scheduler drives incrementally: setup, any number of
//! strides, harvest. All lane state lives in flat buffers the host can read
//! or overwrite between calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use timelock_pbkdf2::{EngineConfig, LaneEngine, legs_for_extra_iterations};
//!
//! # fn main() -> timelock_pbkdf2::Result<()> {
//! let mut engine = LaneEngine::new(EngineConfig::with_max_lanes(4))?;
//! engine.set_salt(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0xaa, 0xbb, 0xcc, 0xdd])?;
//! let elem_len = engine.load_passwords(&[b"p"])?;
//!
//! engine.setup(1, elem_len)?;
//! let mut legs = legs_for_extra_iterations(1000);
//! while legs > 0 {
//!     let step = legs.min(256);
//!     engine.stride(step)?;
//!     legs -= step;
//! }
//! engine.harvest()?;
//!
//! assert_eq!(engine.derived_key(0)?.len(), 32);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod api;
pub mod checkpoint;
pub mod config;
pub mod engine;
pub mod error;
pub mod hmac;
pub mod layout;
pub mod sha256;

pub use api::{DerivedKeys, KdfPasses, LaneBatchBuilder};
pub use checkpoint::{EngineCheckpoint, LaneRecord};
pub use config::{EngineConfig, ScheduleConfig};
pub use engine::{
    advance_lane, hmac_leg, legs_for_extra_iterations, BatchPhase, LaneCursor, LaneEngine, Leg,
};
pub use error::{KdfError, Result};
pub use hmac::HmacSha256;
pub use layout::{LaneLayout, Vector, HASH_LEN};
pub use sha256::Sha256;

use api::states::{NoPasses, NoSalt};

/// Main entry point
pub struct Kdf;

impl Kdf {
    /// Builder for a batch of lane-parallel PBKDF2-HMAC-SHA256 derivations
    #[must_use]
    pub fn pbkdf2_lanes() -> LaneBatchBuilder<NoSalt, NoPasses> {
        LaneBatchBuilder::new()
    }
}
