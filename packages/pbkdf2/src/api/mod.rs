//! Fluent derivation API
//!
//! Usage: `Kdf::pbkdf2_lanes().with_salt(salt).with_passes(passes).derive(&passwords).await`

pub mod derived_keys;
pub mod lane_builder;
pub mod passes;
pub mod states;

pub use derived_keys::DerivedKeys;
pub use lane_builder::{segment_plan, LaneBatchBuilder};
pub use passes::KdfPasses;
