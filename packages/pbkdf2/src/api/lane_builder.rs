//! Lane batch builder driving the engine on a tokio runtime
//!
//! Usage: `Kdf::pbkdf2_lanes().with_salt(salt).with_iterations(c).derive(&passwords).await`

use super::derived_keys::DerivedKeys;
use super::passes::KdfPasses;
use super::states::{HasPasses, HasSalt, NoPasses, NoSalt};
use crate::config::{EngineConfig, ScheduleConfig};
use crate::engine::{legs_for_extra_iterations, LaneEngine};
use crate::error::{KdfError, Result};
use crate::layout::{HASH_LEN, MAX_PASSWORD_LEN};
use tracing::debug;

/// Builder for one batch of PBKDF2-HMAC-SHA256 derivations
///
/// Lane `p` derives `PBKDF2(password_p, salt || be32(p), c, 32)`.
#[derive(Clone, Debug)]
pub struct LaneBatchBuilder<S, P> {
    salt: S,
    passes: P,
    schedule: ScheduleConfig,
}

impl Default for LaneBatchBuilder<NoSalt, NoPasses> {
    fn default() -> Self {
        Self::new()
    }
}

impl LaneBatchBuilder<NoSalt, NoPasses> {
    /// Create a builder with the default schedule
    #[must_use]
    pub fn new() -> Self {
        Self {
            salt: NoSalt,
            passes: NoPasses,
            schedule: ScheduleConfig::default(),
        }
    }
}

impl<P> LaneBatchBuilder<NoSalt, P> {
    /// Set the common salt prefix shared by every lane
    pub fn with_salt<T: Into<Vec<u8>>>(self, salt: T) -> LaneBatchBuilder<HasSalt, P> {
        LaneBatchBuilder {
            salt: HasSalt(salt.into()),
            passes: self.passes,
            schedule: self.schedule,
        }
    }
}

impl<S> LaneBatchBuilder<S, NoPasses> {
    /// Use an iteration preset
    pub fn with_passes(self, passes: KdfPasses) -> LaneBatchBuilder<S, HasPasses> {
        self.with_iterations(passes.iterations())
    }

    /// Set the total PBKDF2 iteration count `c`
    pub fn with_iterations(self, iterations: u32) -> LaneBatchBuilder<S, HasPasses> {
        LaneBatchBuilder {
            salt: self.salt,
            passes: HasPasses(iterations),
            schedule: self.schedule,
        }
    }
}

impl<S, P> LaneBatchBuilder<S, P> {
    /// Replace the stride pacing and segment chaining
    #[must_use]
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }
}

impl LaneBatchBuilder<HasSalt, HasPasses> {
    /// Derive one 32-byte key per password
    ///
    /// Strides of `legs_per_stride` legs alternate with yields to the runtime.
    /// With `segment_iterations` set, each segment's keys become the next
    /// segment's passwords.
    ///
    /// # Errors
    ///
    /// Fails on a zero iteration count, an invalid schedule, an empty batch, or
    /// a password or salt the engine cannot hold.
    pub async fn derive<T: AsRef<[u8]>>(self, passwords: &[T]) -> Result<DerivedKeys> {
        let HasSalt(salt) = self.salt;
        let HasPasses(iterations) = self.passes;
        if iterations == 0 {
            return Err(KdfError::invalid_parameters(
                "PBKDF2 iterations must be non-zero",
            ));
        }
        self.schedule.validate()?;

        let lanes = passwords.len();
        let longest = passwords
            .iter()
            .map(|p| p.as_ref().len())
            .max()
            .ok_or(KdfError::EmptyBatch)?;
        if longest > MAX_PASSWORD_LEN {
            return Err(KdfError::PasswordTooLong {
                len: longest,
                max: MAX_PASSWORD_LEN,
            });
        }
        let config = EngineConfig::with_max_lanes(lanes)
            .salt_len(salt.len())
            .max_password_len(longest);
        let mut engine = LaneEngine::new(config)?;
        engine.set_salt(&salt)?;
        let mut elem_len = engine.load_passwords(passwords)?;

        let segments = segment_plan(iterations, self.schedule.segment_iterations);
        for (index, &segment) in segments.iter().enumerate() {
            engine.setup(lanes, elem_len)?;

            let mut remaining = legs_for_extra_iterations(u64::from(segment - 1));
            while remaining > 0 {
                let legs = remaining.min(self.schedule.legs_per_stride);
                engine.stride(legs)?;
                remaining -= legs;
                tokio::task::yield_now().await;
            }

            engine.harvest()?;
            elem_len = HASH_LEN;
            debug!(
                segment = index,
                segments = segments.len(),
                iterations = segment,
                lanes,
                "PBKDF2 segment complete"
            );
        }

        Ok(DerivedKeys::new(engine.hash_buf()[..lanes * HASH_LEN].to_vec()))
    }
}

/// Split `iterations` into chained segments of at most `cap` iterations
#[must_use]
pub fn segment_plan(iterations: u32, cap: Option<u32>) -> Vec<u32> {
    match cap {
        Some(cap) if cap > 0 && cap < iterations => {
            let mut plan = Vec::with_capacity((iterations / cap + 1) as usize);
            let mut remaining = iterations;
            while remaining > 0 {
                let segment = remaining.min(cap);
                plan.push(segment);
                remaining -= segment;
            }
            plan
        }
        _ => vec![iterations],
    }
}
