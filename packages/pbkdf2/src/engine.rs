//! Lane-parallel, resumable PBKDF2-HMAC-SHA256
//!
//! A batch runs in three phases:
//!
//! 1. [`LaneEngine::setup`] derives each lane's HMAC key schedule from the
//!    password records in the hash buffer and computes `U1` eagerly.
//! 2. [`LaneEngine::stride`] advances every lane by a budget of legs, where
//!    a leg is one SHA-256 compression: the inner or the outer half of one
//!    HMAC invocation. It can be called any number of times.
//! 3. [`LaneEngine::harvest`] writes each lane's accumulator into the hash
//!    buffer as a 32-byte big-endian key.
//!
//! The engine counts legs per lane but not iterations: the caller runs
//! `2 * (c - 1)` legs for a PBKDF2 iteration count of `c`.

use crate::checkpoint::{EngineCheckpoint, LaneRecord};
use crate::config::EngineConfig;
use crate::error::{KdfError, Result};
use crate::hmac::HmacSha256;
use crate::layout::{
    words_to_be_bytes, LaneLayout, Vector, COUNTER_LEN, HASH_LEN, MAX_PASSWORD_LEN, RECORD_WORDS,
};
use crate::sha256::{compress, BLOCK_LEN};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::{Zeroize, Zeroizing};

/// Schedule word 8 of a 32-byte message: the `0x80` padding byte
const MESSAGE_PAD: u32 = 0x8000_0000;

/// Schedule word 15: bit length of one key block plus one digest
const MESSAGE_BITS: u32 = ((BLOCK_LEN + HASH_LEN) * 8) as u32;

/// Legs needed for `extra` iterations beyond the `U1` computed by setup
#[must_use]
pub const fn legs_for_extra_iterations(extra: u64) -> u64 {
    extra.saturating_mul(2)
}

/// Which half of an HMAC invocation a leg computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leg {
    /// Compression seeded from the frozen inner state `I`
    Inner,
    /// Compression seeded from the frozen outer state `O`; completes one iteration
    Outer,
}

impl Leg {
    /// Leg that follows `legs_done` completed legs
    #[must_use]
    pub const fn after(legs_done: u64) -> Self {
        if legs_done % 2 == 0 {
            Self::Inner
        } else {
            Self::Outer
        }
    }

    /// The other leg
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Inner => Self::Outer,
            Self::Outer => Self::Inner,
        }
    }

    /// Frozen state this leg's compression starts from
    #[must_use]
    pub fn seed<'a>(self, inner: &'a [u32; 8], outer: &'a [u32; 8]) -> &'a [u32; 8] {
        match self {
            Self::Inner => inner,
            Self::Outer => outer,
        }
    }
}

/// Per-lane progress since setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneCursor {
    /// Legs advanced since setup
    pub legs_done: u64,
}

impl LaneCursor {
    /// Next leg to run
    #[must_use]
    pub const fn next_leg(&self) -> Leg {
        Leg::after(self.legs_done)
    }

    /// PBKDF2 iterations folded into `R`, counting the `U1` from setup
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        1 + self.legs_done / 2
    }
}

/// Batch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    /// No batch has been set up
    Empty,
    /// Lanes are set up and may be strided
    Ready {
        /// Active lane count
        lanes: usize,
    },
    /// Keys have been written to the hash buffer
    Harvested {
        /// Lane count of the harvested batch
        lanes: usize,
    },
}

impl BatchPhase {
    /// Short name used in errors and logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ready { .. } => "ready",
            Self::Harvested { .. } => "harvested",
        }
    }
}

/// One HMAC leg: compress a 32-byte message from a frozen key state
#[must_use]
pub fn hmac_leg(seed: &[u32; 8], message: &[u32; 8]) -> [u32; 8] {
    let mut block = [0u32; 16];
    block[..8].copy_from_slice(message);
    block[8] = MESSAGE_PAD;
    block[15] = MESSAGE_BITS;

    let mut state = *seed;
    compress(&mut state, &block);
    state
}

/// Advance one lane by `legs` legs
///
/// This is the whole per-lane kernel. It touches nothing outside `record`,
/// so hosts may run lanes on any execution units and store them back with
/// [`LaneEngine::store_lane_record`].
pub fn advance_lane(record: &mut LaneRecord, legs: u64) {
    for _ in 0..legs {
        let leg = record.next_leg();
        record.w = hmac_leg(leg.seed(&record.i, &record.o), &record.w);
        if leg == Leg::Outer {
            for (r, w) in record.r.iter_mut().zip(record.w) {
                *r ^= w;
            }
        }
        record.legs_done = record.legs_done.wrapping_add(1);
    }
}

/// Owner of the salt, hash and lane state buffers for one batch at a time
pub struct LaneEngine {
    config: EngineConfig,
    salt_buf: Vec<u8>,
    hash_buf: Vec<u8>,
    state: Vec<u32>,
    cursors: Vec<LaneCursor>,
    phase: BatchPhase,
}

impl std::fmt::Debug for LaneEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaneEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl LaneEngine {
    /// Allocate buffers for `config.max_lanes` lanes
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidConfig`] when the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let lanes = config.max_lanes;
        debug!(
            max_lanes = lanes,
            salt_len = config.salt_len,
            "Allocating PBKDF2 lane engine"
        );
        Ok(Self {
            salt_buf: vec![0u8; config.salt_len + COUNTER_LEN],
            hash_buf: vec![0u8; config.hash_buf_len()],
            state: vec![0u32; RECORD_WORDS * lanes],
            cursors: vec![LaneCursor::default(); lanes],
            phase: BatchPhase::Empty,
            config,
        })
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lane capacity
    #[must_use]
    pub fn max_lanes(&self) -> usize {
        self.config.max_lanes
    }

    /// Current batch phase
    #[must_use]
    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Lane count of the current or last batch
    #[must_use]
    pub fn lane_count(&self) -> Option<usize> {
        match self.phase {
            BatchPhase::Empty => None,
            BatchPhase::Ready { lanes } | BatchPhase::Harvested { lanes } => Some(lanes),
        }
    }

    /// Whole salt buffer: common prefix followed by the lane suffix
    #[must_use]
    pub fn salt_buf(&self) -> &[u8] {
        &self.salt_buf
    }

    /// Mutable salt buffer for zero-copy host writes
    pub fn salt_buf_mut(&mut self) -> &mut [u8] {
        &mut self.salt_buf
    }

    /// Copy the common salt prefix into the salt buffer
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidSalt`] if `salt` is not exactly `salt_len` bytes.
    pub fn set_salt(&mut self, salt: &[u8]) -> Result<()> {
        if salt.len() != self.config.salt_len {
            return Err(KdfError::InvalidSalt {
                expected: self.config.salt_len,
                actual: salt.len(),
            });
        }
        self.salt_buf[..salt.len()].copy_from_slice(salt);
        Ok(())
    }

    /// Hash buffer: password records before setup, derived keys after harvest
    #[must_use]
    pub fn hash_buf(&self) -> &[u8] {
        &self.hash_buf
    }

    /// Mutable hash buffer for zero-copy host writes
    pub fn hash_buf_mut(&mut self) -> &mut [u8] {
        &mut self.hash_buf
    }

    /// Pack `passwords` into the hash buffer, zero-padded to the longest one
    ///
    /// Returns the record stride to pass to [`setup`](Self::setup).
    /// Trailing zero padding does not change an HMAC key, so shorter
    /// passwords derive the same keys they would alone.
    ///
    /// # Errors
    ///
    /// Fails on an empty batch, too many lanes, a password longer than one
    /// block, or records that do not fit the hash buffer.
    pub fn load_passwords<P: AsRef<[u8]>>(&mut self, passwords: &[P]) -> Result<usize> {
        let elem_len = passwords
            .iter()
            .map(|p| p.as_ref().len())
            .max()
            .ok_or(KdfError::EmptyBatch)?;
        self.check_batch(passwords.len(), elem_len)?;

        for (slot, password) in self
            .hash_buf
            .chunks_exact_mut(elem_len.max(1))
            .zip(passwords)
        {
            let password = password.as_ref();
            slot[..password.len()].copy_from_slice(password);
            slot[password.len()..].fill(0);
        }
        Ok(elem_len)
    }

    /// Lane state words in the plane layout of [`crate::layout`]
    #[must_use]
    pub fn state_words(&self) -> &[u32] {
        &self.state
    }

    /// Mutable lane state words for host injection between stride calls
    pub fn state_words_mut(&mut self) -> &mut [u32] {
        &mut self.state
    }

    /// Layout of the active batch
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] before the first setup.
    pub fn layout(&self) -> Result<LaneLayout> {
        self.lane_count()
            .map(LaneLayout::new)
            .ok_or(KdfError::InvalidPhase {
                expected: "ready",
                actual: self.phase.name(),
            })
    }

    fn check_batch(&self, lane_count: usize, elem_len: usize) -> Result<()> {
        if lane_count == 0 {
            return Err(KdfError::EmptyBatch);
        }
        if lane_count > self.config.max_lanes {
            return Err(KdfError::LaneCapacityExceeded {
                requested: lane_count,
                capacity: self.config.max_lanes,
            });
        }
        if elem_len > MAX_PASSWORD_LEN {
            return Err(KdfError::PasswordTooLong {
                len: elem_len,
                max: MAX_PASSWORD_LEN,
            });
        }
        let required = lane_count * elem_len;
        if required > self.hash_buf.len() {
            return Err(KdfError::PasswordRegionOverflow {
                required,
                capacity: self.hash_buf.len(),
            });
        }
        Ok(())
    }

    fn ready_lanes(&self) -> Result<usize> {
        match self.phase {
            BatchPhase::Ready { lanes } => Ok(lanes),
            other => Err(KdfError::InvalidPhase {
                expected: "ready",
                actual: other.name(),
            }),
        }
    }

    fn check_lane(lane: usize, lanes: usize) -> Result<()> {
        if lane >= lanes {
            return Err(KdfError::LaneOutOfRange { lane, lanes });
        }
        Ok(())
    }

    /// Derive key schedules and `U1` for `lane_count` lanes
    ///
    /// Lane `p` reads its password from bytes `p * elem_len .. (p + 1) * elem_len`
    /// of the hash buffer and uses the salt `prefix || be32(p) || be32(block_index)`.
    /// Any previous batch state is overwritten.
    ///
    /// # Errors
    ///
    /// Fails on an empty batch, `lane_count > max_lanes`, `elem_len > 64`, or
    /// password records larger than the hash buffer.
    pub fn setup(&mut self, lane_count: usize, elem_len: usize) -> Result<()> {
        self.check_batch(lane_count, elem_len)?;

        let layout = LaneLayout::new(lane_count);
        let salt_len = self.config.salt_len;
        let block_index = self.config.block_index.to_be_bytes();
        let mut key = Zeroizing::new([0u8; BLOCK_LEN]);

        for lane in 0..lane_count {
            key.fill(0);
            let start = lane * elem_len;
            key[..elem_len].copy_from_slice(&self.hash_buf[start..start + elem_len]);
            let schedule = HmacSha256::new(&key);

            let suffix = u32::try_from(lane)
                .map_err(|_| KdfError::internal("lane index exceeds 32-bit suffix"))?;
            self.salt_buf[salt_len..salt_len + COUNTER_LEN].copy_from_slice(&suffix.to_be_bytes());

            let mut mac = schedule.clone();
            mac.update(&self.salt_buf);
            mac.update(&block_index);
            let u1 = mac.finalize();

            layout.write(&mut self.state, Vector::R, lane, &u1);
            layout.write(&mut self.state, Vector::W, lane, &u1);
            layout.write(&mut self.state, Vector::I, lane, &schedule.inner_state());
            layout.write(&mut self.state, Vector::O, lane, &schedule.outer_state());
            self.cursors[lane] = LaneCursor::default();
        }

        self.phase = BatchPhase::Ready { lanes: lane_count };
        debug!(lanes = lane_count, elem_len, "PBKDF2 lanes set up");
        Ok(())
    }

    fn load_record(&self, layout: LaneLayout, lane: usize) -> LaneRecord {
        LaneRecord {
            r: layout.read(&self.state, Vector::R, lane),
            w: layout.read(&self.state, Vector::W, lane),
            i: layout.read(&self.state, Vector::I, lane),
            o: layout.read(&self.state, Vector::O, lane),
            legs_done: self.cursors[lane].legs_done,
        }
    }

    fn advance(&mut self, layout: LaneLayout, lane: usize, legs: u64) {
        let mut record = self.load_record(layout, lane);
        advance_lane(&mut record, legs);
        layout.write(&mut self.state, Vector::R, lane, &record.r);
        layout.write(&mut self.state, Vector::W, lane, &record.w);
        self.cursors[lane] = record.cursor();
        record.zeroize();
    }

    /// Advance every active lane by `legs` legs
    ///
    /// Splitting a budget across calls is bit-identical to one call.
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] unless a batch is ready.
    pub fn stride(&mut self, legs: u64) -> Result<()> {
        let lanes = self.ready_lanes()?;
        let layout = LaneLayout::new(lanes);
        for lane in 0..lanes {
            self.advance(layout, lane, legs);
        }
        trace!(lanes, legs, "Strided all lanes");
        Ok(())
    }

    /// Advance a single lane by `legs` legs
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] unless a batch is ready, or
    /// [`KdfError::LaneOutOfRange`] for a lane outside it.
    pub fn stride_lane(&mut self, lane: usize, legs: u64) -> Result<()> {
        let lanes = self.ready_lanes()?;
        Self::check_lane(lane, lanes)?;
        self.advance(LaneLayout::new(lanes), lane, legs);
        trace!(lane, legs, "Strided lane");
        Ok(())
    }

    /// Write every lane's `R` into the hash buffer as big-endian bytes
    ///
    /// Lane `p`'s key lands at bytes `p * 32 .. (p + 1) * 32`, overwriting
    /// the password records. Harvesting does not check that enough legs ran.
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] unless a batch is ready.
    pub fn harvest(&mut self) -> Result<()> {
        let lanes = self.ready_lanes()?;
        let layout = LaneLayout::new(lanes);
        for (lane, slot) in self
            .hash_buf
            .chunks_exact_mut(HASH_LEN)
            .take(lanes)
            .enumerate()
        {
            let r = layout.read(&self.state, Vector::R, lane);
            slot.copy_from_slice(&words_to_be_bytes(&r));
        }
        self.phase = BatchPhase::Harvested { lanes };
        debug!(lanes, "PBKDF2 lanes harvested");
        Ok(())
    }

    /// Derived key of one lane after harvest
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] before harvest or
    /// [`KdfError::LaneOutOfRange`] for a lane outside the batch.
    pub fn derived_key(&self, lane: usize) -> Result<&[u8]> {
        let BatchPhase::Harvested { lanes } = self.phase else {
            return Err(KdfError::InvalidPhase {
                expected: "harvested",
                actual: self.phase.name(),
            });
        };
        Self::check_lane(lane, lanes)?;
        Ok(&self.hash_buf[lane * HASH_LEN..(lane + 1) * HASH_LEN])
    }

    /// Progress cursor of one lane
    ///
    /// # Errors
    ///
    /// Fails before setup or for a lane outside the batch.
    pub fn cursor(&self, lane: usize) -> Result<LaneCursor> {
        let lanes = self.layout()?.lanes();
        Self::check_lane(lane, lanes)?;
        Ok(self.cursors[lane])
    }

    /// Copy out one lane's complete state
    ///
    /// # Errors
    ///
    /// Fails before setup or for a lane outside the batch.
    pub fn lane_record(&self, lane: usize) -> Result<LaneRecord> {
        let layout = self.layout()?;
        Self::check_lane(lane, layout.lanes())?;
        Ok(self.load_record(layout, lane))
    }

    /// Overwrite one lane's complete state, including its frozen key schedule
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] unless a batch is ready, or
    /// [`KdfError::LaneOutOfRange`] for a lane outside it.
    pub fn store_lane_record(&mut self, lane: usize, record: &LaneRecord) -> Result<()> {
        let lanes = self.ready_lanes()?;
        Self::check_lane(lane, lanes)?;
        let layout = LaneLayout::new(lanes);
        for vector in Vector::ALL {
            layout.write(&mut self.state, vector, lane, record.vector(vector));
        }
        self.cursors[lane] = record.cursor();
        Ok(())
    }

    /// Capture every active lane
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::InvalidPhase`] unless a batch is ready.
    pub fn checkpoint(&self) -> Result<EngineCheckpoint> {
        let lanes = self.ready_lanes()?;
        let layout = LaneLayout::new(lanes);
        let records = (0..lanes).map(|lane| self.load_record(layout, lane)).collect();
        debug!(lanes, "Captured lane checkpoint");
        Ok(EngineCheckpoint {
            lane_count: lanes,
            records,
        })
    }

    /// Replace the current batch with a captured one
    ///
    /// # Errors
    ///
    /// Fails when the checkpoint is empty, exceeds this engine's capacity, or
    /// its record count disagrees with its lane count.
    pub fn restore(&mut self, checkpoint: &EngineCheckpoint) -> Result<()> {
        let lanes = checkpoint.lane_count;
        if lanes == 0 {
            return Err(KdfError::EmptyBatch);
        }
        if lanes > self.config.max_lanes {
            return Err(KdfError::LaneCapacityExceeded {
                requested: lanes,
                capacity: self.config.max_lanes,
            });
        }
        if checkpoint.records.len() != lanes {
            return Err(KdfError::invalid_parameters(format!(
                "checkpoint holds {} records for {lanes} lanes",
                checkpoint.records.len()
            )));
        }

        self.phase = BatchPhase::Ready { lanes };
        for (lane, record) in checkpoint.records.iter().enumerate() {
            self.store_lane_record(lane, record)?;
        }
        debug!(lanes, "Restored lane checkpoint");
        Ok(())
    }
}

impl Drop for LaneEngine {
    fn drop(&mut self) {
        self.hash_buf.zeroize();
        self.salt_buf.zeroize();
        self.state.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::be_bytes_to_words;

    fn engine(lanes: usize) -> LaneEngine {
        LaneEngine::new(EngineConfig::with_max_lanes(lanes)).expect("valid config")
    }

    fn reference_hmac(record: &LaneRecord, message: &[u32; 8]) -> [u32; 8] {
        let inner = hmac_leg(&record.i, message);
        hmac_leg(&record.o, &inner)
    }

    #[test]
    fn legs_alternate_from_inner() {
        assert_eq!(Leg::after(0), Leg::Inner);
        assert_eq!(Leg::after(1), Leg::Outer);
        assert_eq!(Leg::after(2), Leg::Inner);
        assert_eq!(Leg::Inner.toggle(), Leg::Outer);
        assert_eq!(Leg::Outer.toggle(), Leg::Inner);
        assert_eq!(legs_for_extra_iterations(1000), 2000);
    }

    #[test]
    fn setup_seeds_accumulator_and_message_with_u1() {
        let mut e = engine(2);
        e.set_salt(&[7u8; 12]).expect("salt length matches");
        let elem_len = e
            .load_passwords(&[b"alpha".as_slice(), b"be".as_slice()])
            .expect("passwords fit");
        e.setup(2, elem_len).expect("setup");

        for lane in 0..2 {
            let record = e.lane_record(lane).expect("lane in range");
            assert_eq!(record.r, record.w);
            assert_eq!(record.legs_done, 0);
            assert_eq!(record.next_leg(), Leg::Inner);
        }

        let schedule = HmacSha256::from_key(b"be").expect("short key");
        let record = e.lane_record(1).expect("lane 1");
        assert_eq!(record.i, schedule.inner_state());
        assert_eq!(record.o, schedule.outer_state());
        assert_eq!(&e.salt_buf()[12..], &1u32.to_be_bytes());
    }

    #[test]
    fn two_legs_fold_one_hmac_into_accumulator() {
        let mut e = engine(1);
        e.load_passwords(&[b"p"]).expect("password fits");
        e.setup(1, 1).expect("setup");
        let before = e.lane_record(0).expect("lane 0");

        e.stride(1).expect("inner leg");
        let mid = e.lane_record(0).expect("lane 0");
        assert_eq!(mid.r, before.r, "inner leg leaves the accumulator alone");
        assert_eq!(mid.next_leg(), Leg::Outer);

        e.stride(1).expect("outer leg");
        let after = e.lane_record(0).expect("lane 0");
        let u2 = reference_hmac(&before, &before.w);
        assert_eq!(after.w, u2);
        let mut expected = before.r;
        for (r, u) in expected.iter_mut().zip(u2) {
            *r ^= u;
        }
        assert_eq!(after.r, expected);
        assert_eq!(e.cursor(0).expect("lane 0").iterations(), 2);
    }

    #[test]
    fn harvest_writes_big_endian_accumulators() {
        let mut e = engine(3);
        let elem_len = e
            .load_passwords(&[b"a".as_slice(), b"b".as_slice(), b"c".as_slice()])
            .expect("passwords fit");
        e.setup(3, elem_len).expect("setup");
        e.stride(4).expect("stride");
        let records: Vec<_> = (0..3).map(|l| e.lane_record(l).expect("lane")).collect();
        e.harvest().expect("harvest");

        for (lane, record) in records.iter().enumerate() {
            let key: [u8; 32] = e.derived_key(lane).expect("key").try_into().expect("32 bytes");
            assert_eq!(be_bytes_to_words(&key), record.r);
        }
        assert_eq!(e.phase(), BatchPhase::Harvested { lanes: 3 });
    }

    #[test]
    fn phases_are_enforced() {
        let mut e = engine(2);
        assert!(matches!(e.stride(2), Err(KdfError::InvalidPhase { .. })));
        assert!(matches!(e.harvest(), Err(KdfError::InvalidPhase { .. })));

        e.setup(2, 4).expect("setup");
        assert!(matches!(e.derived_key(0), Err(KdfError::InvalidPhase { .. })));
        assert_eq!(
            e.stride_lane(2, 1),
            Err(KdfError::LaneOutOfRange { lane: 2, lanes: 2 })
        );

        e.harvest().expect("harvest");
        assert!(matches!(e.stride(2), Err(KdfError::InvalidPhase { .. })));
        assert!(matches!(e.harvest(), Err(KdfError::InvalidPhase { .. })));
    }

    #[test]
    fn oversized_batches_are_rejected() {
        let mut e = engine(2);
        assert_eq!(e.setup(0, 4), Err(KdfError::EmptyBatch));
        assert_eq!(
            e.setup(3, 4),
            Err(KdfError::LaneCapacityExceeded {
                requested: 3,
                capacity: 2
            })
        );
        assert_eq!(
            e.setup(1, 65),
            Err(KdfError::PasswordTooLong { len: 65, max: 64 })
        );
        assert_eq!(
            e.setup(2, 64),
            Err(KdfError::PasswordRegionOverflow {
                required: 128,
                capacity: 64
            })
        );
        assert_eq!(
            e.set_salt(&[0u8; 3]),
            Err(KdfError::InvalidSalt {
                expected: 12,
                actual: 3
            })
        );
        assert_eq!(e.phase(), BatchPhase::Empty);
    }

    #[test]
    fn empty_password_uses_zero_key() {
        let mut e = engine(1);
        e.load_passwords(&[b""]).expect("empty password is a valid key");
        e.setup(1, 0).expect("setup");
        let schedule = HmacSha256::from_key(b"").expect("empty key");
        assert_eq!(e.lane_record(0).expect("lane 0").i, schedule.inner_state());
    }
}
