//! Lane snapshots for suspending a batch between stride calls
//!
//! Every lane is fully consistent whenever a stride call returns, so a batch
//! can be captured, serialized, moved to another execution context and
//! restored into a fresh engine without changing the final keys.

use crate::engine::{LaneCursor, Leg};
use crate::layout::Vector;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Complete state of one lane
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct LaneRecord {
    /// XOR accumulator of the PBKDF2 block
    pub r: [u32; 8],
    /// Message for the next leg
    pub w: [u32; 8],
    /// Frozen inner key state
    pub i: [u32; 8],
    /// Frozen outer key state
    pub o: [u32; 8],
    /// Legs advanced since setup
    pub legs_done: u64,
}

impl LaneRecord {
    /// Next leg this lane will run
    #[must_use]
    pub fn next_leg(&self) -> Leg {
        self.cursor().next_leg()
    }

    /// One of the four state vectors
    #[must_use]
    pub fn vector(&self, vector: Vector) -> &[u32; 8] {
        match vector {
            Vector::R => &self.r,
            Vector::W => &self.w,
            Vector::I => &self.i,
            Vector::O => &self.o,
        }
    }

    /// Progress cursor of this lane
    #[must_use]
    pub fn cursor(&self) -> LaneCursor {
        LaneCursor {
            legs_done: self.legs_done,
        }
    }
}

/// Snapshot of every active lane in a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCheckpoint {
    /// Active lane count at capture time
    pub lane_count: usize,
    /// One record per lane, in lane order
    pub records: Vec<LaneRecord>,
}

impl Drop for EngineCheckpoint {
    fn drop(&mut self) {
        for record in &mut self.records {
            record.zeroize();
        }
    }
}
