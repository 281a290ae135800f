//! Flat buffer layout shared with the host
//!
//! The lane state buffer is plane-major: eight planes of four-word records,
//! ordered `Ra, Rb, Wa, Wb, Ia, Ib, Oa, Ob`. With `n` active lanes, plane `k`
//! starts at word `k * n * 4` and lane `p` occupies words
//! `(k * n + p) * 4 .. + 4` of it. Each 8-word vector is split across an
//! `a` plane (words 0..4) and a `b` plane (words 4..8). Words are native
//! order; the salt and hash buffers are byte buffers with big-endian words.

/// Bytes in one derived key
pub const HASH_LEN: usize = 32;

/// Longest password that fits in one HMAC key block
pub const MAX_PASSWORD_LEN: usize = crate::sha256::BLOCK_LEN;

/// Default common salt prefix length in bytes
pub const DEFAULT_SALT_LEN: usize = 12;

/// Bytes of the per-lane big-endian suffix written after the salt prefix
pub const COUNTER_LEN: usize = 4;

/// Default lane capacity
pub const DEFAULT_MAX_LANES: usize = 65536;

/// Words in one plane record
pub const PLANE_WORDS: usize = 4;

/// Planes in the lane state buffer
pub const PLANES: usize = 8;

/// Words of lane state per lane across all planes
pub const RECORD_WORDS: usize = PLANE_WORDS * PLANES;

/// One of the four per-lane state vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vector {
    /// Running XOR accumulator `U1 ^ U2 ^ ...`
    R,
    /// Message fed to the next leg
    W,
    /// Frozen inner key state
    I,
    /// Frozen outer key state
    O,
}

impl Vector {
    /// All vectors in buffer order
    pub const ALL: [Self; 4] = [Self::R, Self::W, Self::I, Self::O];

    /// Index of this vector's low-half plane; the high half is the next plane
    #[must_use]
    pub const fn plane(self) -> usize {
        match self {
            Self::R => 0,
            Self::W => 2,
            Self::I => 4,
            Self::O => 6,
        }
    }
}

/// Offsets into the lane state buffer for a given active lane count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    lanes: usize,
}

impl LaneLayout {
    /// Layout for `lanes` active lanes
    #[must_use]
    pub const fn new(lanes: usize) -> Self {
        Self { lanes }
    }

    /// Active lane count the planes are strided by
    #[must_use]
    pub const fn lanes(&self) -> usize {
        self.lanes
    }

    /// Words used by this layout
    #[must_use]
    pub const fn words(&self) -> usize {
        self.lanes * RECORD_WORDS
    }

    /// First word of `lane`'s record in `plane`
    #[must_use]
    pub const fn word_offset(&self, plane: usize, lane: usize) -> usize {
        (plane * self.lanes + lane) * PLANE_WORDS
    }

    /// Read one 8-word vector for a lane
    #[must_use]
    pub fn read(&self, words: &[u32], vector: Vector, lane: usize) -> [u32; 8] {
        let lo = self.word_offset(vector.plane(), lane);
        let hi = self.word_offset(vector.plane() + 1, lane);
        let mut out = [0u32; 8];
        out[..PLANE_WORDS].copy_from_slice(&words[lo..lo + PLANE_WORDS]);
        out[PLANE_WORDS..].copy_from_slice(&words[hi..hi + PLANE_WORDS]);
        out
    }

    /// Write one 8-word vector for a lane
    pub fn write(&self, words: &mut [u32], vector: Vector, lane: usize, value: &[u32; 8]) {
        let lo = self.word_offset(vector.plane(), lane);
        let hi = self.word_offset(vector.plane() + 1, lane);
        words[lo..lo + PLANE_WORDS].copy_from_slice(&value[..PLANE_WORDS]);
        words[hi..hi + PLANE_WORDS].copy_from_slice(&value[PLANE_WORDS..]);
    }
}

/// Serialize digest words as big-endian bytes
#[must_use]
pub fn words_to_be_bytes(words: &[u32; 8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Parse 32 big-endian bytes into digest words
#[must_use]
pub fn be_bytes_to_words(bytes: &[u8; HASH_LEN]) -> [u32; 8] {
    let mut out = [0u32; 8];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_are_strided_by_active_lanes() {
        let layout = LaneLayout::new(3);
        assert_eq!(layout.word_offset(0, 0), 0);
        assert_eq!(layout.word_offset(0, 2), 8);
        assert_eq!(layout.word_offset(1, 0), 12);
        assert_eq!(layout.word_offset(7, 2), (7 * 3 + 2) * 4);
        assert_eq!(layout.words(), 96);
    }

    #[test]
    fn vectors_split_across_adjacent_planes() {
        let layout = LaneLayout::new(2);
        let mut words = vec![0u32; layout.words()];
        let value = [1, 2, 3, 4, 5, 6, 7, 8];
        layout.write(&mut words, Vector::W, 1, &value);

        // Wa plane is plane 2, Wb plane is plane 3
        assert_eq!(&words[20..24], &[1, 2, 3, 4]);
        assert_eq!(&words[28..32], &[5, 6, 7, 8]);
        assert_eq!(layout.read(&words, Vector::W, 1), value);
        assert_eq!(layout.read(&words, Vector::W, 0), [0; 8]);
    }

    #[test]
    fn big_endian_boundary() {
        let words = [0x1122_3344, 0, 0, 0, 0, 0, 0, 0xaabb_ccdd];
        let bytes = words_to_be_bytes(&words);
        assert_eq!(&bytes[..4], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&bytes[28..], &[0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(be_bytes_to_words(&bytes), words);
    }
}
