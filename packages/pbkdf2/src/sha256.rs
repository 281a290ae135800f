//! SHA-256 core
//!
//! Word-level compression transform plus a streaming context. The stride
//! engine drives [`compress`] directly with pre-padded single-block messages;
//! the context is used for HMAC key schedules and the eager first block.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bytes per compression block
pub const BLOCK_LEN: usize = 64;

/// Bytes in a SHA-256 digest
pub const DIGEST_LEN: usize = 32;

/// Initial hash value
pub const H0: [u32; 8] = [
    0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a, 0x510e_527f, 0x9b05_688c, 0x1f83_d9ab,
    0x5be0_cd19,
];

/// Round constants
pub const K: [u32; 64] = [
    0x428a_2f98, 0x7137_4491, 0xb5c0_fbcf, 0xe9b5_dba5, 0x3956_c25b, 0x59f1_11f1, 0x923f_82a4,
    0xab1c_5ed5, 0xd807_aa98, 0x1283_5b01, 0x2431_85be, 0x550c_7dc3, 0x72be_5d74, 0x80de_b1fe,
    0x9bdc_06a7, 0xc19b_f174, 0xe49b_69c1, 0xefbe_4786, 0x0fc1_9dc6, 0x240c_a1cc, 0x2de9_2c6f,
    0x4a74_84aa, 0x5cb0_a9dc, 0x76f9_88da, 0x983e_5152, 0xa831_c66d, 0xb003_27c8, 0xbf59_7fc7,
    0xc6e0_0bf3, 0xd5a7_9147, 0x06ca_6351, 0x1429_2967, 0x27b7_0a85, 0x2e1b_2138, 0x4d2c_6dfc,
    0x5338_0d13, 0x650a_7354, 0x766a_0abb, 0x81c2_c92e, 0x9272_2c85, 0xa2bf_e8a1, 0xa81a_664b,
    0xc24b_8b70, 0xc76c_51a3, 0xd192_e819, 0xd699_0624, 0xf40e_3585, 0x106a_a070, 0x19a4_c116,
    0x1e37_6c08, 0x2748_774c, 0x34b0_bcb5, 0x391c_0cb3, 0x4ed8_aa4a, 0x5b9c_ca4f, 0x682e_6ff3,
    0x748f_82ee, 0x78a5_636f, 0x84c8_7814, 0x8cc7_0208, 0x90be_fffa, 0xa450_6ceb, 0xbef9_a3f7,
    0xc671_78f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & (y ^ z)) ^ z
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & (y | z)) | (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Run one compression over a block given as sixteen big-endian-decoded words.
///
/// All arithmetic wraps mod 2^32.
pub fn compress(state: &mut [u32; 8], block: &[u32; 16]) {
    let mut w = [0u32; 64];
    w[..16].copy_from_slice(block);
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    // Register roles rotate by one position each round: s[0] is `a`, s[7] is `h`.
    let mut s = *state;
    for i in 0..64 {
        let t0 = s[7]
            .wrapping_add(big_sigma1(s[4]))
            .wrapping_add(ch(s[4], s[5], s[6]))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t1 = big_sigma0(s[0]).wrapping_add(maj(s[0], s[1], s[2]));
        s[3] = s[3].wrapping_add(t0);
        s[7] = t0.wrapping_add(t1);
        s.rotate_right(1);
    }

    for (h, v) in state.iter_mut().zip(s) {
        *h = h.wrapping_add(v);
    }
}

/// Run one compression over a 64-byte block.
pub fn compress_block(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    compress(state, &words);
}

/// Streaming SHA-256 context
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_LEN],
    bit_count: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256")
            .field("bit_count", &self.bit_count)
            .finish_non_exhaustive()
    }
}

impl Sha256 {
    /// Create a context holding the standard initial hash value
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: H0,
            buffer: [0u8; BLOCK_LEN],
            bit_count: 0,
        }
    }

    /// One-shot digest of `data`
    #[must_use]
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut ctx = Self::new();
        ctx.update(data);
        crate::layout::words_to_be_bytes(&ctx.finalize())
    }

    /// Running state words
    #[must_use]
    pub fn state(&self) -> [u32; 8] {
        self.state
    }

    /// Total bytes absorbed so far
    #[must_use]
    pub fn bytes_absorbed(&self) -> u64 {
        self.bit_count >> 3
    }

    /// Absorb an arbitrary-length byte sequence
    pub fn update(&mut self, data: &[u8]) {
        let used = ((self.bit_count >> 3) as usize) & (BLOCK_LEN - 1);
        self.bit_count = self.bit_count.wrapping_add((data.len() as u64) << 3);

        let free = BLOCK_LEN - used;
        if data.len() < free {
            self.buffer[used..used + data.len()].copy_from_slice(data);
            return;
        }

        let (head, mut rest) = data.split_at(free);
        self.buffer[used..].copy_from_slice(head);
        compress_block(&mut self.state, &self.buffer);

        while rest.len() >= BLOCK_LEN {
            let (block, tail) = rest.split_at(BLOCK_LEN);
            let mut full = [0u8; BLOCK_LEN];
            full.copy_from_slice(block);
            compress_block(&mut self.state, &full);
            rest = tail;
        }

        self.buffer[..rest.len()].copy_from_slice(rest);
    }

    /// Pad, process the final block(s) and return the digest words
    #[must_use]
    pub fn finalize(mut self) -> [u32; 8] {
        self.finish()
    }

    pub(crate) fn finish(&mut self) -> [u32; 8] {
        let length = self.bit_count.to_be_bytes();
        let used = ((self.bit_count >> 3) as usize) & (BLOCK_LEN - 1);
        let pad_len = if used < 56 { 56 - used } else { 120 - used };

        let mut padding = [0u8; BLOCK_LEN];
        padding[0] = 0x80;
        self.update(&padding[..pad_len]);
        self.update(&length);
        self.state
    }
}
