//! HMAC-SHA-256 over a block-sized key

use crate::error::{KdfError, Result};
use crate::layout::words_to_be_bytes;
use crate::sha256::{Sha256, BLOCK_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Two-pass HMAC-SHA-256 context
///
/// The inner and outer contexts have each absorbed exactly one padded key
/// block after construction; their states are the frozen key schedule the
/// stride engine caches per lane.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSha256 {
    inner: Sha256,
    outer: Sha256,
}

impl std::fmt::Debug for HmacSha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha256").finish_non_exhaustive()
    }
}

impl HmacSha256 {
    /// Build the inner/outer contexts from a key already zero-padded to one block
    #[must_use]
    pub fn new(key: &[u8; BLOCK_LEN]) -> Self {
        let mut pad = Zeroizing::new([0u8; BLOCK_LEN]);

        for (p, k) in pad.iter_mut().zip(key) {
            *p = k ^ IPAD;
        }
        let mut inner = Sha256::new();
        inner.update(&pad[..]);

        for (p, k) in pad.iter_mut().zip(key) {
            *p = k ^ OPAD;
        }
        let mut outer = Sha256::new();
        outer.update(&pad[..]);

        Self { inner, outer }
    }

    /// Zero-pad `key` to one block and build the contexts
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::PasswordTooLong`] for keys longer than one block.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        if key.len() > BLOCK_LEN {
            return Err(KdfError::PasswordTooLong {
                len: key.len(),
                max: BLOCK_LEN,
            });
        }
        let mut padded = Zeroizing::new([0u8; BLOCK_LEN]);
        padded[..key.len()].copy_from_slice(key);
        Ok(Self::new(&padded))
    }

    /// Inner state right after absorbing `key ^ ipad`
    #[must_use]
    pub fn inner_state(&self) -> [u32; 8] {
        self.inner.state()
    }

    /// Outer state right after absorbing `key ^ opad`
    #[must_use]
    pub fn outer_state(&self) -> [u32; 8] {
        self.outer.state()
    }

    /// Absorb message bytes into the inner pass
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish both passes and return the MAC as digest words
    #[must_use]
    pub fn finalize(mut self) -> [u32; 8] {
        let inner = Zeroizing::new(words_to_be_bytes(&self.inner.finish()));
        self.outer.update(&inner[..]);
        self.outer.finish()
    }
}
