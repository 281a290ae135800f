//! Derived key batch with encoding support

use crate::layout::HASH_LEN;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Keys harvested from a batch, packed in lane order
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    bytes: Vec<u8>,
}

impl DerivedKeys {
    /// Wrap packed 32-byte keys
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / HASH_LEN
    }

    /// Check if the batch is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Key of one lane
    #[must_use]
    pub fn get(&self, lane: usize) -> Option<&[u8]> {
        self.bytes.chunks_exact(HASH_LEN).nth(lane)
    }

    /// Keys in lane order
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks_exact(HASH_LEN)
    }

    /// All keys, packed
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key of one lane as a hexadecimal string
    #[must_use]
    pub fn to_hex(&self, lane: usize) -> Option<String> {
        self.get(lane).map(hex::encode)
    }

    /// Key of one lane as a base64 string
    #[must_use]
    pub fn to_base64(&self, lane: usize) -> Option<String> {
        use base64::{engine::general_purpose, Engine as _};
        self.get(lane).map(|key| general_purpose::STANDARD.encode(key))
    }

    /// Constant-time comparison of one lane's key against `expected`
    #[must_use]
    pub fn verify(&self, lane: usize, expected: &[u8]) -> bool {
        self.get(lane)
            .is_some_and(|key| bool::from(key.ct_eq(expected)))
    }
}

impl std::fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeys")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for DerivedKeys {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
