//! 64-bit FNV-1a, the default hasher for `Table`.

use core::hash::{BuildHasher, Hasher};

const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const PRIME: u64 = 0x100000001b3;

/// FNV-1a accumulator. Deterministic across runs and platforms.
#[derive(Copy, Clone, Debug)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    pub const fn new() -> Self {
        Self { hash: OFFSET_BASIS }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash ^= b as u64;
            self.hash = self.hash.wrapping_mul(PRIME);
        }
    }
}

/// Builds a fresh `FnvHasher` per key.
#[derive(Copy, Clone, Debug, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FnvHasher::new()
    }
}
