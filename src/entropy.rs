//! Buffered access to the operating system CSPRNG.
//!
//! [`SecureRng`] pulls entropy in blocks of [`BUFFER_SIZE`] bytes so that a
//! single password costs one system call instead of one per character.

use thiserror::Error;
use zeroize::Zeroizing;

pub const BUFFER_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("secure random source unavailable: {0}")]
    Unavailable(getrandom::Error),
}

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fills `dest` entirely or fails without partial success being observable.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// The platform CSPRNG (`getrandom` syscall, `getentropy`, `BCryptGenRandom`, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(dest).map_err(EntropyError::Unavailable)
    }
}

pub struct SecureRng<S = OsEntropy> {
    source: S,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl SecureRng<OsEntropy> {
    pub fn new() -> Self {
        Self::with_source(OsEntropy)
    }
}

impl Default for SecureRng<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EntropySource> SecureRng<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            buffer: Zeroizing::new(vec![0u8; BUFFER_SIZE]),
            // Start exhausted so the first draw triggers a read.
            pos: BUFFER_SIZE,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn refill(&mut self) -> Result<(), EntropyError> {
        if let Err(err) = self.source.fill_bytes(&mut self.buffer) {
            log::warn!("entropy read failed: {err}");
            self.pos = self.buffer.len();
            return Err(err);
        }
        log::trace!("refilled entropy buffer ({} bytes)", self.buffer.len());
        self.pos = 0;
        Ok(())
    }

    pub fn next_u64(&mut self) -> Result<u64, EntropyError> {
        if self.pos + 8 > self.buffer.len() {
            self.refill()?;
        }

        let mut bytes = Zeroizing::new([0u8; 8]);
        bytes.copy_from_slice(&self.buffer[self.pos..self.pos + 8]);
        self.buffer[self.pos..self.pos + 8].fill(0);
        self.pos += 8;

        Ok(u64::from_le_bytes(*bytes))
    }

    /// Returns a uniform integer in `[0, n)`.
    ///
    /// Values below `2^64 mod n` are rejected so every residue is hit by the
    /// same number of 64-bit inputs.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn below(&mut self, n: usize) -> Result<usize, EntropyError> {
        assert!(n > 0, "sampling range must be non-empty");

        let n = n as u64;
        let threshold = n.wrapping_neg() % n;

        loop {
            let r = self.next_u64()?;
            if r >= threshold {
                return Ok((r % n) as usize);
            }
        }
    }

    /// Fisher-Yates shuffle; every permutation of `items` is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), EntropyError> {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1)?;
            items.swap(i, j);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockBehaviour {
        None,
        FailAlways,
        /// 1-indexed: `FailAtNthFill(1)` fails the very first read.
        FailAtNthFill(usize),
    }

    /// Wraps [`OsEntropy`] and counts or sabotages reads.
    pub struct MockEntropy {
        behaviour: MockBehaviour,
        fills: Cell<usize>,
    }

    impl MockEntropy {
        pub fn new(behaviour: MockBehaviour) -> Self {
            Self {
                behaviour,
                fills: Cell::new(0),
            }
        }

        pub fn fill_count(&self) -> usize {
            self.fills.get()
        }
    }

    impl EntropySource for MockEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
            let current = self.fills.get() + 1;
            self.fills.set(current);

            let fail = match self.behaviour {
                MockBehaviour::None => false,
                MockBehaviour::FailAlways => true,
                MockBehaviour::FailAtNthFill(n) => n == current,
            };

            if fail {
                Err(EntropyError::Unavailable(getrandom::Error::UNSUPPORTED))
            } else {
                OsEntropy.fill_bytes(dest)
            }
        }
    }

    /// Replays a fixed byte pattern, repeated to fill each request.
    pub struct FixedEntropy(pub Vec<u8>);

    impl EntropySource for FixedEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
            for (dst, src) in dest.iter_mut().zip(self.0.iter().cycle()) {
                *dst = *src;
            }
            Ok(())
        }
    }
}
