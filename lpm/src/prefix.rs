//! # Range-to-Prefix Decomposition
//!
//! Converts a half-open address interval `[start, end)` into the minimal,
//! ordered list of power-of-two aligned blocks whose union is exactly the
//! interval. Each block is a [`Prefix`]: a base address plus the number of
//! significant high-order bits, which is the key format of a longest prefix
//! match (LPM) trie.
//!
//! ## Algorithm
//!
//! Greedy, left to right. At every step the next block is the largest one that
//! both starts on a boundary of its own size and does not pass `end`:
//!
//! ```text
//! alignment = rightmost_set_bit(cur)            (unbounded when cur == 0)
//! span_cap  = largest_power_of_two(end - cur)
//! block     = min(alignment, span_cap)
//! emit { base: cur, length: 64 - log2(block) }
//! cur      += block
//! ```
//!
//! ## Example
//!
//! ```text
//! [10, 22) → 0xa/63  (10..12)
//!            0xc/62  (12..16)
//!            0x10/62 (16..20)
//!            0x14/63 (20..22)
//! ```
//!
//! Block sizes first grow (bounded by alignment) and then shrink (bounded by
//! the remaining span), so a call emits at most 2 × 64 prefixes and in
//! practice far fewer.

use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};
use lpm_common::{ADDRESS_BITS, MAX_PREFIX_LEN};
use serde::Serialize;

use crate::domain::PrefixError;

/// One power-of-two aligned block of the address space
///
/// Only the top `length` bits of `base` are significant; all lower bits are
/// zero. The block spans `2^(64 - length)` addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Prefix {
    base: u64,
    length: u8,
}

impl Prefix {
    /// Create a prefix, or `None` if `length > 64` or `base` has bits set
    /// below the prefix
    #[must_use]
    pub fn new(base: u64, length: u8) -> Option<Self> {
        if length > MAX_PREFIX_LEN || base & host_mask(length) != 0 {
            return None;
        }
        Some(Self { base, length })
    }

    /// First address of the block
    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Number of significant high-order bits
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Number of addresses in the block (`2^64` for a /0 prefix)
    #[must_use]
    pub fn size(&self) -> u128 {
        1u128 << (ADDRESS_BITS - u32::from(self.length))
    }

    /// Last address of the block (inclusive)
    #[must_use]
    pub fn last(&self) -> u64 {
        self.base | host_mask(self.length)
    }

    /// Check if an address falls within this block
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr & !host_mask(self.length) == self.base
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}/{}", self.base, self.length)
    }
}

/// Mask of the bits below a prefix of `length` bits
fn host_mask(length: u8) -> u64 {
    u64::MAX.checked_shr(u32::from(length)).unwrap_or(0)
}

/// Lowest set bit of `v`, as a power of two
///
/// This is the largest power of two dividing `v`, e.g. `0b1010_0000` →
/// `0b10_0000`. Zero has no set bit and yields 0; the decomposition treats an
/// address of 0 as aligned to the whole 64-bit space.
#[must_use]
pub const fn rightmost_set_bit(v: u64) -> u64 {
    v & v.wrapping_neg()
}

/// Greatest power of two not exceeding `n` (0 for `n == 0`)
#[must_use]
pub const fn largest_power_of_two(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    1 << n.ilog2()
}

/// Lazily yields the prefixes of `[start, end)` in ascending address order
///
/// Produces the same sequence as [`calculate_prefix_list`] without
/// allocating.
#[derive(Debug, Clone)]
pub struct PrefixIter {
    cur: u64,
    end: u64,
}

impl PrefixIter {
    /// # Errors
    /// Returns [`PrefixError::InvalidRange`] if `start > end`
    pub fn new(start: u64, end: u64) -> Result<Self, PrefixError> {
        if start > end {
            return Err(PrefixError::InvalidRange { start, end });
        }
        Ok(Self { cur: start, end })
    }
}

impl Iterator for PrefixIter {
    type Item = Prefix;

    #[allow(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Prefix> {
        if self.cur >= self.end {
            return None;
        }

        let span_cap = largest_power_of_two(self.end - self.cur);
        let block = match rightmost_set_bit(self.cur) {
            0 => span_cap,
            alignment => alignment.min(span_cap),
        };

        let prefix = Prefix {
            base: self.cur,
            length: (ADDRESS_BITS - block.trailing_zeros()) as u8, // ≤ 64
        };
        trace!("Emitting prefix {prefix}");

        // cur + block <= end, so this never wraps
        self.cur += block;
        Some(prefix)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cur >= self.end {
            (0, Some(0))
        } else {
            (1, Some(2 * ADDRESS_BITS as usize))
        }
    }
}

impl FusedIterator for PrefixIter {}

/// Decompose `[start, end)` into the minimal ordered list of LPM prefixes
///
/// The returned prefixes are strictly ascending, exactly adjacent, each
/// aligned to its own size, and together cover the interval with nothing
/// outside it. An empty interval (`start == end`) yields an empty list.
///
/// # Errors
/// Returns [`PrefixError::InvalidRange`] if `start > end`
pub fn calculate_prefix_list(start: u64, end: u64) -> Result<Vec<Prefix>, PrefixError> {
    let prefixes: Vec<Prefix> = PrefixIter::new(start, end)?.collect();
    debug!(
        "Range 0x{start:x}-0x{end:x} decomposed into {} prefixes",
        prefixes.len()
    );
    Ok(prefixes)
}
