//! # Shared Data Structures (eBPF ↔ Userspace)
//!
//! Defines the key packing and value layout of the address-to-mapping LPM trie.
//! Both the kernel-side eBPF program (which looks addresses up) and userspace
//! (which inserts the prefixes of every mapping) depend on this crate, so the
//! two sides agree on byte order and struct layout. All types use `#[repr(C)]`
//! for consistent memory layout across the kernel/userspace boundary.
//!
//! ## Key Layout
//!
//! A kernel LPM trie key is a `u32` prefix length followed by the data bytes.
//! The kernel compares data bytes most-significant first, so addresses must be
//! stored big-endian:
//!
//! ```text
//! ┌──────────────────┬───────────────────────────────────────┐
//! │ prefix_len: u32  │ data: [u8; 8] (address, big-endian)   │
//! └──────────────────┴───────────────────────────────────────┘
//! ```
//!
//! ## Key Types
//!
//! - [`MappingInfo`] - Value stored for every prefix of a mapping
//! - [`pack_address`] - Address → key data bytes

#![no_std]

/// Width of an address in bits, and the largest valid prefix length.
pub const ADDRESS_BITS: u32 = 64;

/// Prefix length of a key matching exactly one address
pub const MAX_PREFIX_LEN: u8 = 64;

/// Pack an address into LPM trie key data bytes
///
/// The kernel trie matches the leading `prefix_len` bits of the data in
/// memory order, so the most significant byte must come first. The eBPF side
/// must pack lookup keys with this same function.
#[must_use]
pub const fn pack_address(addr: u64) -> [u8; 8] {
    addr.to_be_bytes()
}

/// Inverse of [`pack_address`]
#[must_use]
pub const fn unpack_address(data: [u8; 8]) -> u64 {
    u64::from_be_bytes(data)
}

/// Value stored in the trie for every prefix of one memory mapping
///
/// Every prefix produced for a mapping carries the same `MappingInfo`, so a
/// lookup of any address inside the mapping resolves to it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappingInfo {
    /// Caller-chosen identifier of the mapped module (e.g. a file ID)
    pub module_id: u64,

    /// File offset that corresponds to the mapping's start address
    ///
    /// File-relative address = `addr - mapping_start + file_offset`.
    pub file_offset: u64,
}

#[cfg(feature = "user")]
use aya::Pod;

// Required so the value can be copied into and out of the kernel map as bytes
#[cfg(feature = "user")]
#[allow(unsafe_code)]
unsafe impl Pod for MappingInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_address_is_big_endian() {
        assert_eq!(
            pack_address(0x0102_0304_0506_0708),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
        assert_eq!(unpack_address(pack_address(0x55ff_3f68_a000)), 0x55ff_3f68_a000);
    }

    #[test]
    fn test_mapping_info_layout() {
        assert_eq!(core::mem::size_of::<MappingInfo>(), 16);
        assert_eq!(core::mem::align_of::<MappingInfo>(), 8);
    }
}
