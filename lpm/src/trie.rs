//! # Kernel LPM Trie Adapter
//!
//! Inserts and removes the prefixes of a memory mapping in a
//! `BPF_MAP_TYPE_LPM_TRIE` map through aya. Every prefix of a mapping maps to
//! the same [`MappingInfo`], so a kernel-side lookup of any address inside the
//! mapping resolves to it, and a lookup outside every mapping misses.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut trie: LpmTrie<_, [u8; 8], MappingInfo> =
//!     LpmTrie::try_from(bpf.map_mut("MAPPINGS").context("MAPPINGS map not found")?)?;
//!
//! let range = AddressRange::new(0x55ff3f68a000, 0x55ff3f740000);
//! insert_range(&mut trie, range, MappingInfo { module_id: 7, file_offset: 0x2000 })?;
//! // ... later, on munmap
//! remove_range(&mut trie, range)?;
//! ```

use std::borrow::{Borrow, BorrowMut};
use std::io;

use aya::maps::lpm_trie::{Key, LpmTrie};
use aya::maps::{MapData, MapError};
use log::info;
use lpm_common::{pack_address, MappingInfo, MAX_PREFIX_LEN};

use crate::domain::{AddressRange, TrieError};
use crate::prefix::Prefix;

/// Key type of the address trie: prefix length plus big-endian address bytes
pub type TrieKey = Key<[u8; 8]>;

impl Prefix {
    /// Pack this prefix into a kernel LPM trie key
    #[must_use]
    pub fn trie_key(&self) -> TrieKey {
        Key::new(u32::from(self.length()), pack_address(self.base()))
    }
}

/// Key that looks up a single address (full-length prefix)
#[must_use]
pub fn lookup_key(addr: u64) -> TrieKey {
    Key::new(u32::from(MAX_PREFIX_LEN), pack_address(addr))
}

/// Insert every prefix of `range` into the trie, returning the number of keys
///
/// Existing keys are overwritten, so re-inserting a changed mapping updates
/// its value in place.
///
/// # Errors
/// Returns an error if the range is reversed or a map update fails. Keys
/// inserted before a failing update are left in the map.
pub fn insert_range<T: BorrowMut<MapData>>(
    trie: &mut LpmTrie<T, [u8; 8], MappingInfo>,
    range: AddressRange,
    mapping: MappingInfo,
) -> Result<usize, TrieError> {
    let prefixes = range.prefixes()?;

    for prefix in &prefixes {
        trie.insert(&prefix.trie_key(), mapping, 0)
            .map_err(|source| TrieError::Map { key: *prefix, source })?;
    }

    info!(
        "✓ Inserted {} prefixes for mapping {range} (module {})",
        prefixes.len(),
        mapping.module_id
    );
    Ok(prefixes.len())
}

/// Remove every prefix of `range` from the trie, returning the number removed
///
/// Prefixes that are already absent are skipped, so removing a mapping twice
/// is not an error.
///
/// # Errors
/// Returns an error if the range is reversed or a map delete fails
pub fn remove_range<T: BorrowMut<MapData>>(
    trie: &mut LpmTrie<T, [u8; 8], MappingInfo>,
    range: AddressRange,
) -> Result<usize, TrieError> {
    let mut removed = 0;

    for prefix in range.prefixes()? {
        match trie.remove(&prefix.trie_key()) {
            Ok(()) => removed += 1,
            Err(e) if is_missing_key(&e) => {}
            Err(source) => return Err(TrieError::Map { key: prefix, source }),
        }
    }

    info!("✓ Removed {removed} prefixes for mapping {range}");
    Ok(removed)
}

/// Deletes of absent keys surface as `ENOENT` from the syscall
fn is_missing_key(err: &MapError) -> bool {
    match err {
        MapError::KeyNotFound => true,
        MapError::SyscallError(e) => e.io_error.kind() == io::ErrorKind::NotFound,
        _ => false,
    }
}

/// Resolve an address to the mapping whose prefix matches it most specifically
///
/// # Errors
/// Returns an error if the map lookup fails for a reason other than a miss
pub fn lookup_address<T: Borrow<MapData>>(
    trie: &LpmTrie<T, [u8; 8], MappingInfo>,
    addr: u64,
) -> Result<Option<MappingInfo>, MapError> {
    match trie.get(&lookup_key(addr), 0) {
        Ok(mapping) => Ok(Some(mapping)),
        Err(MapError::KeyNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
