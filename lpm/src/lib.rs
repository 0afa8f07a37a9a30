//! # lpm - Address Range to LPM Trie Prefix Decomposition
//!
//! A longest prefix match (LPM) trie maps an address, such as a sampled
//! instruction pointer, to the most specific stored prefix. To make every
//! address of a memory mapping resolve to that mapping (and nothing outside
//! it), the mapping's range has to be split into power-of-two aligned blocks.
//! This crate computes that split and feeds it to a kernel LPM trie.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  Mapping range [start, end)  │   e.g. 55ff3f68a000-55ff3f740000 r-xp ...
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │ prefix: greedy decomposition │   min(alignment, span cap) per step
//! └──────────────┬───────────────┘
//!                │ Vec<Prefix>
//!                ▼
//! ┌──────────────────────────────┐
//! │   trie: aya LpmTrie adapter  │   (base, length) → MappingInfo
//! └──────────────┬───────────────┘
//!                │ bpf_map_update_elem
//!                ▼
//! ┌──────────────────────────────┐
//! │  BPF_MAP_TYPE_LPM_TRIE       │   looked up by the eBPF program
//! └──────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`prefix`]: [`Prefix`] and the decomposition engine
//!   ([`calculate_prefix_list`], [`PrefixIter`])
//! - [`trie`]: inserting, removing and looking up mappings in a kernel trie
//! - [`domain`]: [`AddressRange`] and structured errors
//! - [`cli`]: argument parsing, range input and output for the `lpm` binary
//!
//! ## Example
//!
//! ```
//! use lpm::calculate_prefix_list;
//!
//! let prefixes = calculate_prefix_list(4096, 16384).unwrap();
//! let keys: Vec<String> = prefixes.iter().map(ToString::to_string).collect();
//! assert_eq!(keys, ["0x1000/52", "0x2000/51"]);
//! ```

pub mod cli;
pub mod domain;
pub mod prefix;
pub mod trie;

pub use domain::{AddressRange, PrefixError, TrieError};
pub use prefix::{calculate_prefix_list, largest_power_of_two, rightmost_set_bit, Prefix, PrefixIter};
pub use trie::{insert_range, lookup_address, remove_range, TrieKey};
