//! Domain model for lpm
//!
//! This module contains core domain types and errors:
//! - [`AddressRange`]: a half-open interval of addresses, parsed from
//!   `/proc/<pid>/maps` notation
//! - Structured error handling for decomposition, parsing and trie updates

pub mod errors;
pub mod types;

pub use errors::{PrefixError, TrieError};
pub use types::AddressRange;
