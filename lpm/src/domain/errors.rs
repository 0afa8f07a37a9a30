//! Structured error types for lpm
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

use crate::prefix::Prefix;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// A reversed interval is a caller bug, not an empty range
    #[error("Invalid range: start 0x{start:x} is greater than end 0x{end:x}")]
    InvalidRange { start: u64, end: u64 },

    #[error("Failed to parse address range {input:?}: {reason}")]
    ParseRange { input: String, reason: String },
}

#[derive(Error, Debug)]
pub enum TrieError {
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    #[error("Failed to update LPM trie key {key}: {source}")]
    Map { key: Prefix, source: aya::maps::MapError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let err = PrefixError::InvalidRange { start: 4096, end: 0 };
        assert_eq!(err.to_string(), "Invalid range: start 0x1000 is greater than end 0x0");
    }

    #[test]
    fn test_parse_range_display() {
        let err = PrefixError::ParseRange {
            input: "zz-10".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(err.to_string().contains("\"zz-10\""));
        assert!(err.to_string().contains("invalid digit"));
    }

    #[test]
    fn test_trie_error_wraps_prefix_error() {
        let err: TrieError = PrefixError::InvalidRange { start: 2, end: 1 }.into();
        assert_eq!(err.to_string(), "Invalid range: start 0x2 is greater than end 0x1");
    }
}
