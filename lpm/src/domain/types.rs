//! Address range value type
//!
//! Ranges are written the way `/proc/<pid>/maps` prints them: two hexadecimal
//! addresses joined by `-`, end exclusive. For example:
//!
//! ```text
//! 55ff3f68a000-55ff3f740000 r-xp 00002000 fd:01 1234   /usr/bin/app
//! └───────────┬───────────┘
//!       AddressRange
//! ```

use std::fmt;
use std::str::FromStr;

use super::errors::PrefixError;
use crate::prefix::{calculate_prefix_list, Prefix};

/// Half-open interval of addresses `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: u64,
    pub end: u64,
}

impl AddressRange {
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Check if an address falls within this range
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Number of addresses covered (0 for empty or reversed ranges)
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Decompose this range into LPM trie prefixes
    ///
    /// # Errors
    /// Returns [`PrefixError::InvalidRange`] if the range is reversed
    pub fn prefixes(&self) -> Result<Vec<Prefix>, PrefixError> {
        calculate_prefix_list(self.start, self.end)
    }

    /// Parse the address column of a `/proc/<pid>/maps` line
    ///
    /// Everything after the first whitespace-separated field (permissions,
    /// offset, device, inode, pathname) is ignored.
    ///
    /// # Errors
    /// Returns [`PrefixError::ParseRange`] if the line is empty or its first
    /// field is not `START-END`
    pub fn from_maps_line(line: &str) -> Result<Self, PrefixError> {
        let field = line.split_whitespace().next().ok_or_else(|| PrefixError::ParseRange {
            input: line.to_string(),
            reason: "empty line".to_string(),
        })?;
        field.parse()
    }
}

impl FromStr for AddressRange {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| PrefixError::ParseRange { input: s.to_string(), reason };

        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| parse_error("expected START-END".to_string()))?;
        let start = parse_hex_address(start).map_err(|e| parse_error(format!("start: {e}")))?;
        let end = parse_hex_address(end).map_err(|e| parse_error(format!("end: {e}")))?;

        Ok(Self { start, end })
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}-0x{:x}", self.start, self.end)
    }
}

/// Parse a hexadecimal address with optional `0x` prefix
fn parse_hex_address(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return Err("missing address".to_string());
    }
    // from_str_radix would also accept a leading '+'
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("{digits:?} is not a hexadecimal address"));
    }
    u64::from_str_radix(digits, 16).map_err(|e| e.to_string())
}
