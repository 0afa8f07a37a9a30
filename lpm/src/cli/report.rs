//! Per-range output, as text or JSON

use serde::Serialize;
use std::io::{self, Write};

use crate::domain::{AddressRange, PrefixError};
use crate::prefix::Prefix;

/// A range together with its prefix decomposition
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub start: u64,
    pub end: u64,
    pub prefixes: Vec<Prefix>,
}

impl RangeReport {
    /// # Errors
    /// Returns [`PrefixError::InvalidRange`] if the range is reversed
    pub fn new(range: AddressRange) -> Result<Self, PrefixError> {
        Ok(Self {
            start: range.start,
            end: range.end,
            prefixes: range.prefixes()?,
        })
    }

    /// Write a header line (unless `quiet`) followed by one indented line per
    /// prefix
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn write_text<W: Write>(&self, out: &mut W, quiet: bool) -> io::Result<()> {
        if !quiet {
            let noun = if self.prefixes.len() == 1 { "prefix" } else { "prefixes" };
            writeln!(
                out,
                "{} ({} {noun})",
                AddressRange::new(self.start, self.end),
                self.prefixes.len()
            )?;
        }
        for prefix in &self.prefixes {
            writeln!(out, "  {prefix}")?;
        }
        Ok(())
    }
}
