//! Reading address ranges from `/proc/<pid>/maps`-style text

use anyhow::{Context, Result};
use std::io::BufRead;

use crate::domain::AddressRange;

/// Read one range per line, taking the first field of each line
///
/// Blank lines and lines starting with `#` are skipped, so saved maps files
/// can carry comments.
///
/// # Errors
/// Returns an error if reading fails or a line does not start with `START-END`
pub fn read_ranges<R: BufRead>(reader: R) -> Result<Vec<AddressRange>> {
    let mut ranges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let range = AddressRange::from_maps_line(trimmed)
            .with_context(|| format!("Invalid range on line {}", idx + 1))?;
        ranges.push(range);
    }

    log::debug!("Read {} ranges from input", ranges.len());
    Ok(ranges)
}
