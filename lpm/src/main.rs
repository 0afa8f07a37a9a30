//! # lpm - Main Entry Point
//!
//! Decomposes address ranges given on the command line or read from a
//! `/proc/<pid>/maps`-style file into LPM trie prefixes, printed as text or
//! JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use lpm::cli::{read_ranges, Args, RangeReport};
use lpm::domain::AddressRange;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.to_string().to_lowercase().contains("missing required argument") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// Gather ranges from positional arguments first, then from `--input`
fn collect_ranges(args: &Args) -> Result<Vec<AddressRange>> {
    let mut ranges = args.ranges.clone();

    if let Some(ref path) = args.input {
        let from_input = if path.as_os_str() == "-" {
            read_ranges(io::stdin().lock())?
        } else {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            read_ranges(BufReader::new(file))
                .with_context(|| format!("Failed to read ranges from {}", path.display()))?
        };
        ranges.extend(from_input);
    }

    Ok(ranges)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let ranges = collect_ranges(&args)?;
    if ranges.is_empty() && args.input.is_none() {
        anyhow::bail!(
            "Missing required argument: RANGE or --input\n\n\
             Usage:\n  \
             lpm 55ff3f68a000-55ff3f740000\n  \
             lpm --input /proc/<pid>/maps\n\n\
             Run 'lpm --help' for more options"
        );
    }

    let reports = ranges
        .into_iter()
        .map(|range| RangeReport::new(range).with_context(|| format!("Cannot decompose {range}")))
        .collect::<Result<Vec<_>>>()?;

    let mut out = BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut out, &reports).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for report in &reports {
            report.write_text(&mut out, args.quiet)?;
        }
    }
    out.flush()?;

    Ok(())
}
