//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::AddressRange;

#[derive(Parser)]
#[command(
    name = "lpm",
    about = "Decompose address ranges into longest-prefix-match trie keys",
    after_help = "\
EXAMPLES:
    lpm 55ff3f68a000-55ff3f740000            Prefixes of one range
    lpm 0x1000-0x4000 0x7000-0x9000 --json   Several ranges as JSON
    lpm --input /proc/1234/maps              Every mapping of a process
    grep r-xp /proc/1234/maps | lpm -i -     Executable mappings from stdin"
)]
pub struct Args {
    /// Address ranges as START-END in hex, end exclusive
    #[arg(value_name = "RANGE")]
    pub ranges: Vec<AddressRange>,

    /// Read ranges from a file in /proc/<pid>/maps format ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the prefixes, without a header per range
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,
}
