//! Command-line interface: argument definitions, range input, and output

pub mod args;
pub mod input;
pub mod report;

pub use args::Args;
pub use input::read_ranges;
pub use report::RangeReport;
