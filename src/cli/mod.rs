//! Command-line interface for pangenome-table.
//!
//! Available commands:
//!
//! - **tabulate**: Resolve every genome in a directory into one feature table
//! - **resolve**: Resolve a single genome and print its feature counts
//!
//! ## Usage
//!
//! ```text
//! # Tabulate all genomes with 10 workers, saving the product vocabulary
//! JOBS=10 pangenome-table tabulate annotations/ --vocabulary products.txt > table.tsv
//!
//! # JSON output for scripting
//! pangenome-table --format json tabulate annotations/
//!
//! # Inspect one genome
//! pangenome-table resolve annotations/ GCF_000005845.2
//! ```

use clap::{Parser, Subcommand};

use crate::core::types::CutOff;

pub mod resolve;
pub mod tabulate;

#[derive(Parser)]
#[command(name = "pangenome-table")]
#[command(version)]
#[command(about = "Build a pangenome feature table from per-genome annotations")]
#[command(
    long_about = "pangenome-table resolves the outputs of a plasmid caller, a general gene annotator and a resistance-gene annotator into one non-redundant set of features per genome.\n\nLoci where a resistance call agrees almost entirely with a gene annotation are counted under the resistance identity (plus one identity per detected variant); all other genes are counted under a product identity shared by every genome of the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve all genomes in a directory into a feature table
    Tabulate(tabulate::TabulateArgs),

    /// Resolve a single genome
    Resolve(resolve::ResolveArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Parse an overlap threshold, which must lie in [0, 1]
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside [0, 1]"))
    }
}

/// Lowest resistance cut-off kept, given the `--include-loose` flag
fn min_cut_off(include_loose: bool) -> CutOff {
    if include_loose {
        CutOff::Loose
    } else {
        CutOff::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.95"), Ok(0.95));
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("abc").is_err());
    }

    #[test]
    fn test_min_cut_off() {
        assert_eq!(min_cut_off(false), CutOff::Strict);
        assert_eq!(min_cut_off(true), CutOff::Loose);
    }
}
