use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{min_cut_off, parse_threshold, OutputFormat};
use crate::matching::resolver::{ResolverConfig, DEFAULT_OVERLAP_THRESHOLD};
use crate::table::{AssemblerConfig, GenomeTable, GenomeTableAssembler};

#[derive(Args)]
pub struct TabulateArgs {
    /// Directory holding one sub-directory of annotations per genome
    #[arg(required = true)]
    pub indir: PathBuf,

    /// Number of genomes processed concurrently (defaults to all available CPUs)
    #[arg(short, long, env = "JOBS", value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Write the product vocabulary here, one product per line in id order
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// Overlap a resistance call must exceed to claim a gene locus
    #[arg(long, default_value_t = DEFAULT_OVERLAP_THRESHOLD, value_parser = parse_threshold)]
    pub overlap_threshold: f64,

    /// Also keep resistance calls below the strict cut-off
    #[arg(long)]
    pub include_loose: bool,
}

impl TabulateArgs {
    fn assembler_config(&self) -> anyhow::Result<AssemblerConfig> {
        let mut config = AssemblerConfig {
            resolver: ResolverConfig {
                overlap_threshold: self.overlap_threshold,
                min_cut_off: min_cut_off(self.include_loose),
            },
            ..AssemblerConfig::default()
        };
        if let Some(jobs) = self.jobs {
            config.jobs = usize::try_from(jobs).context("--jobs is too large")?;
        }
        Ok(config)
    }
}

/// Execute tabulate subcommand
///
/// # Errors
///
/// Returns an error if any genome cannot be resolved or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TabulateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if let Some(path) = &args.vocabulary {
        anyhow::ensure!(
            !path.exists(),
            "'{}' exists, not overwriting",
            path.display()
        );
    }

    let config = args.assembler_config()?;
    if verbose {
        eprintln!(
            "Using {} jobs, overlap threshold {}",
            config.jobs, config.resolver.overlap_threshold
        );
    }

    let table = GenomeTableAssembler::new(config)
        .assemble(&args.indir)
        .with_context(|| format!("Failed to tabulate {}", args.indir.display()))?;

    if let Some(path) = &args.vocabulary {
        write_vocabulary(path, &table.vocabulary)
            .with_context(|| format!("Failed to write vocabulary to {}", path.display()))?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => print_text_table(&mut out, &table)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &table)?;
            writeln!(out)?;
        }
        OutputFormat::Tsv => print_tsv_table(&mut out, &table)?,
    }

    Ok(())
}

/// Write one product per line; never replaces an existing file
fn write_vocabulary(path: &Path, vocabulary: &[String]) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                anyhow::anyhow!("'{}' exists, not overwriting", path.display())
            }
            _ => anyhow::Error::new(e),
        })?;

    let mut file = std::io::BufWriter::new(file);
    for product in vocabulary {
        writeln!(file, "{product}")?;
    }
    file.flush()?;
    Ok(())
}

fn print_text_table(out: &mut impl Write, table: &GenomeTable) -> std::io::Result<()> {
    writeln!(
        out,
        "{} genomes, {} features, {} products",
        table.rows.len(),
        table.features().len(),
        table.vocabulary.len()
    )?;
    writeln!(out)?;

    for row in &table.rows {
        writeln!(
            out,
            "{}  {} (ANI {:.4})  {} features, {} loci",
            row.genome,
            row.species.species,
            row.species.ani,
            row.counts.len(),
            row.counts.total()
        )?;
    }

    Ok(())
}

/// Sparse long-form table: one line per (genome, feature) with a non-zero count
fn print_tsv_table(out: &mut impl Write, table: &GenomeTable) -> std::io::Result<()> {
    writeln!(out, "accession\tspecies\tani\tfeature\tcount")?;
    for row in &table.rows {
        for (feature, count) in row.counts.iter() {
            writeln!(
                out,
                "{}\t{}\t{}\t{feature}\t{count}",
                row.genome, row.species.species, row.species.ani
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::genome::{FeatureCounts, SpeciesSummary};
    use crate::core::types::FeatureId;
    use crate::table::GenomeRow;

    fn table() -> GenomeTable {
        let mut counts = FeatureCounts::new();
        counts.increment(FeatureId::new("N_P0_P0"));
        counts.increment(FeatureId::new("N_P0_P0"));
        counts.increment(FeatureId::new("P_A1234_P0"));
        GenomeTable {
            rows: vec![GenomeRow {
                genome: "G1".to_string(),
                species: SpeciesSummary {
                    species: "Escherichia coli".to_string(),
                    ani: 0.99,
                },
                counts,
            }],
            vocabulary: vec!["hypothetical protein".to_string()],
        }
    }

    #[test]
    fn test_print_tsv_table() {
        let mut out = Vec::new();
        print_tsv_table(&mut out, &table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "accession\tspecies\tani\tfeature\tcount\n\
             G1\tEscherichia coli\t0.99\tN_P0_P0\t2\n\
             G1\tEscherichia coli\t0.99\tP_A1234_P0\t1\n"
        );
    }

    #[test]
    fn test_print_text_table() {
        let mut out = Vec::new();
        print_text_table(&mut out, &table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1 genomes, 2 features, 1 products"));
        assert!(text.contains("G1  Escherichia coli (ANI 0.9900)  2 features, 3 loci"));
    }

    #[test]
    fn test_write_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.txt");
        write_vocabulary(&path, &["hypothetical protein".to_string(), "TEM-1".to_string()])
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "hypothetical protein\nTEM-1\n"
        );
    }

    #[test]
    fn test_write_vocabulary_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.txt");
        std::fs::write(&path, "written meanwhile\n").unwrap();

        let err = write_vocabulary(&path, &["hypothetical protein".to_string()]).unwrap_err();
        assert!(err.to_string().contains("not overwriting"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "written meanwhile\n"
        );
    }
}
