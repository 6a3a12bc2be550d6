use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::{min_cut_off, parse_threshold, OutputFormat};
use crate::core::genome::{FeatureCounts, SpeciesSummary};
use crate::matching::resolver::{AnnotationResolver, ResolverConfig, DEFAULT_OVERLAP_THRESHOLD};
use crate::matching::vocabulary::FeatureVocabulary;
use crate::parsing::{load_genome, load_species, GenomePaths};

#[derive(Args)]
pub struct ResolveArgs {
    /// Directory holding one sub-directory of annotations per genome
    #[arg(required = true)]
    pub indir: PathBuf,

    /// Genome to resolve (name of its sub-directory)
    #[arg(required = true)]
    pub genome: String,

    /// Overlap a resistance call must exceed to claim a gene locus
    #[arg(long, default_value_t = DEFAULT_OVERLAP_THRESHOLD, value_parser = parse_threshold)]
    pub overlap_threshold: f64,

    /// Also keep resistance calls below the strict cut-off
    #[arg(long)]
    pub include_loose: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    genome: &'a str,
    species: SpeciesSummary,
    counts: FeatureCounts,
    vocabulary: Vec<String>,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the genome's inputs are missing or malformed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let paths = GenomePaths::new(&args.indir, &args.genome);
    let context = || format!("Failed to resolve genome '{}'", args.genome);

    let species = load_species(&paths).with_context(context)?;
    let annotations = load_genome(&paths).with_context(context)?;

    if verbose {
        eprintln!(
            "Loaded {} general rows, {} resistance rows, {} plasmid contigs",
            annotations.general.len(),
            annotations.resistance.len(),
            annotations.plasmids.len()
        );
    }

    let vocabulary = FeatureVocabulary::new();
    let config = ResolverConfig {
        overlap_threshold: args.overlap_threshold,
        min_cut_off: min_cut_off(args.include_loose),
    };
    let counts = AnnotationResolver::with_config(&vocabulary, config)
        .resolve(&annotations)
        .with_context(context)?;

    let resolution = Resolution {
        genome: &args.genome,
        species,
        counts,
        vocabulary: vocabulary.snapshot(),
    };

    match format {
        OutputFormat::Text => print_text_resolution(&resolution),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
        OutputFormat::Tsv => {
            println!("feature\tcount");
            for (feature, count) in resolution.counts.iter() {
                println!("{feature}\t{count}");
            }
        }
    }

    Ok(())
}

fn print_text_resolution(resolution: &Resolution<'_>) {
    println!("Genome:   {}", resolution.genome);
    println!(
        "Species:  {} (ANI {:.4})",
        resolution.species.species, resolution.species.ani
    );
    println!(
        "Features: {} ({} loci)",
        resolution.counts.len(),
        resolution.counts.total()
    );
    println!();

    for (feature, count) in resolution.counts.iter() {
        println!("  {feature:<32} {count}");
    }
}
