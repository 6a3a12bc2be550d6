use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::error::AnnotationError;
use crate::core::genome::{FeatureCounts, SpeciesSummary};
use crate::core::types::FeatureId;
use crate::matching::resolver::{AnnotationResolver, ResolverConfig};
use crate::matching::vocabulary::FeatureVocabulary;
use crate::parsing::{load_genome, load_species, GenomePaths};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No genome directories found in {0}")]
    NoGenomes(PathBuf),

    #[error("Genome '{genome}': {source}")]
    Genome {
        genome: String,
        #[source]
        source: AnnotationError,
    },

    #[error("Number of jobs must be at least 1")]
    InvalidJobs,

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for table assembly
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Number of genomes processed concurrently
    pub jobs: usize,
    pub resolver: ResolverConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            resolver: ResolverConfig::default(),
        }
    }
}

/// One genome's row of the table
#[derive(Debug, Clone, Serialize)]
pub struct GenomeRow {
    pub genome: String,
    pub species: SpeciesSummary,
    pub counts: FeatureCounts,
}

/// Sparse genome × feature table with the product vocabulary of the run
#[derive(Debug, Clone, Serialize)]
pub struct GenomeTable {
    /// Rows ordered by genome name
    pub rows: Vec<GenomeRow>,

    /// Product descriptions indexed by their vocabulary integer
    pub vocabulary: Vec<String>,
}

impl GenomeTable {
    /// Every feature identity counted in at least one genome, in identity order
    pub fn features(&self) -> BTreeSet<&FeatureId> {
        self.rows
            .iter()
            .flat_map(|row| row.counts.iter().map(|(id, _)| id))
            .collect()
    }
}

/// List genome directories under `indir`, sorted by name
///
/// # Errors
///
/// Returns `TableError::InputDir` if the directory cannot be read and
/// `TableError::NoGenomes` if it holds no sub-directories.
pub fn discover_genomes(indir: &Path) -> Result<Vec<String>, TableError> {
    let input_dir_error = |source| TableError::InputDir {
        path: indir.to_path_buf(),
        source,
    };

    let mut genomes = Vec::new();
    for entry in std::fs::read_dir(indir).map_err(input_dir_error)? {
        let entry = entry.map_err(input_dir_error)?;
        if entry.file_type().map_err(input_dir_error)?.is_dir() {
            genomes.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    if genomes.is_empty() {
        return Err(TableError::NoGenomes(indir.to_path_buf()));
    }

    genomes.sort();
    Ok(genomes)
}

/// Fans the per-genome work out over a worker pool and folds the results
pub struct GenomeTableAssembler {
    config: AssemblerConfig,
}

impl GenomeTableAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Assemble the table for every genome directory in `indir`
    ///
    /// # Errors
    ///
    /// Returns an error if genome discovery fails or any genome fails.
    pub fn assemble(&self, indir: &Path) -> Result<GenomeTable, TableError> {
        let genomes = discover_genomes(indir)?;
        self.assemble_genomes(indir, &genomes)
    }

    /// Assemble the table for the named genomes under `indir`.
    ///
    /// Species lookup runs first, then annotation resolution; each phase is
    /// parallel across genomes. The first failing genome aborts the run.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Genome` naming the failing genome,
    /// `TableError::InvalidJobs` for zero jobs, or `TableError::ThreadPool`.
    pub fn assemble_genomes(
        &self,
        indir: &Path,
        genomes: &[String],
    ) -> Result<GenomeTable, TableError> {
        if self.config.jobs == 0 {
            return Err(TableError::InvalidJobs);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()?;

        let paths: Vec<GenomePaths> = genomes
            .iter()
            .map(|genome| GenomePaths::new(indir, genome))
            .collect();

        info!(
            genomes = genomes.len(),
            jobs = self.config.jobs,
            "Looking up species"
        );
        let species: Vec<SpeciesSummary> = pool.install(|| {
            paths
                .par_iter()
                .map(|p| load_species(p).map_err(|source| genome_error(p, source)))
                .collect::<Result<_, _>>()
        })?;

        // Seeded with the placeholder before any task starts
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::with_config(&vocabulary, self.config.resolver.clone());

        info!(genomes = genomes.len(), "Resolving annotations");
        let counts: Vec<FeatureCounts> = pool.install(|| {
            paths
                .par_iter()
                .map(|p| {
                    debug!(genome = %p.genome, "Loading annotations");
                    load_genome(p)
                        .and_then(|annotations| resolver.resolve(&annotations))
                        .map_err(|source| genome_error(p, source))
                })
                .collect::<Result<_, _>>()
        })?;

        let rows = paths
            .into_iter()
            .zip(species)
            .zip(counts)
            .map(|((p, species), counts)| GenomeRow {
                genome: p.genome,
                species,
                counts,
            })
            .collect();

        let table = GenomeTable {
            rows,
            vocabulary: vocabulary.snapshot(),
        };
        info!(
            features = table.features().len(),
            products = table.vocabulary.len(),
            "Assembled genome table"
        );

        Ok(table)
    }
}

fn genome_error(paths: &GenomePaths, source: AnnotationError) -> TableError {
    TableError::Genome {
        genome: paths.genome.clone(),
        source,
    }
}
