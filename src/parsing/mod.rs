//! Adapters that read the per-genome annotator outputs into typed records.
//!
//! A genome `G` lives in its own directory `INDIR/G/` holding:
//!
//! | File | Producer | Parsed into |
//! |------|----------|-------------|
//! | `G.platon.tsv` | plasmid caller | [`PlasmidContigs`] |
//! | `G.prokka.gff` | general gene annotator | [`GeneralRecord`](crate::core::feature::GeneralRecord) rows |
//! | `G.rgi.txt` | resistance annotator | [`ResistanceRow`](crate::core::feature::ResistanceRow) rows |
//! | `G.sourmash.csv` | species search | [`SpeciesSummary`](crate::core::genome::SpeciesSummary) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use pangenome_table::parsing::{load_genome, GenomePaths};
//! use std::path::Path;
//!
//! let paths = GenomePaths::new(Path::new("annotations"), "GCF_000005845.2");
//! let genome = load_genome(&paths).unwrap();
//! println!("{} general rows", genome.general.len());
//! ```
//!
//! [`PlasmidContigs`]: crate::core::genome::PlasmidContigs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::AnnotationError;
use crate::core::genome::{GenomeAnnotations, SpeciesSummary};

pub mod gff;
pub mod platon;
pub mod rgi;
pub mod sourmash;

/// Locations of the annotator outputs of one genome
#[derive(Debug, Clone)]
pub struct GenomePaths {
    pub genome: String,
    pub platon: PathBuf,
    pub prokka: PathBuf,
    pub rgi: PathBuf,
    pub sourmash: PathBuf,
}

impl GenomePaths {
    /// Conventional layout `indir/genome/genome.<tool>.<ext>`
    pub fn new(indir: &Path, genome: &str) -> Self {
        let dir = indir.join(genome);
        Self {
            genome: genome.to_string(),
            platon: dir.join(format!("{genome}.platon.tsv")),
            prokka: dir.join(format!("{genome}.prokka.gff")),
            rgi: dir.join(format!("{genome}.rgi.txt")),
            sourmash: dir.join(format!("{genome}.sourmash.csv")),
        }
    }
}

/// Read a whole input file, reporting an absent file as missing input
pub(crate) fn read_input(path: &Path) -> Result<String, AnnotationError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AnnotationError::MissingInput(format!("{} does not exist", path.display()))
        }
        _ => AnnotationError::Io(e),
    })
}

/// Read the plasmid, general and resistance annotations of a genome
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if any of the three files is absent,
/// or a parse error from the individual parsers.
pub fn load_genome(paths: &GenomePaths) -> Result<GenomeAnnotations, AnnotationError> {
    Ok(GenomeAnnotations {
        genome: paths.genome.clone(),
        plasmids: platon::parse_platon_file(&paths.platon)?,
        general: gff::parse_gff_file(&paths.prokka)?,
        resistance: rgi::parse_rgi_file(&paths.rgi)?,
    })
}

/// Read the best species match of a genome
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if the file is absent or has no
/// matches, or `AnnotationError::MalformedRecord` for an invalid best match.
pub fn load_species(paths: &GenomePaths) -> Result<SpeciesSummary, AnnotationError> {
    sourmash::parse_species_file(&paths.sourmash)
}
