//! # pangenome-table
//!
//! A library for building a pangenome-style feature table from per-genome
//! annotations produced by three independent annotators: a plasmid caller, a
//! general gene annotator and a resistance-gene annotator.
//!
//! The annotators overlap: a resistance gene is usually also called, under a
//! generic product name, by the gene annotator. `pangenome-table` decides which
//! predictions refer to the same locus and counts each locus once, under a
//! stable feature identity shared by every genome of the run.
//!
//! ## Features
//!
//! - **Interval overlap scoring**: Jaccard similarity of feature intervals on the
//!   same contig, strand and kind
//! - **Source priority**: Near-identical resistance calls claim the locus,
//!   including one derived feature per detected variant
//! - **Shared vocabulary**: Identical product descriptions collapse onto the
//!   same identifier across all genomes, even when genomes run in parallel
//! - **Plasmid tagging**: Every feature records whether its contig is plasmid-borne
//!
//! ## Example
//!
//! ```rust,no_run
//! use pangenome_table::table::{AssemblerConfig, GenomeTableAssembler};
//! use std::path::Path;
//!
//! let table = GenomeTableAssembler::new(AssemblerConfig::default())
//!     .assemble(Path::new("annotations"))
//!     .unwrap();
//!
//! for row in &table.rows {
//!     println!("{}: {} features", row.genome, row.counts.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Feature records, identities, counts and errors
//! - [`matching`]: Overlap scoring, resistance features, vocabulary and resolver
//! - [`parsing`]: Readers for the annotator output files
//! - [`table`]: Parallel assembly of the genome × feature table
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod table;

// Re-export commonly used types for convenience
pub use crate::core::error::AnnotationError;
pub use crate::core::feature::{FeatureRecord, GeneralRecord, ResistanceRow};
pub use crate::core::genome::{FeatureCounts, GenomeAnnotations, PlasmidContigs, SpeciesSummary};
pub use crate::core::types::*;
pub use crate::matching::{overlap, AnnotationResolver, FeatureVocabulary, ResistanceFeature};
pub use crate::table::{GenomeTable, GenomeTableAssembler};
