//! Assembly of the genome × feature table.
//!
//! The [`GenomeTableAssembler`] discovers genomes, looks up their species in
//! parallel, then resolves their annotations in parallel against one shared
//! [`FeatureVocabulary`](crate::matching::FeatureVocabulary). A failure in any
//! genome fails the whole run.

pub mod assembler;

pub use assembler::{
    discover_genomes, AssemblerConfig, GenomeRow, GenomeTable, GenomeTableAssembler, TableError,
};
