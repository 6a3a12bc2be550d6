//! Core data types for annotation resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`FeatureRecord`]: A normalized genomic annotation (contig, interval, strand, kind)
//! - [`GeneralRecord`], [`ResistanceRow`]: Already-parsed rows from the gene and
//!   resistance annotators
//! - [`PlasmidContigs`]: Contigs called as plasmid-borne for one genome
//! - [`FeatureCounts`]: Sparse per-genome feature identity counts
//! - [`SpeciesSummary`]: Best species match and its ANI
//! - [`AnnotationError`]: Failure kinds that abort a genome
//!
//! ## Feature identities
//!
//! Every counted feature is keyed by a composite string:
//!
//! | Source | Layout | Example |
//! |--------|--------|---------|
//! | Resistance (base) | `{P,N}_A{accession}_{P,R}0` | `N_A3000796_P0` |
//! | Resistance (variant) | `{base}_A{variant}` | `N_A3003926_R0_AC1205T` |
//! | General | `{P,N}_P{vocabulary id}_{P,R}0` | `P_P0_P0` |
//!
//! The leading flag tells whether the contig was called as plasmid (`P`) or
//! chromosomal (`N`), the trailing letter gives the feature kind (protein or
//! RNA) and the `0` denotes the base allele.

pub mod error;
pub mod feature;
pub mod genome;
pub mod types;
