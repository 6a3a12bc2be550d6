//! Annotation resolution: overlap scoring, resistance features, the shared
//! product vocabulary and the resolver that ties them together.
//!
//! - [`overlap`]: Jaccard similarity of two feature intervals
//! - [`ResistanceFeature`]: A resistance call with its base and variant identities
//! - [`FeatureVocabulary`]: Process-wide product -> integer registry
//! - [`AnnotationResolver`]: Turns one genome's annotations into feature counts
//!
//! ## Example
//!
//! ```rust
//! use pangenome_table::core::feature::GeneralRecord;
//! use pangenome_table::core::genome::{GenomeAnnotations, PlasmidContigs};
//! use pangenome_table::matching::{AnnotationResolver, FeatureVocabulary};
//!
//! let vocabulary = FeatureVocabulary::new();
//! let resolver = AnnotationResolver::new(&vocabulary);
//!
//! let genome = GenomeAnnotations {
//!     genome: "G1".to_string(),
//!     plasmids: PlasmidContigs::new(),
//!     general: vec![GeneralRecord {
//!         seqid: "c1".to_string(),
//!         feature_type: "CDS".to_string(),
//!         start: 100,
//!         stop: 200,
//!         strand: "+".to_string(),
//!         attributes: "ID=G1_00001;product=hypothetical protein".to_string(),
//!     }],
//!     resistance: Vec::new(),
//! };
//!
//! let counts = resolver.resolve(&genome).unwrap();
//! assert_eq!(counts.get("N_P0_P0"), 1);
//! ```

pub mod resistance;
pub mod resolver;
pub mod scoring;
pub mod vocabulary;

pub use resistance::ResistanceFeature;
pub use resolver::{AnnotationResolver, ResolverConfig};
pub use scoring::overlap;
pub use vocabulary::FeatureVocabulary;
