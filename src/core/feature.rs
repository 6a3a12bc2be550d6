use serde::{Deserialize, Serialize};

use crate::core::error::AnnotationError;
use crate::core::types::{CutOff, FeatureKind, Strand};

/// A normalized genomic annotation from any of the annotators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Contig the feature lies on
    pub contig: String,

    /// Start coordinate, as reported by the annotator
    pub start: u64,

    /// Stop coordinate, always greater than `start`
    pub stop: u64,

    pub strand: Strand,

    pub kind: FeatureKind,
}

impl FeatureRecord {
    /// Build a record, rejecting intervals where `stop <= start`.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MalformedRecord` if the coordinates are inverted
    /// or zero-length.
    pub fn new(
        contig: impl Into<String>,
        start: u64,
        stop: u64,
        strand: Strand,
        kind: FeatureKind,
    ) -> Result<Self, AnnotationError> {
        let contig = contig.into();
        if stop <= start {
            return Err(AnnotationError::MalformedRecord(format!(
                "feature on contig '{contig}' has stop {stop} <= start {start}"
            )));
        }

        Ok(Self {
            contig,
            start,
            stop,
            strand,
            kind,
        })
    }

    /// Length of the interval `[start, stop)`
    #[must_use]
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One feature row from the general gene annotator (GFF3 layout)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralRecord {
    pub seqid: String,

    /// Feature type column, e.g. `CDS`, `tRNA`, `gene`
    pub feature_type: String,

    pub start: u64,

    pub stop: u64,

    /// Raw strand column
    pub strand: String,

    /// Raw `key=value;key=value` attribute column
    pub attributes: String,
}

impl GeneralRecord {
    /// Rows that describe an annotated gene product; everything else
    /// (`gene`, `repeat_region`, `region`, ...) is skipped.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        self.feature_type == "CDS" || self.feature_type.ends_with("RNA")
    }

    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        if self.feature_type == "CDS" {
            FeatureKind::Protein
        } else {
            FeatureKind::Rna
        }
    }

    /// Look up an attribute value by key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| k.trim() == key)
            .map(|(_, v)| v)
    }

    /// Free-text product description of this feature
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MalformedRecord` if the row carries no `product`.
    pub fn product(&self) -> Result<&str, AnnotationError> {
        self.attribute("product").ok_or_else(|| {
            AnnotationError::MalformedRecord(format!(
                "{} on contig '{}' at {}..{} has no product attribute",
                self.feature_type, self.seqid, self.start, self.stop
            ))
        })
    }

    /// Normalize into a [`FeatureRecord`]
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MalformedRecord` for an unknown strand or
    /// invalid coordinates.
    pub fn to_feature(&self) -> Result<FeatureRecord, AnnotationError> {
        let strand = Strand::parse(&self.strand).ok_or_else(|| {
            AnnotationError::MalformedRecord(format!(
                "invalid strand '{}' on contig '{}' at {}",
                self.strand, self.seqid, self.start
            ))
        })?;
        FeatureRecord::new(&self.seqid, self.start, self.stop, strand, self.kind())
    }
}

/// One prediction row from the resistance annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceRow {
    pub contig: String,

    pub start: u64,

    pub stop: u64,

    pub strand: Strand,

    /// Detection model, e.g. `protein homolog model`, `rRNA gene variant model`
    pub model_type: String,

    /// Resistance-ontology accession
    pub accession: String,

    /// Variants reported against the best-hit model
    #[serde(default)]
    pub best_hit_variants: Vec<String>,

    /// Additional variants reported at this locus
    #[serde(default)]
    pub other_variants: Vec<String>,

    pub cut_off: CutOff,
}
