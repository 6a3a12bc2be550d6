use crate::core::error::AnnotationError;
use crate::core::feature::{FeatureRecord, ResistanceRow};
use crate::core::genome::PlasmidContigs;
use crate::core::types::{CutOff, FeatureId, FeatureKind};

/// Variant list entry meaning "no variant"
pub const NO_VARIANT: &str = "n/a";

/// Model-type prefix marking RNA resistance models
pub const RNA_MODEL_PREFIX: &str = "rRNA";

/// A resistance call ready for overlap resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResistanceFeature {
    pub record: FeatureRecord,

    /// Base identity first, then one derived identity per distinct variant.
    /// All of them are counted together whenever the locus is attributed here.
    pub identities: Vec<FeatureId>,
}

impl ResistanceFeature {
    /// Build from one resistance row.
    ///
    /// Returns `Ok(None)` when the row's confidence tier is below `min_cut_off`.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MalformedRecord` if the row's coordinates are invalid.
    pub fn from_row(
        row: &ResistanceRow,
        plasmids: &PlasmidContigs,
        min_cut_off: CutOff,
    ) -> Result<Option<Self>, AnnotationError> {
        if row.cut_off < min_cut_off {
            return Ok(None);
        }

        let kind = if row.model_type.starts_with(RNA_MODEL_PREFIX) {
            FeatureKind::Rna
        } else {
            FeatureKind::Protein
        };
        let record = FeatureRecord::new(&row.contig, row.start, row.stop, row.strand, kind)?;

        let base = FeatureId::resistance(plasmids.flag_for(&row.contig), &row.accession, kind);
        let variants = distinct_variants(&row.best_hit_variants, &row.other_variants);

        let mut identities = Vec::with_capacity(variants.len() + 1);
        identities.push(base.clone());
        identities.extend(variants.iter().map(|variant| base.with_variant(variant)));

        Ok(Some(Self { record, identities }))
    }
}

/// Union of both variant lists in first-seen order, without the sentinel or
/// blank entries.
fn distinct_variants<'a>(best_hit: &'a [String], other: &'a [String]) -> Vec<&'a str> {
    let mut variants: Vec<&str> = Vec::new();

    for variant in best_hit.iter().chain(other).map(|v| v.trim()) {
        if variant.is_empty() || variant == NO_VARIANT || variants.contains(&variant) {
            continue;
        }
        variants.push(variant);
    }

    variants
}
