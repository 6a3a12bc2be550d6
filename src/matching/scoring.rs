use crate::core::error::AnnotationError;
use crate::core::feature::FeatureRecord;

/// Convert an interval length to f64 for ratio calculations
#[inline]
fn length_to_f64(length: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        length as f64
    }
}

/// Jaccard similarity of the intervals of two features: |A ∩ B| / |A ∪ B|
///
/// Features on different contigs or strands, or of different kinds, never
/// overlap and score 0.0. The score is symmetric in its arguments.
///
/// # Errors
///
/// Returns `AnnotationError::DegenerateOverlap` when both intervals are empty
/// and coincide, leaving an empty union.
pub fn overlap(a: &FeatureRecord, b: &FeatureRecord) -> Result<f64, AnnotationError> {
    if a.contig != b.contig || a.strand != b.strand || a.kind != b.kind {
        return Ok(0.0);
    }

    let overlap_len = a.stop.min(b.stop).saturating_sub(a.start.max(b.start));
    let union_len = a.len() + b.len() - overlap_len;

    if union_len == 0 {
        return Err(AnnotationError::DegenerateOverlap {
            contig: a.contig.clone(),
            start: a.start,
        });
    }

    Ok(length_to_f64(overlap_len) / length_to_f64(union_len))
}
