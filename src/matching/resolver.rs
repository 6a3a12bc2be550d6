//! Resolution of overlapping gene and resistance annotations.
//!
//! Every general annotation row is compared against the resistance calls of the
//! same genome. When the best-overlapping call agrees on the locus almost
//! entirely (score strictly above the threshold) the locus is counted under the
//! resistance identities; otherwise it is counted under a general identity whose
//! product is drawn from the shared [`FeatureVocabulary`].
//!
//! Resistance calls that no general row lands on are not counted.

use std::collections::HashMap;

use tracing::debug;

use crate::core::error::AnnotationError;
use crate::core::feature::FeatureRecord;
use crate::core::genome::{FeatureCounts, GenomeAnnotations};
use crate::core::types::{CutOff, FeatureId, FeatureKind, Strand};
use crate::matching::resistance::ResistanceFeature;
use crate::matching::scoring::overlap;
use crate::matching::vocabulary::FeatureVocabulary;

/// Overlap a resistance call must exceed to claim a locus
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.95;

/// Configuration for the annotation resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Strict lower bound on the overlap score for resistance attribution
    pub overlap_threshold: f64,
    /// Lowest resistance confidence tier that is kept
    pub min_cut_off: CutOff,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            min_cut_off: CutOff::Strict,
        }
    }
}

type LocusKey<'a> = (&'a str, Strand, FeatureKind);

/// Resistance calls of one genome bucketed by (contig, strand, kind).
///
/// Calls in different buckets always score 0.0 against each other, so only
/// one bucket is scanned per query. Buckets keep source order.
struct ResistanceIndex<'a> {
    features: &'a [ResistanceFeature],
    buckets: HashMap<LocusKey<'a>, Vec<usize>>,
}

impl<'a> ResistanceIndex<'a> {
    fn new(features: &'a [ResistanceFeature]) -> Self {
        let mut buckets: HashMap<LocusKey<'a>, Vec<usize>> = HashMap::new();
        for (i, feature) in features.iter().enumerate() {
            let record = &feature.record;
            buckets
                .entry((record.contig.as_str(), record.strand, record.kind))
                .or_default()
                .push(i);
        }
        Self { features, buckets }
    }

    /// Best-overlapping call for `query`; ties keep the first call seen
    fn best_match(
        &self,
        query: &FeatureRecord,
    ) -> Result<Option<(f64, &'a ResistanceFeature)>, AnnotationError> {
        let Some(candidates) = self
            .buckets
            .get(&(query.contig.as_str(), query.strand, query.kind))
        else {
            return Ok(None);
        };

        let mut best: Option<(f64, &'a ResistanceFeature)> = None;
        let mut best_score = 0.0;
        for &i in candidates {
            let candidate = &self.features[i];
            let score = overlap(query, &candidate.record)?;
            if score > best_score {
                best_score = score;
                best = Some((score, candidate));
            }
        }

        Ok(best)
    }
}

/// Resolves the annotation streams of a genome into feature counts
pub struct AnnotationResolver<'a> {
    vocabulary: &'a FeatureVocabulary,
    config: ResolverConfig,
}

impl<'a> AnnotationResolver<'a> {
    /// Create a resolver with default configuration
    pub fn new(vocabulary: &'a FeatureVocabulary) -> Self {
        Self {
            vocabulary,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(vocabulary: &'a FeatureVocabulary, config: ResolverConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one genome into its feature counts.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MissingInput` if the genome has no `CDS` or
    /// RNA annotation rows, `AnnotationError::MalformedRecord` for rows with invalid
    /// coordinates, strands or no product, and
    /// `AnnotationError::DegenerateOverlap` for zero-length features.
    pub fn resolve(&self, genome: &GenomeAnnotations) -> Result<FeatureCounts, AnnotationError> {
        let mut resistance = Vec::with_capacity(genome.resistance.len());
        for row in &genome.resistance {
            if let Some(feature) =
                ResistanceFeature::from_row(row, &genome.plasmids, self.config.min_cut_off)?
            {
                resistance.push(feature);
            }
        }
        let index = ResistanceIndex::new(&resistance);

        let mut counts = FeatureCounts::new();
        let mut resistance_loci = 0usize;
        let mut general_loci = 0usize;
        let mut skipped = 0usize;

        for row in &genome.general {
            if !row.is_annotation() {
                skipped += 1;
                continue;
            }
            let query = row.to_feature()?;

            if let Some((score, feature)) = index.best_match(&query)? {
                if score > self.config.overlap_threshold {
                    for id in &feature.identities {
                        counts.increment(id.clone());
                    }
                    resistance_loci += 1;
                    continue;
                }
            }

            let product_id = self.vocabulary.resolve(row.product()?);
            let flag = genome.plasmids.flag_for(&query.contig);
            counts.increment(FeatureId::general(flag, product_id, query.kind));
            general_loci += 1;
        }

        if resistance_loci + general_loci == 0 {
            return Err(AnnotationError::MissingInput(format!(
                "genome '{}' has no CDS or RNA annotation rows ({skipped} other rows skipped)",
                genome.genome
            )));
        }

        debug!(
            genome = %genome.genome,
            resistance_calls = resistance.len(),
            resistance_loci,
            general_loci,
            skipped,
            features = counts.len(),
            "Resolved annotations"
        );

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::{GeneralRecord, ResistanceRow};
    use crate::core::genome::PlasmidContigs;

    fn cds(contig: &str, start: u64, stop: u64, product: &str) -> GeneralRecord {
        GeneralRecord {
            seqid: contig.to_string(),
            feature_type: "CDS".to_string(),
            start,
            stop,
            strand: "+".to_string(),
            attributes: format!("ID=G_00001;product={product}"),
        }
    }

    fn rgi(contig: &str, start: u64, stop: u64, accession: &str) -> ResistanceRow {
        ResistanceRow {
            contig: contig.to_string(),
            start,
            stop,
            strand: Strand::Forward,
            model_type: "protein homolog model".to_string(),
            accession: accession.to_string(),
            best_hit_variants: vec!["n/a".to_string()],
            other_variants: vec!["n/a".to_string()],
            cut_off: CutOff::Strict,
        }
    }

    fn genome(
        plasmids: &[&str],
        general: Vec<GeneralRecord>,
        resistance: Vec<ResistanceRow>,
    ) -> GenomeAnnotations {
        GenomeAnnotations {
            genome: "G".to_string(),
            plasmids: plasmids.iter().copied().collect::<PlasmidContigs>(),
            general,
            resistance,
        }
    }

    fn entries(counts: &FeatureCounts) -> Vec<(String, u64)> {
        counts.iter().map(|(id, n)| (id.to_string(), n)).collect()
    }

    #[test]
    fn test_general_only_genome() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let g1 = genome(&[], vec![cds("c1", 100, 200, "hypothetical protein")], vec![]);
        let counts = resolver.resolve(&g1).unwrap();

        assert_eq!(entries(&counts), vec![("N_P0_P0".to_string(), 1)]);
    }

    #[test]
    fn test_resistance_claims_locus() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let g2 = genome(
            &["c1"],
            vec![cds("c1", 500, 600, "Beta-lactamase")],
            vec![rgi("c1", 500, 598, "1234")],
        );
        let counts = resolver.resolve(&g2).unwrap();

        assert_eq!(entries(&counts), vec![("P_A1234_P0".to_string(), 1)]);
        // The product never reached the vocabulary
        assert_eq!(vocabulary.get("Beta-lactamase"), None);
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        // 95 / 100 == 0.95 exactly: stays with the general annotator
        let at_threshold = genome(
            &[],
            vec![cds("c1", 0, 100, "DNA gyrase subunit A")],
            vec![rgi("c1", 0, 95, "3003926")],
        );
        let counts = resolver.resolve(&at_threshold).unwrap();
        assert_eq!(entries(&counts), vec![("N_P1_P0".to_string(), 1)]);

        // 951 / 1000 == 0.951: claimed by the resistance annotator
        let above = genome(
            &[],
            vec![cds("c1", 0, 1000, "DNA gyrase subunit A")],
            vec![rgi("c1", 0, 951, "3003926")],
        );
        let counts = resolver.resolve(&above).unwrap();
        assert_eq!(entries(&counts), vec![("N_A3003926_P0".to_string(), 1)]);
    }

    #[test]
    fn test_variants_counted_together() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let mut row = rgi("c1", 100, 1000, "3003926");
        row.best_hit_variants = vec!["S83L".to_string(), "D87N".to_string()];
        row.other_variants = vec!["D87N".to_string()];

        let g = genome(
            &[],
            vec![
                cds("c1", 100, 1000, "DNA gyrase subunit A"),
                cds("c1", 100, 1000, "DNA gyrase subunit A"),
            ],
            vec![row],
        );
        let counts = resolver.resolve(&g).unwrap();
        assert_eq!(
            entries(&counts),
            vec![
                ("N_A3003926_P0".to_string(), 2),
                ("N_A3003926_P0_AD87N".to_string(), 2),
                ("N_A3003926_P0_AS83L".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_best_match_wins_and_ties_keep_first() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        // 0.96 vs 0.99: the better one wins
        let g = genome(
            &[],
            vec![cds("c1", 0, 100, "x")],
            vec![rgi("c1", 0, 96, "1"), rgi("c1", 0, 99, "2")],
        );
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_A2_P0".to_string(), 1)]
        );

        // 0.99 vs 0.99: the first one seen wins
        let g = genome(
            &[],
            vec![cds("c1", 100, 200, "x")],
            vec![rgi("c1", 100, 199, "1"), rgi("c1", 101, 200, "2")],
        );
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_A1_P0".to_string(), 1)]
        );
    }

    #[test]
    fn test_mismatched_locus_not_claimed() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let mut reverse = rgi("c1", 0, 100, "1");
        reverse.strand = Strand::Reverse;
        let mut rna = rgi("c1", 0, 100, "2");
        rna.model_type = "rRNA gene variant model".to_string();

        let g = genome(
            &[],
            vec![cds("c1", 0, 100, "hypothetical protein")],
            vec![reverse, rna, rgi("c2", 0, 100, "3")],
        );
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_P0_P0".to_string(), 1)]
        );
    }

    #[test]
    fn test_resistance_only_loci_not_counted() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let g = genome(
            &[],
            vec![cds("c1", 0, 100, "hypothetical protein")],
            vec![rgi("c1", 5000, 6000, "1")],
        );
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_P0_P0".to_string(), 1)]
        );
    }

    #[test]
    fn test_loose_calls_ignored() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let mut loose = rgi("c1", 0, 100, "1");
        loose.cut_off = CutOff::Loose;
        let g = genome(&[], vec![cds("c1", 0, 100, "hypothetical protein")], vec![loose]);
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_P0_P0".to_string(), 1)]
        );
    }

    #[test]
    fn test_rna_rows_and_skipped_rows() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let mut trna = cds("c1", 300, 376, "tRNA-Leu(cag)");
        trna.feature_type = "tRNA".to_string();
        let mut gene = cds("c1", 0, 100, "ignored");
        gene.feature_type = "gene".to_string();

        let g = genome(&["c1"], vec![gene, trna], vec![]);
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("P_P1_R0".to_string(), 1)]
        );
        assert_eq!(vocabulary.get("ignored"), None);
    }

    #[test]
    fn test_vocabulary_shared_across_genomes() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let a = genome(&[], vec![cds("c1", 0, 100, "Tetracycline efflux pump")], vec![]);
        let b = genome(&["p1"], vec![cds("p1", 0, 100, "Tetracycline efflux pump")], vec![]);

        assert_eq!(entries(&resolver.resolve(&a).unwrap()), vec![("N_P1_P0".to_string(), 1)]);
        assert_eq!(entries(&resolver.resolve(&b).unwrap()), vec![("P_P1_P0".to_string(), 1)]);
    }

    #[test]
    fn test_empty_general_stream_is_missing_input() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);
        let g = genome(&[], vec![], vec![rgi("c1", 0, 100, "1")]);
        assert!(matches!(
            resolver.resolve(&g),
            Err(AnnotationError::MissingInput(_))
        ));
    }

    #[test]
    fn test_only_skipped_rows_is_missing_input() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let mut crispr = cds("c1", 4000, 4200, "unused");
        crispr.feature_type = "repeat_region".to_string();
        crispr.attributes = "note=CRISPR with 3 repeat units".to_string();
        let mut gene = cds("c1", 0, 100, "unused");
        gene.feature_type = "gene".to_string();

        let g = genome(&[], vec![crispr, gene], vec![rgi("c1", 0, 100, "1")]);
        assert!(matches!(
            resolver.resolve(&g),
            Err(AnnotationError::MissingInput(_))
        ));
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn test_malformed_rows_abort() {
        let vocabulary = FeatureVocabulary::new();
        let resolver = AnnotationResolver::new(&vocabulary);

        let g = genome(&[], vec![cds("c1", 200, 100, "x")], vec![]);
        assert!(matches!(
            resolver.resolve(&g),
            Err(AnnotationError::MalformedRecord(_))
        ));

        let mut no_product = cds("c1", 0, 100, "x");
        no_product.attributes = "ID=G_00001".to_string();
        let g = genome(&[], vec![no_product], vec![]);
        assert!(matches!(
            resolver.resolve(&g),
            Err(AnnotationError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_custom_threshold() {
        let vocabulary = FeatureVocabulary::new();
        let config = ResolverConfig {
            overlap_threshold: 0.5,
            ..ResolverConfig::default()
        };
        let resolver = AnnotationResolver::with_config(&vocabulary, config);

        let g = genome(&[], vec![cds("c1", 0, 100, "x")], vec![rgi("c1", 0, 60, "7")]);
        assert_eq!(
            entries(&resolver.resolve(&g).unwrap()),
            vec![("N_A7_P0".to_string(), 1)]
        );
    }
}
