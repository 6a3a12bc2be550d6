use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::core::error::AnnotationError;
use crate::core::feature::{GeneralRecord, ResistanceRow};
use crate::core::types::{FeatureId, PlasmidFlag};

/// Contigs of one genome that the plasmid caller flagged as plasmid-borne
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlasmidContigs(HashSet<String>);

impl PlasmidContigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contig: impl Into<String>) {
        self.0.insert(contig.into());
    }

    #[must_use]
    pub fn contains(&self, contig: &str) -> bool {
        self.0.contains(contig)
    }

    /// Plasmid flag for a feature on `contig`
    #[must_use]
    pub fn flag_for(&self, contig: &str) -> PlasmidFlag {
        if self.contains(contig) {
            PlasmidFlag::Plasmid
        } else {
            PlasmidFlag::Chromosomal
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PlasmidContigs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// All already-parsed annotation streams of one genome
#[derive(Debug, Clone)]
pub struct GenomeAnnotations {
    pub genome: String,
    pub plasmids: PlasmidContigs,
    pub general: Vec<GeneralRecord>,
    pub resistance: Vec<ResistanceRow>,
}

/// Sparse feature identity -> occurrence count mapping of one genome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCounts(BTreeMap<FeatureId, u64>);

impl FeatureCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, id: FeatureId) {
        *self.0.entry(id).or_insert(0) += 1;
    }

    /// Count for `id`, zero when absent
    #[must_use]
    pub fn get(&self, id: &str) -> u64 {
        self.0.get(&FeatureId::new(id)).copied().unwrap_or(0)
    }

    /// Iterate entries in identity order
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, u64)> {
        self.0.iter().map(|(id, count)| (id, *count))
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all identities
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

/// Best species match of a genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub species: String,
    pub ani: f64,
}

impl SpeciesSummary {
    /// Build from the best-match name and its ANI.
    ///
    /// The name is `"<accession> <species>"`; the accession token and a leading
    /// `uncultured ` are stripped.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::MalformedRecord` if the name has no species part.
    pub fn from_best_match(name: &str, ani: f64) -> Result<Self, AnnotationError> {
        let (_, species) = name.trim().split_once(' ').ok_or_else(|| {
            AnnotationError::MalformedRecord(format!(
                "species match '{name}' has no name after its accession"
            ))
        })?;
        let species = species.strip_prefix("uncultured ").unwrap_or(species);

        Ok(Self {
            species: species.to_string(),
            ani,
        })
    }
}
