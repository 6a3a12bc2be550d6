use serde::{Deserialize, Serialize};

/// Composite key naming one counted feature
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Identity of a resistance call at its base allele
    #[must_use]
    pub fn resistance(flag: PlasmidFlag, accession: &str, kind: FeatureKind) -> Self {
        Self(format!("{}_A{accession}_{}0", flag.code(), kind.code()))
    }

    /// Identity of a general annotation keyed by its vocabulary integer
    #[must_use]
    pub fn general(flag: PlasmidFlag, product_id: usize, kind: FeatureKind) -> Self {
        Self(format!("{}_P{product_id}_{}0", flag.code(), kind.code()))
    }

    /// Derive the identity of a sequence variant detected at this locus
    #[must_use]
    pub fn with_variant(&self, variant: &str) -> Self {
        Self(format!("{}_A{variant}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strand of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    /// Parse a strand symbol. Unstranded (`.`) and unknown (`?`) are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Kind of gene product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Protein,
    Rna,
}

impl FeatureKind {
    /// Single letter used inside feature identities
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Protein => 'P',
            Self::Rna => 'R',
        }
    }
}

/// Whether a feature sits on a plasmid or on the chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasmidFlag {
    Plasmid,
    Chromosomal,
}

impl PlasmidFlag {
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Plasmid => 'P',
            Self::Chromosomal => 'N',
        }
    }
}

/// Confidence tier reported by the resistance annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CutOff {
    Loose,
    Strict,
    Perfect,
}

impl CutOff {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "loose" => Some(Self::Loose),
            "strict" => Some(Self::Strict),
            "perfect" => Some(Self::Perfect),
            _ => None,
        }
    }
}

impl std::fmt::Display for CutOff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loose => write!(f, "Loose"),
            Self::Strict => write!(f, "Strict"),
            Self::Perfect => write!(f, "Perfect"),
        }
    }
}
