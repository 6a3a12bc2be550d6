//! Parser for the species search CSV. The first data row is the best match.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::AnnotationError;
use crate::core::genome::SpeciesSummary;
use crate::parsing::read_input;

#[derive(Debug, Deserialize)]
struct MatchRow {
    name: String,
    ani: f64,
}

/// Parse a species search file
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if the file does not exist, or the
/// errors of [`parse_species_text`].
pub fn parse_species_file(path: &Path) -> Result<SpeciesSummary, AnnotationError> {
    let content = read_input(path)?;
    parse_species_text(&content)
}

/// Parse species search text and summarize its best match
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if there is no data row, and
/// `AnnotationError::MalformedRecord` if the best match lacks a valid `name`
/// or `ani`.
pub fn parse_species_text(text: &str) -> Result<SpeciesSummary, AnnotationError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let best = reader
        .deserialize::<MatchRow>()
        .next()
        .ok_or_else(|| AnnotationError::MissingInput("species search has no matches".to_string()))?
        .map_err(|e| AnnotationError::MalformedRecord(format!("Invalid species match: {e}")))?;

    SpeciesSummary::from_best_match(&best.name, best.ani)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_species_text() {
        let csv = "intersect_bp,f_orig_query,name,ani,md5\n\
                   4500000,0.92,\"GCF_000005845.2 Escherichia coli str. K-12, MG1655\",0.9912,abc\n\
                   100000,0.01,GCF_000001.1 Shigella flexneri,0.95,def\n";
        let summary = parse_species_text(csv).unwrap();
        assert_eq!(summary.species, "Escherichia coli str. K-12, MG1655");
        assert!((summary.ani - 0.9912).abs() < 1e-12);
    }

    #[test]
    fn test_uncultured_prefix() {
        let csv = "name,ani\nGCA_9.1 uncultured Prevotella sp.,0.97\n";
        assert_eq!(parse_species_text(csv).unwrap().species, "Prevotella sp.");
    }

    #[test]
    fn test_no_matches() {
        assert!(matches!(
            parse_species_text("name,ani\n"),
            Err(AnnotationError::MissingInput(_))
        ));
    }

    #[test]
    fn test_missing_ani() {
        assert!(matches!(
            parse_species_text("name,ani\nGCF_1.1 Escherichia coli,\n"),
            Err(AnnotationError::MalformedRecord(_))
        ));
    }
}
