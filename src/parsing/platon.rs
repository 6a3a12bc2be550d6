//! Parser for the plasmid caller's TSV report. Only the `ID` column is read.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::AnnotationError;
use crate::core::genome::PlasmidContigs;
use crate::parsing::read_input;

#[derive(Debug, Deserialize)]
struct PlatonRow {
    #[serde(rename = "ID")]
    id: String,
}

/// Parse a plasmid report file into the set of plasmid contigs
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if the file does not exist, or the
/// errors of [`parse_platon_text`].
pub fn parse_platon_file(path: &Path) -> Result<PlasmidContigs, AnnotationError> {
    let content = read_input(path)?;
    parse_platon_text(&content)
}

/// Parse plasmid report text. A header-only report means no plasmids.
///
/// # Errors
///
/// Returns `AnnotationError::MalformedRecord` if a row lacks the `ID` column.
pub fn parse_platon_text(text: &str) -> Result<PlasmidContigs, AnnotationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut plasmids = PlasmidContigs::new();
    for row in reader.deserialize::<PlatonRow>() {
        let row = row.map_err(|e| {
            AnnotationError::MalformedRecord(format!("Invalid plasmid report row: {e}"))
        })?;
        plasmids.insert(row.id);
    }

    Ok(plasmids)
}
