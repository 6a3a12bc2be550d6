//! Parser for the general annotator's GFF3 output.
//!
//! Comment and pragma lines (`#...`) are skipped. The annotation section ends
//! at a `##FASTA` pragma or the first FASTA header line (`>`); nothing after
//! it is read.

use std::path::Path;

use crate::core::error::AnnotationError;
use crate::core::feature::GeneralRecord;
use crate::parsing::read_input;

const GFF_COLUMNS: usize = 9;

/// Parse a GFF3 file into general annotation rows
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if the file does not exist, or the
/// errors of [`parse_gff_text`].
pub fn parse_gff_file(path: &Path) -> Result<Vec<GeneralRecord>, AnnotationError> {
    let content = read_input(path)?;
    parse_gff_text(&content)
}

/// Parse GFF3 text into general annotation rows
///
/// # Errors
///
/// Returns `AnnotationError::MalformedRecord` if a row has fewer than 9
/// columns or non-numeric coordinates.
pub fn parse_gff_text(text: &str) -> Result<Vec<GeneralRecord>, AnnotationError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('>') || line.trim_end() == "##FASTA" {
            break;
        }
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < GFF_COLUMNS {
            return Err(AnnotationError::MalformedRecord(format!(
                "GFF line {line_num} has {} fields, expected {GFF_COLUMNS}",
                fields.len()
            )));
        }

        let coordinate = |field: &str, what: &str| {
            field.trim().parse::<u64>().map_err(|_| {
                AnnotationError::MalformedRecord(format!(
                    "Invalid {what} on GFF line {line_num}: '{field}'"
                ))
            })
        };

        records.push(GeneralRecord {
            seqid: fields[0].to_string(),
            feature_type: fields[2].to_string(),
            start: coordinate(fields[3], "start")?,
            stop: coordinate(fields[4], "end")?,
            strand: fields[6].to_string(),
            attributes: fields[8].trim_end().to_string(),
        });
    }

    Ok(records)
}
