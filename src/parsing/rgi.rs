//! Parser for the resistance annotator's tab-separated report.
//!
//! Columns used: `Contig`, `Start`, `Stop`, `Orientation`, `Cut_Off`,
//! `Model_type`, `ARO`, `SNPs_in_Best_Hit_ARO` and `Other_SNPs`. All other
//! columns are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::AnnotationError;
use crate::core::feature::ResistanceRow;
use crate::core::types::{CutOff, Strand};
use crate::parsing::read_input;

/// Separator between entries of a variant list
const VARIANT_SEPARATOR: &str = ", ";

#[derive(Debug, Deserialize)]
struct RgiRow {
    #[serde(rename = "Contig")]
    contig: String,
    #[serde(rename = "Start")]
    start: u64,
    #[serde(rename = "Stop")]
    stop: u64,
    #[serde(rename = "Orientation")]
    orientation: String,
    #[serde(rename = "Cut_Off")]
    cut_off: String,
    #[serde(rename = "Model_type")]
    model_type: String,
    #[serde(rename = "ARO")]
    aro: String,
    #[serde(rename = "SNPs_in_Best_Hit_ARO", default)]
    best_hit_snps: String,
    #[serde(rename = "Other_SNPs", default)]
    other_snps: String,
}

impl RgiRow {
    fn into_resistance_row(self, line_num: u64) -> Result<ResistanceRow, AnnotationError> {
        let strand = Strand::parse(&self.orientation).ok_or_else(|| {
            AnnotationError::MalformedRecord(format!(
                "Invalid orientation on resistance line {line_num}: '{}'",
                self.orientation
            ))
        })?;
        let cut_off = CutOff::parse(&self.cut_off).ok_or_else(|| {
            AnnotationError::MalformedRecord(format!(
                "Invalid cut-off on resistance line {line_num}: '{}'",
                self.cut_off
            ))
        })?;

        Ok(ResistanceRow {
            contig: self.contig,
            start: self.start,
            stop: self.stop,
            strand,
            model_type: self.model_type,
            accession: self.aro.trim().to_string(),
            best_hit_variants: split_variants(&self.best_hit_snps),
            other_variants: split_variants(&self.other_snps),
            cut_off,
        })
    }
}

fn split_variants(field: &str) -> Vec<String> {
    field
        .split(VARIANT_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse a resistance report file
///
/// # Errors
///
/// Returns `AnnotationError::MissingInput` if the file does not exist, or the
/// errors of [`parse_rgi_text`].
pub fn parse_rgi_file(path: &Path) -> Result<Vec<ResistanceRow>, AnnotationError> {
    let content = read_input(path)?;
    parse_rgi_text(&content)
}

/// Parse resistance report text. Rows of every cut-off tier are returned;
/// filtering happens during resolution.
///
/// # Errors
///
/// Returns `AnnotationError::MalformedRecord` for rows with missing columns,
/// non-numeric coordinates, or unknown orientation or cut-off values.
pub fn parse_rgi_text(text: &str) -> Result<Vec<ResistanceRow>, AnnotationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line_num = record.position().map_or(0, csv::Position::line);
        let row: RgiRow = record.deserialize(Some(&headers)).map_err(|e| {
            AnnotationError::MalformedRecord(format!("Invalid resistance line {line_num}: {e}"))
        })?;
        rows.push(row.into_resistance_row(line_num)?);
    }

    Ok(rows)
}
