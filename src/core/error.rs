use thiserror::Error;

/// Failures that abort the processing of a single genome.
///
/// None of these are retried: inputs are already materialized, so every
/// failure is a property of the data rather than a transient condition.
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Degenerate overlap: zero-length features on contig '{contig}' at {start}")]
    DegenerateOverlap { contig: String, start: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tabular input: {0}")]
    Csv(#[from] csv::Error),
}
