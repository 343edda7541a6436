//! Parsers for SAM alignment streams.
//!
//! The decoder deliberately does not target the full SAM specification: the
//! supported dialect is the output of the segemehl-style aligner this
//! pipeline runs, which places its extension fields (edit distance, mismatch
//! descriptor, number of hits, alternate alignments) at fixed positions
//! after the eleven mandatory columns.

use thiserror::Error;

pub mod sam;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: alignment record has {found} fields, at least 11 required")]
    TruncatedRecord { line: u64, found: usize },

    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: invalid number-of-hits field '{value}'")]
    InvalidHitCount { line: u64, value: String },
}
