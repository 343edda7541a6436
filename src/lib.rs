//! # mapstats
//!
//! A library for computing per-reference mapping statistics from SAM-format
//! alignment streams.
//!
//! The input dialect is the output of a segemehl-style short-read aligner:
//! tab-delimited records with the eleven mandatory SAM columns followed by
//! extension fields at fixed positions, including a `NH:i:N`-shaped
//! number-of-hits field. Counting is multiplicity-weighted: a read aligning
//! to N places contributes 1/N to each reference, so unique-mapping totals
//! stay consistent in the presence of multi-mappers.
//!
//! Streams are consumed once, forward only, in constant memory; alignment
//! files can be arbitrarily large.
//!
//! ## Example
//!
//! ```rust
//! use mapstats::counting::count_stream;
//! use mapstats::parsing::sam::SamReader;
//!
//! let sam = b"@SQ\tSN:chr1\tLN:1000\n\
//! read1\t0\tchr1\t10\t255\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII\tNM:i:0\tMD:Z:10\tNH:i:2\n";
//!
//! let mut reader = SamReader::new(&sam[..]);
//! let catalog = reader.read_reference_catalog().unwrap();
//! let counters = count_stream(&catalog, reader.records()).unwrap();
//!
//! assert_eq!(counters.alignments["chr1"], 1);
//! assert!((counters.mapped_reads["chr1"] - 0.5).abs() < f64::EPSILON);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: alignment records, reference catalogs, and stats bundles
//! - [`parsing`]: the SAM header scanner, record stream, and decoder
//! - [`counting`]: the per-reference mapping counter
//! - [`table`]: the multi-library statistics table builder
//! - [`converter`]: the external binary-to-text converter collaborator
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod converter;
pub mod core;
pub mod counting;
pub mod parsing;
pub mod table;

// Re-export commonly used types for convenience
pub use crate::core::catalog::ReferenceCatalog;
pub use crate::core::record::{AlignmentRecord, Strand};
pub use crate::core::stats::{LibraryStats, ReadProcessingCounts, StatsBundle};
pub use crate::counting::{count_stream, MappingCounter, PerReferenceCounters};
pub use crate::parsing::sam::SamReader;
pub use crate::table::{StatsTable, StatsTableBuilder};
