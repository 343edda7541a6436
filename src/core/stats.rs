use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-preprocessing counters for one library, supplied by the upstream
/// trimming stage.
///
/// Every counter is mandatory: a bundle missing one of these keys fails to
/// deserialize, which is the right time to find out the upstream stage and
/// this tool disagree about the counter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadProcessingCounts {
    pub total_no_of_reads: u64,
    pub polya_removed: u64,
    pub single_a_removed: u64,
    pub unmodified: u64,
    pub too_short: u64,
    pub long_enough: u64,
}

/// Library-wide alignment totals.
///
/// Values are real numbers because multiplicity-weighted read estimates are
/// fractional; display rounding happens in the table builder. Missing counter
/// kinds default to zero, so libraries need not report every one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentTotals {
    #[serde(default)]
    pub no_of_aligned_reads: f64,
    #[serde(default)]
    pub no_of_unaligned_reads: f64,
    #[serde(default)]
    pub no_of_uniquely_aligned_reads: f64,
    #[serde(default)]
    pub no_of_alignments: f64,
    #[serde(default)]
    pub no_of_split_alignments: f64,
}

/// Alignment counters for one reference sequence within one library.
/// Missing counter kinds default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStats {
    #[serde(default)]
    pub no_of_aligned_reads: f64,
    #[serde(default)]
    pub no_of_uniquely_aligned_reads: f64,
    #[serde(default)]
    pub no_of_alignments: f64,
    #[serde(default)]
    pub no_of_split_alignments: f64,
}

/// Alignment statistics for one library: library-wide totals plus
/// per-reference breakdowns. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    #[serde(default)]
    pub totals: AlignmentTotals,
    #[serde(default)]
    pub per_reference: HashMap<String, ReferenceStats>,
}

/// The full input document for table assembly: the library order, the
/// upstream read-processing counters, and the per-library alignment stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBundle {
    pub libraries: Vec<String>,
    pub read_processing: HashMap<String, ReadProcessingCounts>,
    pub alignment_stats: HashMap<String, LibraryStats>,
}
