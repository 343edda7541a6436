//! Mapping-count aggregation.
//!
//! Counts a record stream against a known reference catalog, producing a raw
//! alignment count and a multiplicity-weighted mapped-read estimate per
//! reference. A read aligning to N places contributes 1/N to each, so
//! uniqueness-sensitive totals stay consistent across multi-mappers.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::catalog::ReferenceCatalog;
use crate::core::record::AlignmentRecord;
use crate::core::stats::ReferenceStats;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum CountError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("alignment references unknown sequence '{name}'")]
    UnknownReference { name: String },
}

/// Per-reference counters for one library: raw alignment counts and
/// multiplicity-weighted mapped-read estimates.
///
/// Both maps hold exactly the catalog's keys, zero-initialized at creation
/// and never grown afterwards; an alignment to an unknown reference is an
/// error, not a silent new entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerReferenceCounters {
    pub alignments: HashMap<String, u64>,
    pub mapped_reads: HashMap<String, f64>,
}

impl PerReferenceCounters {
    /// Fold the counters into the per-reference stats shape the table
    /// builder consumes. Counter kinds this stage does not measure
    /// (uniquely aligned reads, split alignments) are left at zero.
    #[must_use]
    pub fn into_reference_stats(self) -> HashMap<String, ReferenceStats> {
        let mut stats: HashMap<String, ReferenceStats> = HashMap::new();
        for (name, count) in self.alignments {
            #[allow(clippy::cast_precision_loss)]
            let alignments = count as f64;
            stats.entry(name).or_default().no_of_alignments = alignments;
        }
        for (name, reads) in self.mapped_reads {
            stats.entry(name).or_default().no_of_aligned_reads = reads;
        }
        stats
    }
}

/// Accumulates counts for one record stream.
///
/// Owns two fixed-key counter maps initialized from the catalog up front;
/// no dynamic key insertion happens during counting, so a catalog/record
/// mismatch surfaces as [`CountError::UnknownReference`] instead of being
/// masked by an opportunistically created entry.
#[derive(Debug)]
pub struct MappingCounter {
    counters: PerReferenceCounters,
}

impl MappingCounter {
    #[must_use]
    pub fn new(catalog: &ReferenceCatalog) -> Self {
        let mut counters = PerReferenceCounters::default();
        for name in catalog.names() {
            counters.alignments.insert(name.to_string(), 0);
            counters.mapped_reads.insert(name.to_string(), 0.0);
        }
        Self { counters }
    }

    /// Fold one record into the counters.
    ///
    /// # Errors
    ///
    /// Returns `CountError::UnknownReference` when the record's reference is
    /// not in the catalog this counter was created from.
    pub fn observe(&mut self, record: &AlignmentRecord) -> Result<(), CountError> {
        let Some(alignments) = self.counters.alignments.get_mut(&record.reference) else {
            return Err(CountError::UnknownReference {
                name: record.reference.clone(),
            });
        };
        *alignments += 1;

        if let Some(mapped) = self.counters.mapped_reads.get_mut(&record.reference) {
            *mapped += record.read_fraction();
        }
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> PerReferenceCounters {
        self.counters
    }
}

/// Drive a record stream to completion against a catalog.
///
/// A single unresolved reference indicates a catalog/record mismatch that
/// invalidates the whole run, so the first error aborts aggregation and the
/// partial counters are discarded rather than returned as misleading zeros.
///
/// # Errors
///
/// Returns `CountError::Parse` for decode failures and
/// `CountError::UnknownReference` for catalog misses.
pub fn count_stream(
    catalog: &ReferenceCatalog,
    records: impl IntoIterator<Item = Result<AlignmentRecord, ParseError>>,
) -> Result<PerReferenceCounters, CountError> {
    let mut counter = MappingCounter::new(catalog);
    for record in records {
        counter.observe(&record?)?;
    }
    Ok(counter.finish())
}
