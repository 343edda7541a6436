//! Multi-library read aligner statistics table.
//!
//! Combines the upstream read-processing counters and the per-library
//! alignment statistics into one printable table: a fixed block of global
//! rows, two percentage rows, then four rows per reference sequence.
//! Assembly is a pure fold over already-accumulated counters; the source
//! streams are never re-read.

use std::collections::HashMap;
use std::io::Write;
use thiserror::Error;

use crate::core::stats::{AlignmentTotals, LibraryStats, ReadProcessingCounts, ReferenceStats};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("no read processing counters supplied for library '{library}'")]
    MissingLibraryCounters { library: String },

    #[error("no alignment statistics supplied for library '{library}'")]
    MissingLibraryStats { library: String },

    #[error("failed to write table: {0}")]
    Io(#[from] std::io::Error),
}

/// `100 * numerator / denominator`, defined as 0.0 for a zero denominator.
#[must_use]
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_possible_truncation)]
fn round_count(value: f64) -> i64 {
    value.round() as i64
}

/// One table cell. The variants encode how the value is rendered: counts as
/// integers, percentages with two decimals, everything else as plain
/// decimal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(i64),
    Value(f64),
    Percent(f64),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// The assembled table: an ordered sequence of rows, one value per library
/// in the caller-supplied library order. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    pub rows: Vec<Row>,
}

impl StatsTable {
    /// Write the table as tab-separated values, label first, one line per
    /// row, final line terminated by a newline.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Io` if writing fails.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<(), TableError> {
        for row in &self.rows {
            write!(writer, "{}", row.label)?;
            for cell in &row.cells {
                write!(writer, "\t{cell}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_tsv(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Assembles a [`StatsTable`] from per-library inputs.
///
/// Libraries are rendered in the order given; every library must appear in
/// both counter maps. The reference row block takes its reference set from
/// the first library's stats, sorted by name.
pub struct StatsTableBuilder<'a> {
    libraries: &'a [String],
    read_processing: &'a HashMap<String, ReadProcessingCounts>,
    alignment_stats: &'a HashMap<String, LibraryStats>,
}

impl<'a> StatsTableBuilder<'a> {
    #[must_use]
    pub fn new(
        libraries: &'a [String],
        read_processing: &'a HashMap<String, ReadProcessingCounts>,
        alignment_stats: &'a HashMap<String, LibraryStats>,
    ) -> Self {
        Self {
            libraries,
            read_processing,
            alignment_stats,
        }
    }

    /// Assemble the table. Idempotent: identical inputs give an identical
    /// table.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingLibraryCounters` or
    /// `TableError::MissingLibraryStats` when a library in the list is
    /// absent from the corresponding map.
    pub fn build(&self) -> Result<StatsTable, TableError> {
        let mut rows = Vec::new();

        rows.push(Row {
            label: "Libraries".to_string(),
            cells: self
                .libraries
                .iter()
                .map(|lib| Cell::Text(lib.clone()))
                .collect(),
        });

        self.add_read_processing_rows(&mut rows)?;
        self.add_total_rows(&mut rows)?;
        self.add_percentage_rows(&mut rows)?;
        self.add_reference_rows(&mut rows)?;

        Ok(StatsTable { rows })
    }

    fn add_read_processing_rows(&self, rows: &mut Vec<Row>) -> Result<(), TableError> {
        let selectors: [(&str, fn(&ReadProcessingCounts) -> u64); 6] = [
            ("No. of input reads", |c| c.total_no_of_reads),
            ("No. of reads - PolyA detected and removed", |c| {
                c.polya_removed
            }),
            ("No. of reads - Single 3' A removed", |c| c.single_a_removed),
            ("No. of reads - Unmodified", |c| c.unmodified),
            ("No. of reads - Removed as too short", |c| c.too_short),
            ("No. of reads - Long enough and used for alignment", |c| {
                c.long_enough
            }),
        ];

        for (label, select) in selectors {
            let counts = self.read_counts(select)?;
            rows.push(Row {
                label: label.to_string(),
                cells: counts
                    .into_iter()
                    .map(|n| Cell::Count(i64::try_from(n).unwrap_or(i64::MAX)))
                    .collect(),
            });
        }
        Ok(())
    }

    fn add_total_rows(&self, rows: &mut Vec<Row>) -> Result<(), TableError> {
        let selectors: [(&str, fn(&AlignmentTotals) -> f64); 5] = [
            ("Total no. of aligned reads", |t| t.no_of_aligned_reads),
            ("Total no. of unaligned reads", |t| t.no_of_unaligned_reads),
            ("Total no. of uniquely aligned reads", |t| {
                t.no_of_uniquely_aligned_reads
            }),
            ("Total no. of alignments", |t| t.no_of_alignments),
            ("Total no. of split alignments", |t| t.no_of_split_alignments),
        ];

        for (label, select) in selectors {
            let totals = self.totals(select)?;
            rows.push(Row {
                label: label.to_string(),
                cells: totals.into_iter().map(|v| Cell::Count(round_count(v))).collect(),
            });
        }
        Ok(())
    }

    fn add_percentage_rows(&self, rows: &mut Vec<Row>) -> Result<(), TableError> {
        let aligned = self.totals(|t| t.no_of_aligned_reads)?;
        let unique = self.totals(|t| t.no_of_uniquely_aligned_reads)?;
        let input = self.read_counts(|c| c.total_no_of_reads)?;

        #[allow(clippy::cast_precision_loss)]
        let aligned_perc: Vec<Cell> = aligned
            .iter()
            .zip(&input)
            .map(|(reads, total)| Cell::Percent(round2(percentage(*reads, *total as f64))))
            .collect();
        rows.push(Row {
            label: "Percentage of aligned reads (compared to total input reads)".to_string(),
            cells: aligned_perc,
        });

        let unique_perc: Vec<Cell> = unique
            .iter()
            .zip(&aligned)
            .map(|(unique, aligned)| Cell::Percent(round2(percentage(*unique, *aligned))))
            .collect();
        rows.push(Row {
            label: "Percentage of uniquely aligned reads (in relation to all aligned reads)"
                .to_string(),
            cells: unique_perc,
        });
        Ok(())
    }

    fn add_reference_rows(&self, rows: &mut Vec<Row>) -> Result<(), TableError> {
        // The first library's reference set is authoritative for the row
        // block; libraries processed against the same catalog agree anyway.
        let Some(first) = self.libraries.first() else {
            return Ok(());
        };

        let mut ref_ids: Vec<&String> = self.stats(first)?.per_reference.keys().collect();
        ref_ids.sort_unstable();

        let selectors: [(&str, fn(&ReferenceStats) -> f64); 4] = [
            ("No. of aligned reads", |s| s.no_of_aligned_reads),
            ("No. of uniquely aligned reads", |s| {
                s.no_of_uniquely_aligned_reads
            }),
            ("No. of alignments", |s| s.no_of_alignments),
            ("No. of split alignments", |s| s.no_of_split_alignments),
        ];

        for ref_id in ref_ids {
            for (suffix, select) in selectors {
                let mut cells = Vec::with_capacity(self.libraries.len());
                for lib in self.libraries {
                    // A missing counter kind, or a reference a library never
                    // saw, counts as zero rather than erroring.
                    let value = self
                        .stats(lib)?
                        .per_reference
                        .get(ref_id.as_str())
                        .map_or(0.0, select);
                    cells.push(Cell::Value(value));
                }
                rows.push(Row {
                    label: format!("{ref_id} - {suffix}"),
                    cells,
                });
            }
        }
        Ok(())
    }

    fn read_counts(&self, select: fn(&ReadProcessingCounts) -> u64) -> Result<Vec<u64>, TableError> {
        self.libraries
            .iter()
            .map(|lib| {
                self.read_processing
                    .get(lib)
                    .map(select)
                    .ok_or_else(|| TableError::MissingLibraryCounters {
                        library: lib.clone(),
                    })
            })
            .collect()
    }

    fn totals(&self, select: fn(&AlignmentTotals) -> f64) -> Result<Vec<f64>, TableError> {
        self.libraries
            .iter()
            .map(|lib| self.stats(lib).map(|s| select(&s.totals)))
            .collect()
    }

    fn stats(&self, library: &str) -> Result<&LibraryStats, TableError> {
        self.alignment_stats
            .get(library)
            .ok_or_else(|| TableError::MissingLibraryStats {
                library: library.to_string(),
            })
    }
}
