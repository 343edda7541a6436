//! Command-line interface for mapstats.
//!
//! - **count**: count alignments per reference sequence in one SAM stream
//! - **table**: assemble the multi-library read aligner statistics table
//!
//! ## Usage
//!
//! ```text
//! # Count a SAM file (gzipped inputs are decompressed transparently)
//! mapstats count library_a.sam.gz
//!
//! # Pipe header + records from a converter yourself
//! samtools view -h library_a.bam | mapstats count -
//!
//! # Or let mapstats drive the converter
//! mapstats count library_a.bam --converter samtools
//!
//! # Assemble the summary table from a JSON stats bundle
//! mapstats table --config stats.json -o read_aligner_stats.tsv
//! ```

use clap::{Parser, Subcommand};

pub mod count;
pub mod table;

#[derive(Parser)]
#[command(name = "mapstats")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Per-reference mapping statistics from SAM alignment streams")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count alignments per reference sequence in a SAM stream
    Count(count::CountArgs),

    /// Assemble the multi-library read aligner statistics table
    Table(table::TableArgs),
}
