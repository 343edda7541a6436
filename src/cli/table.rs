use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::core::stats::StatsBundle;
use crate::table::StatsTableBuilder;

#[derive(Args)]
pub struct TableArgs {
    /// JSON stats bundle: library order, read-processing counters, and
    /// per-library alignment statistics
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output path for the TSV table (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the table subcommand.
///
/// # Errors
///
/// Fails when the bundle cannot be read or parsed, when a listed library is
/// missing from one of the counter maps, or on write errors.
pub fn run(args: &TableArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    let bundle: StatsBundle = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", args.config.display()))?;

    let table = StatsTableBuilder::new(
        &bundle.libraries,
        &bundle.read_processing,
        &bundle.alignment_stats,
    )
    .build()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            table.write_tsv(&mut BufWriter::new(file))?;
        }
        None => table.write_tsv(&mut io::stdout().lock())?,
    }
    Ok(())
}
