use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::converter::{converter_stream, wait_converter};
use crate::counting::{count_stream, PerReferenceCounters};
use crate::parsing::sam::SamReader;

#[derive(Args)]
pub struct CountArgs {
    /// Input SAM file; use '-' for stdin. '.gz' inputs are decompressed.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Convert the input with this binary-alignment converter (run as
    /// '<converter> view -h <input>') instead of reading it as text
    #[arg(long)]
    pub converter: Option<String>,
}

/// Run the count subcommand.
///
/// # Errors
///
/// Fails on IO errors, malformed records, records referencing sequences
/// absent from the header catalog, and nonzero converter exits.
pub fn run(args: &CountArgs) -> anyhow::Result<()> {
    let counters = if let Some(converter) = &args.converter {
        let (child, stdout) = converter_stream(converter, &args.input)
            .with_context(|| format!("failed to run converter '{converter}'"))?;
        let counters = count_sam(SamReader::new(stdout))?;
        wait_converter(child)?;
        counters
    } else if args.input == Path::new("-") {
        count_sam(SamReader::new(io::stdin().lock()))?
    } else {
        let reader = SamReader::from_path(&args.input)
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        count_sam(reader)?
    };

    write_counters(&counters, &mut io::stdout().lock())?;
    Ok(())
}

fn count_sam<B: BufRead>(mut reader: SamReader<B>) -> anyhow::Result<PerReferenceCounters> {
    let catalog = reader.read_reference_catalog()?;
    let counters = count_stream(&catalog, reader.records())?;
    Ok(counters)
}

fn write_counters<W: Write>(counters: &PerReferenceCounters, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "reference\tno_of_alignments\tno_of_aligned_reads")?;

    let mut names: Vec<&String> = counters.alignments.keys().collect();
    names.sort_unstable();

    for name in names {
        let alignments = counters.alignments.get(name).copied().unwrap_or(0);
        let reads = counters.mapped_reads.get(name).copied().unwrap_or(0.0);
        writeln!(writer, "{name}\t{alignments}\t{reads}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_write_counters_sorted() {
        let counters = PerReferenceCounters {
            alignments: HashMap::from([("chr2".to_string(), 1), ("chr1".to_string(), 2)]),
            mapped_reads: HashMap::from([("chr2".to_string(), 0.5), ("chr1".to_string(), 2.0)]),
        };

        let mut out = Vec::new();
        write_counters(&counters, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "reference\tno_of_alignments\tno_of_aligned_reads\nchr1\t2\t2\nchr2\t1\t0.5\n"
        );
    }
}
