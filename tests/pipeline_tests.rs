//! End-to-end pipeline tests: header scan, record stream, counting, and
//! table assembly, plus smoke tests of the binary.

use std::collections::HashMap;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

use mapstats::core::stats::{LibraryStats, ReadProcessingCounts, StatsBundle};
use mapstats::counting::{count_stream, CountError};
use mapstats::parsing::sam::SamReader;
use mapstats::table::StatsTableBuilder;
use mapstats::Strand;

const SAM: &str = "@HD\tVN:1.0\n\
@SQ\tSN:chr1\tLN:1000\n\
read1\t0\tchr1\t10\t255\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII\tNM:i:0\tMD:Z:10\tNH:i:1\n\
read2\t16\tchr1\t50\t255\t8M\t*\t0\t0\tACGTACGT\tIIIIIIII\tNM:i:1\tMD:Z:8\tNH:i:2\n";

#[test]
fn end_to_end_counting_scenario() {
    let mut reader = SamReader::new(SAM.as_bytes());
    let catalog = reader.read_reference_catalog().unwrap();
    assert_eq!(catalog.length("chr1"), Some(1000));

    let records: Vec<_> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].strand, Strand::Forward);
    assert_eq!(records[1].strand, Strand::Reverse);

    let counters = count_stream(&catalog, records.into_iter().map(Ok)).unwrap();
    assert_eq!(counters.alignments["chr1"], 2);
    assert!((counters.mapped_reads["chr1"] - 1.5).abs() < f64::EPSILON);
}

#[test]
fn counting_unknown_reference_fails_without_partial_results() {
    let sam = SAM.replacen("read2\t16\tchr1", "read2\t16\tchrX", 1);
    let mut reader = SamReader::new(sam.as_bytes());
    let catalog = reader.read_reference_catalog().unwrap();

    let err = count_stream(&catalog, reader.records()).unwrap_err();
    assert!(matches!(err, CountError::UnknownReference { .. }));
}

fn read_processing(total: u64) -> ReadProcessingCounts {
    ReadProcessingCounts {
        total_no_of_reads: total,
        polya_removed: 0,
        single_a_removed: 0,
        unmodified: total,
        too_short: 0,
        long_enough: total,
    }
}

#[test]
fn counted_stream_flows_into_table() {
    // Count one library from a real stream and render it next to a second,
    // precomputed library.
    let mut reader = SamReader::new(SAM.as_bytes());
    let catalog = reader.read_reference_catalog().unwrap();
    let counters = count_stream(&catalog, reader.records()).unwrap();

    let stats_a = LibraryStats {
        totals: Default::default(),
        per_reference: counters.into_reference_stats(),
    };
    let stats_b = LibraryStats::default();

    let libraries = vec!["A".to_string(), "B".to_string()];
    let read_counts = HashMap::from([
        ("A".to_string(), read_processing(10)),
        ("B".to_string(), read_processing(20)),
    ]);
    let alignment_stats =
        HashMap::from([("A".to_string(), stats_a), ("B".to_string(), stats_b)]);

    let table = StatsTableBuilder::new(&libraries, &read_counts, &alignment_stats)
        .build()
        .unwrap();
    let tsv = table.to_tsv();

    assert!(tsv.contains("chr1 - No. of alignments\t2\t0\n"));
    assert!(tsv.contains("chr1 - No. of aligned reads\t1.5\t0\n"));
}

fn two_library_bundle() -> StatsBundle {
    let mut stats_a = LibraryStats::default();
    stats_a.totals.no_of_aligned_reads = 50.0;
    let mut stats_b = LibraryStats::default();
    stats_b.totals.no_of_aligned_reads = 150.0;

    StatsBundle {
        libraries: vec!["A".to_string(), "B".to_string()],
        read_processing: HashMap::from([
            ("A".to_string(), read_processing(100)),
            ("B".to_string(), read_processing(200)),
        ]),
        alignment_stats: HashMap::from([
            ("A".to_string(), stats_a),
            ("B".to_string(), stats_b),
        ]),
    }
}

#[test]
fn table_assembly_scenario() {
    let bundle = two_library_bundle();
    let table = StatsTableBuilder::new(
        &bundle.libraries,
        &bundle.read_processing,
        &bundle.alignment_stats,
    )
    .build()
    .unwrap();

    let tsv = table.to_tsv();
    assert!(tsv
        .contains("Percentage of aligned reads (compared to total input reads)\t50.00\t75.00\n"));
}

#[test]
fn cli_count_prints_per_reference_counts() {
    let mut sam_file = tempfile::NamedTempFile::new().unwrap();
    sam_file.write_all(SAM.as_bytes()).unwrap();

    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("count")
        .arg(sam_file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("chr1\t2\t1.5"));
}

#[test]
fn cli_count_reads_stdin() {
    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("count")
        .arg("-")
        .write_stdin(SAM)
        .assert()
        .success()
        .stdout(predicate::str::contains("chr1\t2\t1.5"));
}

#[test]
fn cli_count_fails_on_unknown_reference() {
    let sam = SAM.replacen("read2\t16\tchr1", "read2\t16\tchrX", 1);

    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("count")
        .arg("-")
        .write_stdin(sam)
        .assert()
        .failure()
        .stderr(predicate::str::contains("chrX"));
}

#[test]
fn cli_count_fails_on_malformed_record() {
    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("count")
        .arg("-")
        .write_stdin("@SQ\tSN:chr1\tLN:1000\nread1\t0\tchr1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 11 required"));
}

#[test]
fn cli_table_writes_tsv() {
    let bundle = two_library_bundle();
    let mut config = tempfile::NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut config, &bundle).unwrap();
    config.flush().unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("stats.tsv");

    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("table")
        .arg("--config")
        .arg(config.path())
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let tsv = std::fs::read_to_string(&out_path).unwrap();
    assert!(tsv.starts_with("Libraries\tA\tB\n"));
    assert!(tsv.ends_with('\n'));
}

#[test]
fn cli_table_fails_on_missing_library() {
    let mut bundle = two_library_bundle();
    bundle.read_processing.remove("B");

    let mut config = tempfile::NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut config, &bundle).unwrap();
    config.flush().unwrap();

    Command::cargo_bin("mapstats")
        .unwrap()
        .arg("table")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("B"));
}
