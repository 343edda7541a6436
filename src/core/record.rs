/// Strand a read aligns to, derived from the alignment flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    /// Flag value carried neither 0 nor 16; strand cannot be allocated
    Unknown,
}

impl Strand {
    /// Derive the strand from a raw alignment flag.
    ///
    /// Only the two flag values emitted by the supported aligner for
    /// single-end reads map to a strand; anything else (e.g. secondary
    /// alignments) is `Unknown`.
    #[must_use]
    pub fn from_flag(flag: u16) -> Self {
        match flag {
            0 => Self::Forward,
            16 => Self::Reverse,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
            Self::Unknown => write!(f, "."),
        }
    }
}

/// One parsed alignment line.
///
/// Constructed once by the decoder and immutable afterwards. Records are
/// folded into counters and dropped; they are never retained in bulk, so
/// arbitrarily large inputs stream in constant memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    /// Query (read) identifier
    pub query_id: String,

    /// Raw alignment flag
    pub flag: u16,

    /// Reference sequence name; must belong to the stream's catalog
    /// once validated by the counter
    pub reference: String,

    /// 1-based start position on the reference
    pub start: u64,

    /// Mapping quality
    pub mapping_quality: u8,

    /// CIGAR string, passed through opaquely
    pub cigar: String,

    /// Reference name of the mate/next fragment, passed through
    pub mate_reference: String,

    /// 1-based start position of the mate
    pub mate_start: u64,

    /// Observed template length
    pub template_length: i64,

    /// Read sequence
    pub sequence: String,

    /// Per-base quality string
    pub quality: String,

    /// Edit distance field (e.g. `NM:i:0`), when present
    pub edit_distance: Option<String>,

    /// Mismatch descriptor field (e.g. `MD:Z:10`), when present
    pub mismatch_descriptor: Option<String>,

    /// Raw number-of-hits field (e.g. `NH:i:3`), when present
    pub hit_count_field: Option<String>,

    /// Decoded number of equally good mapping locations for this read.
    /// Defaults to 1 when the raw field is absent; never 0.
    pub hit_count: u32,

    /// Alternate-alignment annotation (15th field); absence is not an error
    pub alt_alignments: Option<String>,

    /// Strand derived from the flag
    pub strand: Strand,
}

impl AlignmentRecord {
    /// 1-based end position, derived from the start and the read length.
    #[must_use]
    pub fn end(&self) -> u64 {
        (self.start + self.sequence.len() as u64).saturating_sub(1)
    }

    /// The fraction this record contributes to a read-count estimate:
    /// a read aligning to N places contributes 1/N to each.
    #[must_use]
    pub fn read_fraction(&self) -> f64 {
        1.0 / f64::from(self.hit_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: u64, sequence: &str) -> AlignmentRecord {
        AlignmentRecord {
            query_id: "read1".to_string(),
            flag: 0,
            reference: "chr1".to_string(),
            start,
            mapping_quality: 255,
            cigar: "10M".to_string(),
            mate_reference: "*".to_string(),
            mate_start: 0,
            template_length: 0,
            sequence: sequence.to_string(),
            quality: "I".repeat(sequence.len()),
            edit_distance: None,
            mismatch_descriptor: None,
            hit_count_field: None,
            hit_count: 1,
            alt_alignments: None,
            strand: Strand::Forward,
        }
    }

    #[test]
    fn test_strand_from_flag() {
        assert_eq!(Strand::from_flag(0), Strand::Forward);
        assert_eq!(Strand::from_flag(16), Strand::Reverse);
        assert_eq!(Strand::from_flag(4), Strand::Unknown);
        assert_eq!(Strand::from_flag(256), Strand::Unknown);
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
        assert_eq!(Strand::Unknown.to_string(), ".");
    }

    #[test]
    fn test_end_position() {
        assert_eq!(record(10, "ACGTACGTAC").end(), 19);
        assert_eq!(record(1, "A").end(), 1);
    }

    #[test]
    fn test_read_fraction() {
        let mut r = record(1, "ACGT");
        assert!((r.read_fraction() - 1.0).abs() < f64::EPSILON);
        r.hit_count = 4;
        assert!((r.read_fraction() - 0.25).abs() < f64::EPSILON);
    }
}
