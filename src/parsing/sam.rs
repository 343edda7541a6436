use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use flate2::read::GzDecoder;
use tracing::warn;

use crate::core::catalog::ReferenceCatalog;
use crate::core::record::{AlignmentRecord, Strand};
use crate::parsing::ParseError;

/// Header lines start with this marker
pub const HEADER_MARKER: char = '@';

/// Reference-sequence header lines start with this record type
pub const REFERENCE_HEADER: &str = "@SQ";

const MANDATORY_FIELDS: usize = 11;

/// A reader over one SAM text stream.
///
/// The header scan and the record stream share the same underlying reader:
/// scanning the header stops at the first non-header line without losing it
/// (the boundary line is stashed and re-injected into the record stream), so
/// both sides agree on where the header ends.
///
/// The stream is consumed exactly once, forward only. Re-iteration requires
/// reopening the source.
pub struct SamReader<B> {
    inner: B,
    /// Boundary line read past the header but not yet decoded, with its
    /// 1-based line number
    pending: Option<(u64, String)>,
    line: u64,
    current_line: u64,
}

impl SamReader<Box<dyn BufRead>> {
    /// Open a SAM file, transparently decompressing `.gz` inputs.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be opened.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");

        let reader: Box<dyn BufRead> = if gzipped {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self::new(reader))
    }
}

impl<B: BufRead> SamReader<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            pending: None,
            line: 0,
            current_line: 0,
        }
    }

    /// Next line with trailing newline stripped, honoring a re-injected
    /// boundary line. Updates `current_line` to the returned line's number.
    fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        if let Some((number, line)) = self.pending.take() {
            self.current_line = number;
            return Ok(Some(line));
        }

        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }

        self.line += 1;
        self.current_line = self.line;
        Ok(Some(buf))
    }

    /// Consume the leading header block and build the reference catalog.
    ///
    /// Stops at the first non-header line, which is not consumed: it remains
    /// visible to [`records`](Self::records). A stream with no `@SQ` lines
    /// yields an empty catalog, which is legal; every record will then fail
    /// validation downstream, the correct observable behavior for a
    /// catalog-less input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading the stream fails.
    pub fn read_reference_catalog(&mut self) -> Result<ReferenceCatalog, ParseError> {
        let mut catalog = ReferenceCatalog::new();

        while let Some(line) = self.next_line()? {
            if !line.starts_with(HEADER_MARKER) {
                self.pending = Some((self.current_line, line));
                break;
            }
            if !line.starts_with(REFERENCE_HEADER) {
                continue;
            }

            let mut name: Option<&str> = None;
            let mut length: Option<u64> = None;

            for field in line.split('\t').skip(1) {
                if let Some((tag, value)) = field.split_once(':') {
                    match tag {
                        "SN" => name = Some(value),
                        "LN" => {
                            length = value.parse().ok();
                            if length.is_none() {
                                warn!(value, "unparsable LN sub-field, length unknown");
                            }
                        }
                        _ => {}
                    }
                }
            }

            if let Some(name) = name {
                catalog.insert(name, length);
            } else {
                warn!(line = self.current_line, "@SQ header line without SN sub-field");
            }
        }

        Ok(catalog)
    }

    /// Lazy, single-pass stream of decoded alignment records.
    ///
    /// Header lines are filtered out transparently, so this works whether or
    /// not [`read_reference_catalog`](Self::read_reference_catalog) was
    /// called first.
    pub fn records(&mut self) -> Records<'_, B> {
        Records { reader: self }
    }
}

/// Iterator over decoded alignment records. See [`SamReader::records`].
pub struct Records<'a, B> {
    reader: &'a mut SamReader<B>,
}

impl<B: BufRead> Iterator for Records<'_, B> {
    type Item = Result<AlignmentRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.reader.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };
            if line.is_empty() || line.starts_with(HEADER_MARKER) {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            return Some(decode_record(&fields, self.reader.current_line));
        }
    }
}

/// Decode one tab-split alignment line.
///
/// # Errors
///
/// Returns `ParseError::TruncatedRecord` when fewer than 11 fields are
/// present, `ParseError::InvalidField` when a mandatory numeric field does
/// not parse, and `ParseError::InvalidHitCount` when the number-of-hits
/// field is present but its trailing segment is not a positive integer.
pub fn decode_record(fields: &[&str], line: u64) -> Result<AlignmentRecord, ParseError> {
    if fields.len() < MANDATORY_FIELDS {
        return Err(ParseError::TruncatedRecord {
            line,
            found: fields.len(),
        });
    }

    let flag: u16 = parse_field(fields[1], "flag", line)?;
    let start: u64 = parse_field(fields[3], "start position", line)?;
    let mapping_quality: u8 = parse_field(fields[4], "mapping quality", line)?;
    let mate_start: u64 = parse_field(fields[7], "mate start position", line)?;
    let template_length: i64 = parse_field(fields[8], "template length", line)?;

    let strand = Strand::from_flag(flag);
    if strand == Strand::Unknown {
        // Unexpected flags occur in real data (e.g. secondary alignments)
        // and must not halt batch processing; the record still counts.
        warn!(flag, line, "unknown alignment flag, no strand allocation");
    }

    let hit_count_field = fields.get(13).map(|s| (*s).to_string());
    let hit_count = match fields.get(13) {
        Some(raw) => decode_hit_count(raw, line)?,
        None => 1,
    };

    Ok(AlignmentRecord {
        query_id: fields[0].to_string(),
        flag,
        reference: fields[2].to_string(),
        start,
        mapping_quality,
        cigar: fields[5].to_string(),
        mate_reference: fields[6].to_string(),
        mate_start,
        template_length,
        sequence: fields[9].to_string(),
        quality: fields[10].to_string(),
        edit_distance: fields.get(11).map(|s| (*s).to_string()),
        mismatch_descriptor: fields.get(12).map(|s| (*s).to_string()),
        hit_count_field,
        hit_count,
        alt_alignments: fields.get(14).map(|s| (*s).to_string()),
        strand,
    })
}

fn parse_field<T: FromStr>(value: &str, field: &'static str, line: u64) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// The decoded hit count is everything after the final colon of the
/// `tag:type:value` field. Zero is rejected here so the weighted counter can
/// never divide by zero.
fn decode_hit_count(raw: &str, line: u64) -> Result<u32, ParseError> {
    let trailing = raw.rsplit(':').next().unwrap_or(raw);
    match trailing.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidHitCount {
            line,
            value: raw.to_string(),
        }),
    }
}
