//! External binary-to-text alignment converter collaborator.
//!
//! The parser core only ever consumes an already-open text stream; producing
//! that stream from a binary alignment container is this module's job. The
//! converter binary (e.g. `samtools`) is run in "header + records" mode and
//! its stdout handed back as a buffered reader. Exit-status checking is the
//! caller's responsibility; [`wait_converter`] is provided for callers that
//! want a nonzero exit surfaced as an error.

use std::io::{self, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::debug;

/// Spawn the converter over a binary alignment file and return the child
/// process together with its buffered stdout.
///
/// # Errors
///
/// Returns an IO error if the converter cannot be spawned or its stdout
/// cannot be captured.
pub fn converter_stream(
    converter: &str,
    path: &Path,
) -> io::Result<(Child, BufReader<ChildStdout>)> {
    debug!(converter, path = %path.display(), "spawning alignment converter");

    let mut child = Command::new(converter)
        .arg("view")
        .arg("-h")
        .arg(path)
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().ok_or_else(|| {
        io::Error::new(io::ErrorKind::BrokenPipe, "converter stdout not captured")
    })?;

    Ok((child, BufReader::new(stdout)))
}

/// Wait for a spawned converter and fail on a nonzero exit status.
///
/// # Errors
///
/// Returns an IO error if waiting fails or the converter exited nonzero.
pub fn wait_converter(mut child: Child) -> io::Result<()> {
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "alignment converter exited with {status}"
        )))
    }
}
