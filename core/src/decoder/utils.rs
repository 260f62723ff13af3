//! Tokenizing helpers shared by the decoders.

use std::io::BufRead;

use crate::error::{Error, Result};

/// Split `line` on `sep`, dropping empty fields.
///
/// Repeated separators collapse, so column-aligned output splits cleanly.
/// Fails when fewer than `min` fields remain.
pub fn chunk_line<'a>(line: &'a str, sep: &str, min: usize) -> Result<Vec<&'a str>> {
    let chunks: Vec<&str> = line.split(sep).filter(|c| !c.is_empty()).collect();
    check_min(line, chunks, min)
}

/// Like [`chunk_line`], splitting on any run of whitespace.
pub fn chunk_fields(line: &str, min: usize) -> Result<Vec<&str>> {
    let chunks: Vec<&str> = line.split_whitespace().collect();
    check_min(line, chunks, min)
}

fn check_min<'a>(line: &str, chunks: Vec<&'a str>, min: usize) -> Result<Vec<&'a str>> {
    if chunks.len() < min {
        return Err(Error::MalformedLine {
            expected: min,
            found: chunks.len(),
            line: line.to_string(),
        });
    }
    Ok(chunks)
}

/// Feed every line of `reader` to `f`, without its terminator.
///
/// Invalid UTF-8 is replaced, not rejected. Stops at the first error
/// returned by `f` or by the reader.
pub fn scan_lines<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(|c| c == '\r' || c == '\n'))?;
    }
}
