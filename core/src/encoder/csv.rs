//! CSV encoder.

use std::io::Write;

use super::Encoder;
use crate::domain::NetFile;
use crate::error::Result;

const HEADER: [&str; 3] = ["command", "src", "dst"];

/// Writes a `command,src,dst` header followed by one row per connection.
///
/// A missing destination is an empty field.
pub struct CsvEncoder<W: Write> {
    writer: W,
}

impl<W: Write> CsvEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Encoder for CsvEncoder<W> {
    fn encode(&mut self, files: &[NetFile]) -> Result<()> {
        let mut wtr = ::csv::Writer::from_writer(&mut self.writer);
        wtr.write_record(HEADER)?;

        for file in files {
            let src = file.src.to_string();
            let dst = file.dst.as_ref().map(|d| d.to_string()).unwrap_or_default();
            wtr.write_record([file.command.as_str(), src.as_str(), dst.as_str()])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
