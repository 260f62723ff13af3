//! JSON encoder.

use std::io::Write;

use super::Encoder;
use crate::domain::NetFile;
use crate::error::Result;

/// Writes the list as a pretty-printed JSON array.
pub struct JsonEncoder<W: Write> {
    writer: W,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Encoder for JsonEncoder<W> {
    fn encode(&mut self, files: &[NetFile]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, files)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
