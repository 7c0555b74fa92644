use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Outcome of one operation, as printed by the binary.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct OperationResult {
    pub op: String,
    pub payment: u64,
    pub success: bool,
    pub reference: Option<String>,
    pub message: String,
}

/// Writes operation results as CSV.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(&mut self, result: &OperationResult) -> Result<()> {
        self.writer.serialize(result)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
