use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Purchase,
    Authorize,
    Capture,
    Credit,
    Void,
    CreateProfile,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Purchase => "purchase",
            Self::Authorize => "authorize",
            Self::Capture => "capture",
            Self::Credit => "credit",
            Self::Void => "void",
            Self::CreateProfile => "create_profile",
        };
        f.write_str(name)
    }
}

/// One requested gateway operation against a seeded payment.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub op: OperationKind,
    pub payment: u64,
    /// Major units for purchase/authorize, minor units for credit.
    pub amount: Option<Decimal>,
}

/// Reads operations from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and accepting short rows.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(GatewayError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "op, payment, amount\nauthorize, 1, 19.99\ncapture, 1,\ncreate_profile, 2";
        let reader = OperationReader::new(data.as_bytes());
        let results: Vec<Result<Operation>> = reader.operations().collect();

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.op, OperationKind::Authorize);
        assert_eq!(first.amount, Some(dec!(19.99)));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.op, OperationKind::Capture);
        assert!(second.amount.is_none());

        let third = results[2].as_ref().unwrap();
        assert_eq!(third.op, OperationKind::CreateProfile);
        assert_eq!(third.payment, 2);
    }

    #[test]
    fn test_reader_unknown_operation() {
        let data = "op, payment, amount\nchargeback, 1, 1.0";
        let reader = OperationReader::new(data.as_bytes());
        let results: Vec<Result<Operation>> = reader.operations().collect();

        assert!(matches!(results[0], Err(GatewayError::CsvError(_))));
    }

    #[test]
    fn test_display_matches_csv_name() {
        assert_eq!(OperationKind::CreateProfile.to_string(), "create_profile");
        assert_eq!(OperationKind::Void.to_string(), "void");
    }
}
