use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDBError(#[from] rocksdb::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Payment {0} has no transaction reference")]
    MissingTransactionReference(u64),
    #[error("Provider response is missing the '{0}' parameter")]
    MissingResponseParam(&'static str),
    #[error("Credit card {0} not found")]
    CardNotFound(u64),
    #[error("Credit card {0} already has a customer profile")]
    ProfileConflict(u64),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
