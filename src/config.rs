use crate::error::{GatewayError, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Gateway settings, fixed once the gateway is built.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct GatewayConfig {
    /// Secret API key for the processor.
    pub login: String,
    /// Currency every charge is made in. Not validated against what the processor accepts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl GatewayConfig {
    pub fn new(login: impl Into<String>) -> Result<Self> {
        Self {
            login: login.into(),
            currency: default_currency(),
        }
        .validated()
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Reads a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.login.trim().is_empty() {
            return Err(GatewayError::ConfigError("login must not be empty".to_string()));
        }
        Ok(self)
    }
}
