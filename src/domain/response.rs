use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A processor response, as returned by any [`PaymentProvider`](super::ports::PaymentProvider).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ProviderResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Transaction reference for charge operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

impl ProviderResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            params: BTreeMap::new(),
            authorization: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
