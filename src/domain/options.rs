//! Option bags exchanged with the host and with the processor.
//!
//! The host hands the gateway a loose [`GatewayOptions`] map. Everything the gateway
//! itself sends is a typed struct so that field precedence is decided by construction
//! rather than by merge order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form options supplied by the host per call.
///
/// Only `order_id` is interpreted; other keys are carried through untouched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(transparent)]
pub struct GatewayOptions(BTreeMap<String, String>);

impl GatewayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.get("order_id")
    }
}

/// Options sent along with a purchase or authorize.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ChargeOptions {
    pub description: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// Billing address as the processor expects it.
///
/// The four street fields are always present on the wire, `null` when unknown.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct AddressOptions {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Options sent with a card store call.
///
/// `customer` is set only when the card is being attached to an existing customer,
/// and that is what decides how the response is read.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct StoreOptions {
    pub email: String,
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_default: Option<bool>,
}

impl StoreOptions {
    pub fn attaches_to_customer(&self) -> bool {
        self.customer.is_some()
    }
}
