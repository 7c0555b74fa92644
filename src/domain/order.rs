use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct Address {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    /// Country name, not ISO code.
    #[serde(default)]
    pub country: Option<String>,
    /// State or region name.
    #[serde(default)]
    pub state: Option<String>,
}

/// The order a payment belongs to. Read-only for the gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Order {
    pub id: u64,
    pub number: String,
    pub email: String,
    /// `None` for guest checkouts.
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub bill_address: Option<Address>,
}
