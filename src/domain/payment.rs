use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment record owned by the host.
///
/// The gateway reads `amount` and `response_code`, and writes `gateway_error` when
/// profile creation is rejected by the processor.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: u64,
    pub order_id: u64,
    pub payment_method_id: u64,
    pub source_id: u64,
    /// Major units, as the host stores it.
    pub amount: Decimal,
    /// Transaction reference of the authorize/purchase this payment went through.
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub gateway_error: Option<String>,
}

impl Payment {
    pub fn gateway_error(&mut self, message: impl Into<String>) {
        self.gateway_error = Some(message.into());
    }
}
