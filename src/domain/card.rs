use serde::{Deserialize, Serialize};

/// Raw card data as entered by the shopper.
///
/// Only ever sent to the processor on first use; once a profile exists charges go
/// through the stored tokens instead.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct RawCard {
    pub number: String,
    pub month: u8,
    pub year: u16,
    pub name: String,
    #[serde(default)]
    pub verification_value: Option<String>,
}

impl RawCard {
    /// Last four digits, safe for logs.
    pub fn last_digits(&self) -> &str {
        let len = self.number.len();
        self.number.get(len.saturating_sub(4)..).unwrap_or_default()
    }
}

/// A stored credit card owned by the host application.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CreditCard {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub payment_method_id: u64,
    #[serde(default = "default_active")]
    pub active: bool,
    pub source: RawCard,
    /// Provider customer this card belongs to.
    #[serde(default)]
    pub gateway_customer_profile_id: Option<String>,
    /// Provider token for this specific card.
    #[serde(default)]
    pub gateway_payment_profile_id: Option<String>,
}

fn default_active() -> bool {
    true
}

impl CreditCard {
    pub fn new(id: u64, user_id: Option<u64>, payment_method_id: u64, source: RawCard) -> Self {
        Self {
            id,
            user_id,
            payment_method_id,
            active: true,
            source,
            gateway_customer_profile_id: None,
            gateway_payment_profile_id: None,
        }
    }

    pub fn has_profile(&self) -> bool {
        self.gateway_customer_profile_id.is_some()
    }
}

/// What a charge call carries in place of a card.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ChargeSource {
    /// Raw card data, for cards without a stored profile.
    Card(RawCard),
    /// A stored payment profile.
    Token(String),
    /// No specific card: the provider charges the customer's default card.
    CustomerDefault,
}

impl ChargeSource {
    /// Picks the source for a charge against `card`.
    pub fn for_card(card: &CreditCard) -> Self {
        match (&card.gateway_payment_profile_id, &card.gateway_customer_profile_id) {
            (Some(token), _) => Self::Token(token.clone()),
            (None, Some(_)) => Self::CustomerDefault,
            (None, None) => Self::Card(card.source.clone()),
        }
    }
}
