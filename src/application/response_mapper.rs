use crate::domain::options::StoreOptions;
use crate::domain::response::ProviderResponse;
use crate::error::{GatewayError, Result};
use serde::Serialize;

/// Identifiers produced by a successful store call.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProfileCreationOutcome {
    /// A new customer was created with the card as its default.
    NewCustomer {
        customer_id: String,
        card_id: Option<String>,
    },
    /// The card was added to a customer that already existed.
    AttachedCard {
        customer_id: String,
        card_id: Option<String>,
    },
}

impl ProfileCreationOutcome {
    pub fn customer_id(&self) -> &str {
        match self {
            Self::NewCustomer { customer_id, .. } | Self::AttachedCard { customer_id, .. } => {
                customer_id
            }
        }
    }

    /// Card token, when the processor returned one. Without it the card is charged
    /// through the customer's default card.
    pub fn card_id(&self) -> Option<&str> {
        match self {
            Self::NewCustomer { card_id, .. } | Self::AttachedCard { card_id, .. } => {
                card_id.as_deref()
            }
        }
    }
}

/// How a store response reads.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StoreResponse {
    Stored(ProfileCreationOutcome),
    Rejected(String),
}

pub struct ResponseMapper;

impl ResponseMapper {
    /// Reads a store response according to what was asked for.
    ///
    /// The processor answers "create customer" with the customer object (`id`,
    /// `default_card`) and "add card" with the card object (`customer`, `id`), so the
    /// request shape picks the branch. Only the customer id is required: the customer
    /// already exists remotely by now, so it is kept even without a card token.
    pub fn map_store(response: &ProviderResponse, request: &StoreOptions) -> Result<StoreResponse> {
        if !response.success {
            return Ok(StoreResponse::Rejected(response.message.clone()));
        }

        let outcome = if request.attaches_to_customer() {
            ProfileCreationOutcome::AttachedCard {
                customer_id: required(response, "customer")?,
                card_id: optional(response, "id"),
            }
        } else {
            ProfileCreationOutcome::NewCustomer {
                customer_id: required(response, "id")?,
                card_id: optional(response, "default_card"),
            }
        };
        Ok(StoreResponse::Stored(outcome))
    }

    /// Transaction reference of an approved charge.
    pub fn transaction_reference(response: &ProviderResponse) -> Option<&str> {
        if response.success {
            response.authorization.as_deref()
        } else {
            None
        }
    }
}

fn required(response: &ProviderResponse, key: &'static str) -> Result<String> {
    response
        .param(key)
        .map(str::to_string)
        .ok_or(GatewayError::MissingResponseParam(key))
}

fn optional(response: &ProviderResponse, key: &str) -> Option<String> {
    response.param(key).map(str::to_string)
}
