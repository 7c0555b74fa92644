use crate::domain::card::{ChargeSource, RawCard};
use crate::domain::money::MinorUnits;
use crate::domain::options::{ChargeOptions, GatewayOptions, StoreOptions};
use crate::domain::ports::PaymentProvider;
use crate::domain::response::ProviderResponse;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Test card number the sandbox always declines.
pub const DECLINED_CARD: &str = "4000000000000002";

/// A request the sandbox received.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProviderCall {
    Purchase {
        amount: MinorUnits,
        source: ChargeSource,
        options: ChargeOptions,
    },
    Authorize {
        amount: MinorUnits,
        source: ChargeSource,
        options: ChargeOptions,
    },
    Capture {
        amount: MinorUnits,
        authorization: String,
        options: GatewayOptions,
    },
    Refund {
        amount: MinorUnits,
        authorization: String,
        options: GatewayOptions,
    },
    Void {
        authorization: String,
        options: GatewayOptions,
    },
    Store {
        card: RawCard,
        options: StoreOptions,
    },
}

#[derive(Debug, Clone)]
struct Charge {
    amount: MinorUnits,
    captured: bool,
    refunded: MinorUnits,
    voided: bool,
}

#[derive(Debug, Default)]
struct SandboxState {
    next_id: u64,
    customers: BTreeMap<String, Vec<String>>,
    charges: BTreeMap<String, Charge>,
    calls: Vec<ProviderCall>,
}

impl SandboxState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", self.next_id)
    }

    fn known_card(&self, token: &str) -> bool {
        self.customers.values().any(|cards| cards.iter().any(|c| c == token))
    }

    fn charge(
        &mut self,
        amount: MinorUnits,
        source: &ChargeSource,
        options: &ChargeOptions,
        capture: bool,
    ) -> ProviderResponse {
        let declined = match source {
            ChargeSource::Card(card) if card.number == DECLINED_CARD => {
                Some("Your card was declined.".to_string())
            }
            ChargeSource::Token(token) if !self.known_card(token) => {
                Some(format!("No such card: {token}"))
            }
            ChargeSource::CustomerDefault => match &options.customer {
                Some(customer) if self.customers.contains_key(customer) => None,
                Some(customer) => Some(format!("No such customer: {customer}")),
                None => Some("Cannot charge a customer that has no active card".to_string()),
            },
            _ => None,
        };
        if let Some(message) = declined {
            return ProviderResponse::failure(message);
        }
        if amount.value() <= 0 {
            return ProviderResponse::failure("Invalid positive integer");
        }

        let id = self.next_id("ch");
        self.charges.insert(
            id.clone(),
            Charge {
                amount,
                captured: capture,
                refunded: MinorUnits(0),
                voided: false,
            },
        );
        ProviderResponse::success("Transaction approved")
            .with_param("id", id.clone())
            .with_param("amount", amount.to_string())
            .with_param("currency", options.currency.to_lowercase())
            .with_authorization(id)
    }
}

/// An in-process stand-in for the remote card processor.
///
/// Behaves like the real API for the calls the gateway makes: issues `cus_`, `card_`,
/// `ch_` and `re_` identifiers, tracks charge state, and declines [`DECLINED_CARD`].
/// Every request is recorded and can be read back with [`SandboxProvider::calls`].
///
/// `Clone` shares state, so a test can keep a handle after boxing one for the gateway.
#[derive(Default, Clone)]
pub struct SandboxProvider {
    state: Arc<Mutex<SandboxState>>,
}

impl SandboxProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer with one stored card, as if created earlier.
    pub async fn seed_customer(&self, customer_id: &str, card_id: &str) {
        let mut state = self.state.lock().await;
        state
            .customers
            .entry(customer_id.to_string())
            .or_default()
            .push(card_id.to_string());
    }

    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl PaymentProvider for SandboxProvider {
    async fn purchase(
        &self,
        amount: MinorUnits,
        source: &ChargeSource,
        options: &ChargeOptions,
    ) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Purchase {
            amount,
            source: source.clone(),
            options: options.clone(),
        });
        Ok(state.charge(amount, source, options, true))
    }

    async fn authorize(
        &self,
        amount: MinorUnits,
        source: &ChargeSource,
        options: &ChargeOptions,
    ) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Authorize {
            amount,
            source: source.clone(),
            options: options.clone(),
        });
        Ok(state.charge(amount, source, options, false))
    }

    async fn capture(
        &self,
        amount: MinorUnits,
        authorization: &str,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Capture {
            amount,
            authorization: authorization.to_string(),
            options: options.clone(),
        });

        let Some(charge) = state.charges.get_mut(authorization) else {
            return Ok(ProviderResponse::failure(format!("No such charge: {authorization}")));
        };
        if charge.captured || charge.voided {
            return Ok(ProviderResponse::failure(format!(
                "Charge {authorization} has already been captured or refunded."
            )));
        }
        if amount > charge.amount {
            return Ok(ProviderResponse::failure(
                "Amount to capture exceeds the authorized amount",
            ));
        }
        charge.captured = true;
        charge.amount = amount;
        Ok(ProviderResponse::success("Transaction approved")
            .with_param("id", authorization)
            .with_authorization(authorization))
    }

    async fn refund(
        &self,
        amount: MinorUnits,
        authorization: &str,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Refund {
            amount,
            authorization: authorization.to_string(),
            options: options.clone(),
        });

        let Some(charge) = state.charges.get(authorization).cloned() else {
            return Ok(ProviderResponse::failure(format!("No such charge: {authorization}")));
        };
        if !charge.captured || charge.voided {
            return Ok(ProviderResponse::failure(format!(
                "Charge {authorization} has not been captured"
            )));
        }
        if charge.refunded.value() + amount.value() > charge.amount.value() {
            return Ok(ProviderResponse::failure(
                "Refund amount is greater than the unrefunded amount on the charge",
            ));
        }

        let refund_id = state.next_id("re");
        if let Some(charge) = state.charges.get_mut(authorization) {
            charge.refunded = MinorUnits(charge.refunded.value() + amount.value());
        }
        Ok(ProviderResponse::success("Transaction approved")
            .with_param("id", refund_id.clone())
            .with_param("charge", authorization)
            .with_authorization(refund_id))
    }

    async fn void(
        &self,
        authorization: &str,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Void {
            authorization: authorization.to_string(),
            options: options.clone(),
        });

        let Some(charge) = state.charges.get_mut(authorization) else {
            return Ok(ProviderResponse::failure(format!("No such charge: {authorization}")));
        };
        if charge.voided || charge.refunded.value() > 0 {
            return Ok(ProviderResponse::failure(format!(
                "Charge {authorization} has already been refunded."
            )));
        }
        charge.voided = true;
        Ok(ProviderResponse::success("Transaction approved")
            .with_param("id", authorization)
            .with_authorization(authorization))
    }

    async fn store(&self, card: &RawCard, options: &StoreOptions) -> Result<ProviderResponse> {
        let mut state = self.state.lock().await;
        state.calls.push(ProviderCall::Store {
            card: card.clone(),
            options: options.clone(),
        });

        if card.number == DECLINED_CARD {
            return Ok(ProviderResponse::failure("Your card was declined."));
        }

        match &options.customer {
            Some(customer) => {
                if !state.customers.contains_key(customer) {
                    return Ok(ProviderResponse::failure(format!(
                        "No such customer: {customer}"
                    )));
                }
                let card_id = state.next_id("card");
                if let Some(cards) = state.customers.get_mut(customer) {
                    // set_default moves the new card to the front
                    if options.set_default == Some(true) {
                        cards.insert(0, card_id.clone());
                    } else {
                        cards.push(card_id.clone());
                    }
                }
                Ok(ProviderResponse::success("Transaction approved")
                    .with_param("id", card_id)
                    .with_param("customer", customer.clone())
                    .with_param("last4", card.last_digits()))
            }
            None => {
                let customer_id = state.next_id("cus");
                let card_id = state.next_id("card");
                state
                    .customers
                    .insert(customer_id.clone(), vec![card_id.clone()]);
                Ok(ProviderResponse::success("Transaction approved")
                    .with_param("id", customer_id)
                    .with_param("default_card", card_id)
                    .with_param("email", options.email.clone()))
            }
        }
    }
}
