#![allow(dead_code)]

use rust_decimal::Decimal;
use std::io::Write;
use stripe_gateway::application::gateway::StripeGateway;
use stripe_gateway::config::GatewayConfig;
use stripe_gateway::domain::card::{CreditCard, RawCard};
use stripe_gateway::domain::order::{Address, Order};
use stripe_gateway::domain::payment::Payment;
use stripe_gateway::infrastructure::in_memory::InMemoryCardStore;
use stripe_gateway::infrastructure::sandbox::SandboxProvider;
use tempfile::NamedTempFile;

pub const USER_ID: u64 = 42;
pub const PAYMENT_METHOD_ID: u64 = 1;

pub fn raw_card(number: &str) -> RawCard {
    RawCard {
        number: number.to_string(),
        month: 12,
        year: 2031,
        name: "Jane Doe".to_string(),
        verification_value: Some("123".to_string()),
    }
}

pub fn card(id: u64) -> CreditCard {
    CreditCard::new(id, Some(USER_ID), PAYMENT_METHOD_ID, raw_card("4242424242424242"))
}

pub fn profiled_card(id: u64, customer: &str, token: Option<&str>) -> CreditCard {
    let mut card = card(id);
    card.gateway_customer_profile_id = Some(customer.to_string());
    card.gateway_payment_profile_id = token.map(str::to_string);
    card
}

pub fn address() -> Address {
    Address {
        address1: Some("10 Downing Rd".to_string()),
        address2: Some("Apt 4".to_string()),
        city: Some("Portland".to_string()),
        zipcode: Some("97201".to_string()),
        country: Some("United States".to_string()),
        state: Some("Oregon".to_string()),
    }
}

pub fn order(bill_address: Option<Address>) -> Order {
    Order {
        id: 1,
        number: "R123456789".to_string(),
        email: "jane@example.com".to_string(),
        user_id: Some(USER_ID),
        bill_address,
    }
}

pub fn payment(card_id: u64, amount: Decimal) -> Payment {
    Payment {
        id: 1,
        order_id: 1,
        payment_method_id: PAYMENT_METHOD_ID,
        source_id: card_id,
        amount,
        response_code: None,
        gateway_error: None,
    }
}

/// A gateway over the sandbox, plus handles to inspect both collaborators.
pub fn gateway() -> (StripeGateway, SandboxProvider, InMemoryCardStore) {
    let sandbox = SandboxProvider::new();
    let cards = InMemoryCardStore::new();
    let gateway = StripeGateway::new(
        GatewayConfig::new("sk_test_secret").unwrap(),
        Box::new(sandbox.clone()),
        Box::new(cards.clone()),
    );
    (gateway, sandbox, cards)
}

pub fn seed_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "orders": [
                {{"id": 1, "number": "R100", "email": "jane@example.com", "user_id": 42,
                  "bill_address": {{"address1": "1 Main St", "city": "Portland", "zipcode": "97201"}}}}
            ],
            "cards": [
                {{"id": 1, "user_id": 42, "payment_method_id": 1,
                  "source": {{"number": "4242424242424242", "month": 12, "year": 2031, "name": "Jane"}}}},
                {{"id": 2, "user_id": 42, "payment_method_id": 1,
                  "source": {{"number": "4000000000000002", "month": 12, "year": 2031, "name": "Jane"}}}},
                {{"id": 3, "user_id": 42, "payment_method_id": 1,
                  "source": {{"number": "5555555555554444", "month": 6, "year": 2030, "name": "Jane"}}}}
            ],
            "payments": [
                {{"id": 1, "order_id": 1, "payment_method_id": 1, "source_id": 1, "amount": "19.99"}},
                {{"id": 2, "order_id": 1, "payment_method_id": 1, "source_id": 2, "amount": "5.00"}},
                {{"id": 3, "order_id": 1, "payment_method_id": 1, "source_id": 3, "amount": "7.25"}}
            ]
        }}"#
    )
    .unwrap();
    file
}
