use crate::config::GatewayConfig;
use crate::domain::card::{ChargeSource, CreditCard};
use crate::domain::money::MinorUnits;
use crate::domain::options::{AddressOptions, ChargeOptions, GatewayOptions, StoreOptions};
use crate::domain::order::Order;
use crate::error::Result;
use rust_decimal::Decimal;

/// Everything a purchase or authorize call needs.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ChargeRequest {
    pub amount: MinorUnits,
    pub source: ChargeSource,
    pub options: ChargeOptions,
}

/// Assembles processor parameters from host objects.
pub struct RequestBuilder<'a> {
    config: &'a GatewayConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config }
    }

    /// Builds the shared request for purchase and authorize.
    ///
    /// A profiled card is charged by token; with a customer but no card token the
    /// processor falls back to the customer's default card.
    pub fn build_charge_request(
        &self,
        amount: Decimal,
        card: &CreditCard,
        options: &GatewayOptions,
    ) -> Result<ChargeRequest> {
        let options = ChargeOptions {
            description: format!("Order {}", options.order_id().unwrap_or_default()),
            currency: self.config.currency.clone(),
            customer: card.gateway_customer_profile_id.clone(),
        };

        Ok(ChargeRequest {
            amount: MinorUnits::from_decimal(amount)?,
            source: ChargeSource::for_card(card),
            options,
        })
    }

    /// Builds store options for `order`, attaching to `existing_customer` when given.
    ///
    /// Email, login and address are always the order's own; the lookup only
    /// contributes `customer` and `set_default`.
    pub fn build_store_options(
        &self,
        order: &Order,
        existing_customer: Option<String>,
    ) -> StoreOptions {
        let set_default = existing_customer.as_ref().map(|_| true);
        StoreOptions {
            email: order.email.clone(),
            login: self.config.login.clone(),
            address: address_for(order),
            customer: existing_customer,
            set_default,
        }
    }
}

pub fn address_for(order: &Order) -> Option<AddressOptions> {
    let address = order.bill_address.as_ref()?;
    Some(AddressOptions {
        address1: address.address1.clone(),
        address2: address.address2.clone(),
        city: address.city.clone(),
        zip: address.zipcode.clone(),
        country: address.country.clone(),
        state: address.state.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::RawCard;
    use crate::domain::order::Address;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn config() -> GatewayConfig {
        GatewayConfig::new("sk_test_key").unwrap()
    }

    fn card() -> CreditCard {
        CreditCard::new(
            1,
            Some(10),
            1,
            RawCard {
                number: "4242424242424242".to_string(),
                month: 4,
                year: 2031,
                name: "Jane Doe".to_string(),
                verification_value: None,
            },
        )
    }

    fn order(bill_address: Option<Address>) -> Order {
        Order {
            id: 1,
            number: "R100".to_string(),
            email: "jane@example.com".to_string(),
            user_id: Some(10),
            bill_address,
        }
    }

    #[test]
    fn test_charge_request_for_new_card() {
        let config = config();
        let options = GatewayOptions::new().with("order_id", "R100-XYZ");
        let request = RequestBuilder::new(&config)
            .build_charge_request(dec!(25.50), &card(), &options)
            .unwrap();

        assert_eq!(request.amount, MinorUnits(2550));
        assert_eq!(request.options.description, "Order R100-XYZ");
        assert_eq!(request.options.currency, "USD");
        assert!(request.options.customer.is_none());
        assert!(matches!(request.source, ChargeSource::Card(_)));
    }

    #[test]
    fn test_charge_request_uses_configured_currency() {
        let config = config().with_currency("CAD");
        let request = RequestBuilder::new(&config)
            .build_charge_request(dec!(1.005), &card(), &GatewayOptions::new())
            .unwrap();

        assert_eq!(request.amount, MinorUnits(101));
        assert_eq!(request.options.currency, "CAD");
        assert_eq!(request.options.description, "Order ");
    }

    #[test]
    fn test_charge_request_for_profiled_card() {
        let config = config();
        let mut card = card();
        card.gateway_customer_profile_id = Some("cus_1".to_string());
        card.gateway_payment_profile_id = Some("card_1".to_string());

        let request = RequestBuilder::new(&config)
            .build_charge_request(dec!(10), &card, &GatewayOptions::new())
            .unwrap();

        assert_eq!(request.options.customer.as_deref(), Some("cus_1"));
        assert_eq!(request.source, ChargeSource::Token("card_1".to_string()));
    }

    #[test]
    fn test_charge_request_customer_without_card_token() {
        let config = config();
        let mut card = card();
        card.gateway_customer_profile_id = Some("cus_1".to_string());

        let request = RequestBuilder::new(&config)
            .build_charge_request(dec!(10), &card, &GatewayOptions::new())
            .unwrap();

        assert_eq!(request.options.customer.as_deref(), Some("cus_1"));
        assert_eq!(request.source, ChargeSource::CustomerDefault);
    }

    #[test]
    fn test_store_options_without_address() {
        let config = config();
        let options = RequestBuilder::new(&config).build_store_options(&order(None), None);

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"email": "jane@example.com", "login": "sk_test_key"})
        );
    }

    #[test]
    fn test_store_options_attach_to_existing_customer() {
        let config = config();
        let address = Address {
            address1: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            zipcode: Some("12345".to_string()),
            country: Some("United States".to_string()),
            ..Default::default()
        };
        let options = RequestBuilder::new(&config)
            .build_store_options(&order(Some(address)), Some("cus_1".to_string()));

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "email": "jane@example.com",
                "login": "sk_test_key",
                "customer": "cus_1",
                "set_default": true,
                "address": {
                    "address1": "1 Main St",
                    "address2": null,
                    "city": "Springfield",
                    "zip": "12345",
                    "country": "United States"
                }
            })
        );
    }

    #[test]
    fn test_address_includes_state_when_present() {
        let address = Address {
            state: Some("Oregon".to_string()),
            ..Default::default()
        };
        let options = address_for(&order(Some(address))).unwrap();
        assert_eq!(options.state.as_deref(), Some("Oregon"));
        assert!(options.country.is_none());
        assert!(address_for(&order(None)).is_none());
    }
}
