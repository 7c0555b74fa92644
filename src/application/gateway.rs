use crate::application::profile_resolver::ProfileResolver;
use crate::application::request_builder::RequestBuilder;
use crate::application::response_mapper::{ProfileCreationOutcome, ResponseMapper, StoreResponse};
use crate::config::GatewayConfig;
use crate::domain::card::CreditCard;
use crate::domain::money::MinorUnits;
use crate::domain::options::GatewayOptions;
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use crate::domain::ports::{CardStore, CardStoreBox, PaymentProviderBox};
use crate::domain::response::ProviderResponse;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Result of [`StripeGateway::create_profile`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ProfileStatus {
    /// The card already had a customer profile; nothing was sent.
    AlreadyProfiled,
    /// The processor stored the card and the identifiers were saved on it.
    Created(ProfileCreationOutcome),
    /// The processor refused the card. The message is also recorded on the payment.
    Rejected(String),
}

/// Payment gateway backed by a Stripe-style card processor.
///
/// Every operation sends exactly one request to the provider and never retries.
/// Declines are returned to the caller as unsuccessful responses; only transport and
/// storage problems come back as `Err`.
pub struct StripeGateway {
    config: GatewayConfig,
    provider: PaymentProviderBox,
    cards: CardStoreBox,
}

impl StripeGateway {
    /// Creates a new `StripeGateway`.
    ///
    /// # Arguments
    ///
    /// * `config` - Login and currency, read-only from here on.
    /// * `provider` - Client for the remote processor.
    /// * `cards` - The host's credit card store, used for profile lookup and updates.
    pub fn new(config: GatewayConfig, provider: PaymentProviderBox, cards: CardStoreBox) -> Self {
        Self {
            config,
            provider,
            cards,
        }
    }

    pub fn cards(&self) -> &dyn CardStore {
        self.cards.as_ref()
    }

    /// Charges `amount` (major units) immediately.
    pub async fn purchase(
        &self,
        amount: Decimal,
        card: &CreditCard,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let request =
            RequestBuilder::new(&self.config).build_charge_request(amount, card, options)?;
        info!(card_id = card.id, amount = %request.amount, "purchase");
        self.provider
            .purchase(request.amount, &request.source, &request.options)
            .await
    }

    /// Places a hold for `amount` (major units) to be captured later.
    pub async fn authorize(
        &self,
        amount: Decimal,
        card: &CreditCard,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let request =
            RequestBuilder::new(&self.config).build_charge_request(amount, card, options)?;
        info!(card_id = card.id, amount = %request.amount, "authorize");
        self.provider
            .authorize(request.amount, &request.source, &request.options)
            .await
    }

    /// Captures the payment's authorization for the payment's full amount.
    ///
    /// Capture, credit and void work from the transaction reference alone, so the card
    /// is optional and never read.
    pub async fn capture(
        &self,
        payment: &Payment,
        _card: Option<&CreditCard>,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        let authorization = payment
            .response_code
            .as_deref()
            .ok_or(GatewayError::MissingTransactionReference(payment.id))?;
        let amount = MinorUnits::from_decimal(payment.amount)?;

        info!(payment_id = payment.id, %amount, authorization, "capture");
        self.provider.capture(amount, authorization, options).await
    }

    /// Refunds against a previous charge.
    ///
    /// `amount` is already in minor units here, unlike purchase and authorize; callers
    /// convert before calling.
    pub async fn credit(
        &self,
        amount: MinorUnits,
        _card: Option<&CreditCard>,
        response_code: &str,
        _options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        info!(%amount, authorization = response_code, "refund");
        self.provider
            .refund(amount, response_code, &GatewayOptions::new())
            .await
    }

    /// Cancels an uncaptured authorization.
    pub async fn void(
        &self,
        response_code: &str,
        _card: Option<&CreditCard>,
        _options: &GatewayOptions,
    ) -> Result<ProviderResponse> {
        info!(authorization = response_code, "void");
        self.provider.void(response_code, &GatewayOptions::new()).await
    }

    /// Stores the payment's card with the processor and saves the resulting tokens.
    ///
    /// The card is attached to the user's existing customer when one is found for the
    /// same payment method, otherwise a new customer is created. A card that already has
    /// a customer profile is left alone.
    pub async fn create_profile(
        &self,
        payment: &mut Payment,
        order: &Order,
    ) -> Result<ProfileStatus> {
        let card = self
            .cards
            .get(payment.source_id)
            .await?
            .ok_or(GatewayError::CardNotFound(payment.source_id))?;

        if card.has_profile() {
            return Ok(ProfileStatus::AlreadyProfiled);
        }

        let existing = ProfileResolver::new(self.cards.as_ref())
            .existing_profile_for(order.user_id, payment.payment_method_id)
            .await?;
        let options = RequestBuilder::new(&self.config).build_store_options(order, existing);

        info!(
            card_id = card.id,
            last_digits = card.source.last_digits(),
            attach = options.attaches_to_customer(),
            "store card"
        );
        let response = self.provider.store(&card.source, &options).await?;

        match ResponseMapper::map_store(&response, &options)? {
            StoreResponse::Stored(outcome) => {
                // The card now exists remotely, so a failed write is fatal.
                self.cards
                    .assign_profile(card.id, outcome.customer_id(), outcome.card_id())
                    .await
                    .inspect_err(|e| warn!(card_id = card.id, error = %e, "saving profile failed"))?;
                Ok(ProfileStatus::Created(outcome))
            }
            StoreResponse::Rejected(message) => {
                warn!(payment_id = payment.id, %message, "card store rejected");
                payment.gateway_error(message.clone());
                Ok(ProfileStatus::Rejected(message))
            }
        }
    }
}
