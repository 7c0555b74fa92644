use super::card::{ChargeSource, CreditCard, RawCard};
use super::money::MinorUnits;
use super::options::{ChargeOptions, GatewayOptions, StoreOptions};
use super::response::ProviderResponse;
use crate::error::Result;
use async_trait::async_trait;

/// Client for the remote card processor.
///
/// Each method is one outbound call. An `Err` means the call itself failed; a
/// processor-side decline comes back as `Ok` with `success == false`.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn purchase(
        &self,
        amount: MinorUnits,
        source: &ChargeSource,
        options: &ChargeOptions,
    ) -> Result<ProviderResponse>;

    async fn authorize(
        &self,
        amount: MinorUnits,
        source: &ChargeSource,
        options: &ChargeOptions,
    ) -> Result<ProviderResponse>;

    async fn capture(
        &self,
        amount: MinorUnits,
        authorization: &str,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse>;

    async fn refund(
        &self,
        amount: MinorUnits,
        authorization: &str,
        options: &GatewayOptions,
    ) -> Result<ProviderResponse>;

    async fn void(&self, authorization: &str, options: &GatewayOptions)
    -> Result<ProviderResponse>;

    async fn store(&self, card: &RawCard, options: &StoreOptions) -> Result<ProviderResponse>;
}

/// The host's stored credit cards.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn store(&self, card: CreditCard) -> Result<()>;
    async fn get(&self, card_id: u64) -> Result<Option<CreditCard>>;
    /// Active cards of `user_id` used with `payment_method_id`, in store order.
    async fn active_cards_for(&self, user_id: u64, payment_method_id: u64)
    -> Result<Vec<CreditCard>>;
    /// Writes both profile identifiers in one step. A missing payment profile is
    /// stored as absent.
    ///
    /// Fails with `ProfileConflict` if the card already has a customer profile.
    async fn assign_profile(
        &self,
        card_id: u64,
        customer_profile_id: &str,
        payment_profile_id: Option<&str>,
    ) -> Result<CreditCard>;
}

pub type PaymentProviderBox = Box<dyn PaymentProvider>;
pub type CardStoreBox = Box<dyn CardStore>;
