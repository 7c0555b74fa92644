use crate::domain::ports::CardStore;
use crate::error::Result;
use tracing::debug;

/// Finds a customer profile a new card can be attached to.
pub struct ProfileResolver<'a> {
    cards: &'a dyn CardStore,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(cards: &'a dyn CardStore) -> Self {
        Self { cards }
    }

    /// Returns the customer profile of the first active card the user has stored for
    /// this payment method.
    ///
    /// "First" is store order, not recency. Guest orders never match.
    pub async fn existing_profile_for(
        &self,
        user_id: Option<u64>,
        payment_method_id: u64,
    ) -> Result<Option<String>> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let profile = self
            .cards
            .active_cards_for(user_id, payment_method_id)
            .await?
            .into_iter()
            .find_map(|card| card.gateway_customer_profile_id);

        debug!(user_id, payment_method_id, found = profile.is_some(), "profile lookup");
        Ok(profile)
    }
}
