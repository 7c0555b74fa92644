use crate::domain::card::CreditCard;
use crate::domain::ports::CardStore;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for credit cards.
///
/// Cards are kept ordered by id, which is the order lookups see them in.
#[derive(Default, Clone)]
pub struct InMemoryCardStore {
    cards: Arc<RwLock<BTreeMap<u64, CreditCard>>>,
}

impl InMemoryCardStore {
    /// Creates a new, empty in-memory card store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn store(&self, card: CreditCard) -> Result<()> {
        let mut cards = self.cards.write().await;
        cards.insert(card.id, card);
        Ok(())
    }

    async fn get(&self, card_id: u64) -> Result<Option<CreditCard>> {
        let cards = self.cards.read().await;
        Ok(cards.get(&card_id).cloned())
    }

    async fn active_cards_for(
        &self,
        user_id: u64,
        payment_method_id: u64,
    ) -> Result<Vec<CreditCard>> {
        let cards = self.cards.read().await;
        Ok(cards
            .values()
            .filter(|card| {
                card.active
                    && card.user_id == Some(user_id)
                    && card.payment_method_id == payment_method_id
            })
            .cloned()
            .collect())
    }

    async fn assign_profile(
        &self,
        card_id: u64,
        customer_profile_id: &str,
        payment_profile_id: Option<&str>,
    ) -> Result<CreditCard> {
        // Check and write under one lock so only one caller can profile a card.
        let mut cards = self.cards.write().await;
        let card = cards
            .get_mut(&card_id)
            .ok_or(GatewayError::CardNotFound(card_id))?;
        if card.has_profile() {
            return Err(GatewayError::ProfileConflict(card_id));
        }
        card.gateway_customer_profile_id = Some(customer_profile_id.to_string());
        card.gateway_payment_profile_id = payment_profile_id.map(str::to_string);
        Ok(card.clone())
    }
}
