use crate::domain::card::CreditCard;
use crate::domain::ports::CardStore;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing credit cards.
pub const CF_CARDS: &str = "cards";

/// A persistent card store backed by RocksDB.
///
/// Cards are stored as JSON keyed by big-endian id, so iteration follows id order.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    // Serializes read-modify-write updates of profile identifiers.
    profile_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_cards = ColumnFamilyDescriptor::new(CF_CARDS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_cards])?;

        Ok(Self {
            db: Arc::new(db),
            profile_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cards_cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_CARDS)
            .ok_or_else(|| GatewayError::StorageError("Cards column family not found".to_string()))
    }

    fn put(&self, card: &CreditCard) -> Result<()> {
        let cf = self.cards_cf()?;
        let value = serde_json::to_vec(card)?;
        self.db.put_cf(cf, card.id.to_be_bytes(), value)?;
        Ok(())
    }

    fn read(&self, card_id: u64) -> Result<Option<CreditCard>> {
        let cf = self.cards_cf()?;
        match self.db.get_cf(cf, card_id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CardStore for RocksDBStore {
    async fn store(&self, card: CreditCard) -> Result<()> {
        self.put(&card)
    }

    async fn get(&self, card_id: u64) -> Result<Option<CreditCard>> {
        self.read(card_id)
    }

    async fn active_cards_for(
        &self,
        user_id: u64,
        payment_method_id: u64,
    ) -> Result<Vec<CreditCard>> {
        let cf = self.cards_cf()?;
        let mut cards = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let card: CreditCard = serde_json::from_slice(&value)?;
            if card.active
                && card.user_id == Some(user_id)
                && card.payment_method_id == payment_method_id
            {
                cards.push(card);
            }
        }

        Ok(cards)
    }

    async fn assign_profile(
        &self,
        card_id: u64,
        customer_profile_id: &str,
        payment_profile_id: Option<&str>,
    ) -> Result<CreditCard> {
        let _guard = self.profile_lock.lock().await;

        let mut card = self.read(card_id)?.ok_or(GatewayError::CardNotFound(card_id))?;
        if card.has_profile() {
            return Err(GatewayError::ProfileConflict(card_id));
        }
        card.gateway_customer_profile_id = Some(customer_profile_id.to_string());
        card.gateway_payment_profile_id = payment_profile_id.map(str::to_string);
        self.put(&card)?;
        Ok(card)
    }
}
