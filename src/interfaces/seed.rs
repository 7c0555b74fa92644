use crate::domain::card::CreditCard;
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Host data the binary starts from: orders, their payments and stored cards.
#[derive(Debug, Deserialize, Default)]
pub struct Seed {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub cards: Vec<CreditCard>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Seed {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }
}
