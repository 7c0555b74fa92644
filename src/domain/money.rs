use crate::error::{GatewayError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount expressed in the smallest currency unit (e.g. cents).
///
/// This is what the processor accepts on the wire. Host amounts are decimals in the
/// major unit and must go through [`MinorUnits::from_decimal`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Converts a major-unit decimal into minor units.
    ///
    /// Multiplies by 100 and rounds to the nearest integer, ties away from zero.
    pub fn from_decimal(amount: Decimal) -> Result<Self> {
        let scaled = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| GatewayError::InvalidAmount(format!("{amount} overflows")))?;

        scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
            .ok_or_else(|| GatewayError::InvalidAmount(format!("{amount} overflows")))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
