use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemCode};

/// A stockable item, identified by its code.
///
/// Items are immutable once created: there is no rename or reprice
/// operation, so the stock table keeps the first record it saw for a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    code: ItemCode,
    name: String,
    /// Unit price in the shop currency.
    price: Decimal,
}

impl Item {
    /// Create an item.
    ///
    /// Rejects negative prices. The code is validated by [`ItemCode`].
    pub fn new(code: ItemCode, name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self {
            code,
            name: name.into(),
            price,
        })
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}
