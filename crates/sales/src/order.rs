use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemCode, OrderId};
use stockroom_products::Item;

/// Order line: a snapshot of the item and the quantity ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    item: Item,
    quantity: i64,
}

impl OrderLine {
    pub fn new(item: Item, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self { item, quantity })
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price × quantity` for this line.
    pub fn amount(&self) -> DomainResult<Decimal> {
        self.item
            .price()
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| DomainError::invariant("order line amount overflow"))
    }
}

/// A customer order.
///
/// Orders are immutable once built. Line order is preserved as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Create an order. An order without lines is rejected.
    pub fn new(order_id: OrderId, lines: Vec<OrderLine>) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("cannot create an order without lines"));
        }
        Ok(Self { order_id, lines })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Total quantity requested per item code, across every line.
    ///
    /// The same code may appear on several lines. A per-code total that
    /// does not fit in an `i64` is an invariant violation.
    pub fn quantities_by_code(&self) -> DomainResult<BTreeMap<&ItemCode, i64>> {
        let mut totals: BTreeMap<&ItemCode, i64> = BTreeMap::new();
        for line in &self.lines {
            let total = totals.entry(line.item().code()).or_insert(0);
            *total = total
                .checked_add(line.quantity())
                .ok_or_else(|| DomainError::invariant("order quantity overflow"))?;
        }
        Ok(totals)
    }
}
