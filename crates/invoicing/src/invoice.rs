use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, InvoiceId, OrderId};
use stockroom_sales::Order;

/// Amount owed for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    invoice_id: InvoiceId,
    order_id: OrderId,
    total_amount: Decimal,
}

impl Invoice {
    pub fn new(invoice_id: InvoiceId, order_id: OrderId, total_amount: Decimal) -> Self {
        Self {
            invoice_id,
            order_id,
            total_amount,
        }
    }

    /// Build an invoice for `order`, totalling its lines now.
    pub fn for_order(invoice_id: InvoiceId, order: &Order) -> DomainResult<Self> {
        let total_amount = order_total(order)?;
        Ok(Self::new(invoice_id, order.order_id(), total_amount))
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}

/// Σ(price × quantity) over the order's lines.
pub fn order_total(order: &Order) -> DomainResult<Decimal> {
    order.lines().iter().try_fold(Decimal::ZERO, |total, line| {
        total
            .checked_add(line.amount()?)
            .ok_or_else(|| DomainError::invariant("invoice total overflow"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use stockroom_core::ItemCode;
    use stockroom_products::Item;
    use stockroom_sales::OrderLine;

    fn item(code: &str, price: Decimal) -> Item {
        Item::new(ItemCode::new(code).unwrap(), code, price).unwrap()
    }

    #[test]
    fn invoice_total_sums_every_line() {
        let order = Order::new(
            OrderId::new(4),
            vec![
                OrderLine::new(item("A001", dec!(2.50)), 3).unwrap(),
                OrderLine::new(item("B002", dec!(0.99)), 10).unwrap(),
            ],
        )
        .unwrap();

        let invoice = Invoice::for_order(InvoiceId::new(2), &order).unwrap();
        assert_eq!(invoice.total_amount(), dec!(17.40));
        assert_eq!(invoice.order_id(), OrderId::new(4));
        assert_eq!(invoice.invoice_id(), InvoiceId::new(2));
    }

    #[test]
    fn overflowing_total_is_an_invariant_violation() {
        let order = Order::new(
            OrderId::new(1),
            vec![
                OrderLine::new(item("BIG", Decimal::MAX), 1).unwrap(),
                OrderLine::new(item("BIG2", Decimal::MAX), 1).unwrap(),
            ],
        )
        .unwrap();

        let err = order_total(&order).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("overflow") => {}
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the invoice total equals the exact sum of price × quantity, in cents.
        #[test]
        fn total_matches_sum_in_cents(
            lines in prop::collection::vec((0i64..100_000i64, 1i64..1_000i64), 1..10)
        ) {
            let order_lines = lines
                .iter()
                .enumerate()
                .map(|(i, (cents, qty))| {
                    OrderLine::new(item(&format!("I{i}"), Decimal::new(*cents, 2)), *qty).unwrap()
                })
                .collect();
            let order = Order::new(OrderId::new(1), order_lines).unwrap();

            let expected_cents: i64 = lines.iter().map(|(cents, qty)| cents * qty).sum();
            prop_assert_eq!(order_total(&order).unwrap(), Decimal::new(expected_cents, 2));
        }
    }
}
