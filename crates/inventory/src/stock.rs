use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, InvoiceId, ItemCode, OrderId, SupplierId};
use stockroom_invoicing::Invoice;
use stockroom_parties::Supplier;
use stockroom_products::Item;
use stockroom_sales::Order;

/// On-hand stock for one item code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    item: Item,
    quantity: i64,
}

impl StockEntry {
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Read-only snapshot of a stocked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub code: ItemCode,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// Aggregate root: Inventory.
///
/// # Invariants
/// - Every stock key equals the code of the item stored under it.
/// - No stock entry ever holds a quantity ≤ 0: an entry that reaches zero is
///   removed, and any change that would go below zero is rejected.
/// - Orders are append-only.
///
/// Every failing operation leaves the aggregate unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    stock: BTreeMap<ItemCode, StockEntry>,
    suppliers: BTreeMap<SupplierId, Supplier>,
    orders: Vec<Order>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Stock
    // ─────────────────────────────────────────────────────────────────────

    /// Add `quantity` units of `item` (negative to take stock out).
    ///
    /// An already stocked code keeps its original item record; only the
    /// quantity changes. Returns the quantity left on hand (0 when the entry
    /// was removed).
    pub fn add_stock(&mut self, item: Item, quantity: i64) -> DomainResult<i64> {
        let code = item.code().clone();

        if let Some(entry) = self.stock.get_mut(&code) {
            let available = entry.quantity;
            let new_quantity = available
                .checked_add(quantity)
                .ok_or_else(|| DomainError::invariant("stock quantity overflow"))?;
            if new_quantity < 0 {
                return Err(DomainError::insufficient(&code, quantity.saturating_neg(), available));
            }
            if new_quantity > 0 {
                entry.quantity = new_quantity;
                tracing::info!(code = %code, delta = quantity, on_hand = new_quantity, "stock adjusted");
                return Ok(new_quantity);
            }
            self.stock.remove(&code);
            tracing::info!(code = %code, delta = quantity, "stock depleted; entry removed");
            return Ok(0);
        }

        if quantity < 0 {
            return Err(DomainError::not_found(format!("item {code}")));
        }
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        self.stock.insert(code.clone(), StockEntry { item, quantity });
        tracing::info!(code = %code, on_hand = quantity, "item stocked");
        Ok(quantity)
    }

    /// Take `quantity` units of `code` out of stock.
    ///
    /// Returns the quantity left on hand (0 when the entry was removed).
    pub fn remove_stock(&mut self, code: &ItemCode, quantity: i64) -> DomainResult<i64> {
        let entry = self
            .stock
            .get(code)
            .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;

        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > entry.quantity {
            return Err(DomainError::insufficient(code, quantity, entry.quantity));
        }

        let item = entry.item.clone();
        self.add_stock(item, -quantity)
    }

    /// Snapshot of a stocked item, or `None` if the code is not stocked.
    pub fn get_item_details(&self, code: &ItemCode) -> Option<ItemDetails> {
        let details = self.stock.get(code).map(|entry| ItemDetails {
            code: entry.item.code().clone(),
            name: entry.item.name().to_string(),
            price: entry.item.price(),
            quantity: entry.quantity,
        });
        tracing::debug!(code = %code, found = details.is_some(), "item lookup");
        details
    }

    pub fn stock_entry(&self, code: &ItemCode) -> Option<&StockEntry> {
        self.stock.get(code)
    }

    /// Quantity on hand for `code` (0 when not stocked).
    pub fn available_quantity(&self, code: &ItemCode) -> i64 {
        self.stock.get(code).map_or(0, |entry| entry.quantity)
    }

    /// Number of distinct item codes in stock.
    pub fn item_count(&self) -> usize {
        self.stock.len()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Orders & invoices
    // ─────────────────────────────────────────────────────────────────────

    /// Id for the next order: number of placed orders + 1.
    pub fn next_order_id(&self) -> OrderId {
        OrderId::new(self.orders.len() as u64 + 1)
    }

    /// Record an order. No duplicate-id check is made.
    pub fn place_order(&mut self, order: Order) {
        tracing::info!(
            order_id = %order.order_id(),
            lines = order.lines().len(),
            "order placed"
        );
        self.orders.push(order);
    }

    /// Take every line of `order` out of stock.
    ///
    /// All lines are checked before any stock moves, so either the whole order
    /// applies or nothing changes.
    pub fn update_inventory(&mut self, order: &Order) -> DomainResult<()> {
        for (code, requested) in order.quantities_by_code()? {
            let available = self
                .stock
                .get(code)
                .map(|entry| entry.quantity)
                .ok_or_else(|| DomainError::not_found(format!("item {code}")))?;
            if requested > available {
                return Err(DomainError::insufficient(code, requested, available));
            }
        }

        for line in order.lines() {
            self.add_stock(line.item().clone(), -line.quantity())?;
        }
        Ok(())
    }

    /// Build the invoice for `order`.
    ///
    /// The invoice id is the number of orders placed so far, not the order's
    /// own id. Invoices are not stored.
    pub fn generate_invoice(&self, order: &Order) -> DomainResult<Invoice> {
        let invoice_id = InvoiceId::new(self.orders.len() as u64);
        let invoice = Invoice::for_order(invoice_id, order)?;
        tracing::info!(
            invoice_id = %invoice.invoice_id(),
            order_id = %invoice.order_id(),
            total = %invoice.total_amount(),
            "invoice generated"
        );
        Ok(invoice)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // ─────────────────────────────────────────────────────────────────────
    // Suppliers
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or overwrite the supplier with this id.
    pub fn add_supplier(&mut self, supplier: Supplier) {
        tracing::info!(supplier_id = %supplier.supplier_id(), "supplier saved");
        self.suppliers.insert(supplier.supplier_id(), supplier);
    }

    /// Overwrite an existing supplier. Returns `false` (and changes nothing)
    /// when the id is unknown.
    pub fn update_supplier(&mut self, supplier: Supplier) -> bool {
        match self.suppliers.get_mut(&supplier.supplier_id()) {
            Some(existing) => {
                tracing::info!(supplier_id = %supplier.supplier_id(), "supplier updated");
                *existing = supplier;
                true
            }
            None => {
                tracing::debug!(supplier_id = %supplier.supplier_id(), "supplier update skipped; unknown id");
                false
            }
        }
    }

    pub fn supplier(&self, supplier_id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(&supplier_id)
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    /// Supplier price history is not kept.
    pub fn track_supplier_price(
        &self,
        supplier_id: SupplierId,
        code: &ItemCode,
    ) -> DomainResult<()> {
        Err(DomainError::unsupported(format!(
            "price tracking for supplier {supplier_id} and item {code}"
        )))
    }
}
