//! Menu session: reads operator input and drives the inventory.

use std::io::{BufRead, Write};

use stockroom_core::{DomainError, ItemCode, SupplierId};
use stockroom_inventory::Inventory;
use stockroom_parties::Supplier;
use stockroom_products::Item;
use stockroom_sales::{Order, OrderLine};

use crate::menu::{self, MenuChoice};
use crate::{CliError, Console};

const ORDER_SENTINEL: &str = "done";

pub struct Session<R, W> {
    console: Console<R, W>,
    inventory: Inventory,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>) -> Self {
        Self::with_inventory(console, Inventory::new())
    }

    pub fn with_inventory(console: Console<R, W>, inventory: Inventory) -> Self {
        Self { console, inventory }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    /// Show the menu and dispatch selections until `7` or end of input.
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            menu::render(&mut self.console)?;
            let selection = match self.console.prompt("Enter your choice: ") {
                Ok(selection) => selection,
                Err(CliError::InputClosed) => {
                    self.input_closed();
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

            let Some(choice) = MenuChoice::parse(&selection) else {
                self.console.say("Invalid choice. Please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                self.console.say("Exiting...")?;
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(CliError::InputClosed) => {
                    self.input_closed();
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn input_closed(&self) {
        tracing::info!(orders = self.inventory.orders().len(), "input closed; ending session");
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), CliError> {
        tracing::debug!(?choice, "menu selection");
        match choice {
            MenuChoice::AddItem => self.add_item(),
            MenuChoice::RemoveItem => self.remove_item(),
            MenuChoice::ViewItem => self.view_item(),
            MenuChoice::PlaceOrder => self.place_order(),
            MenuChoice::AddSupplier => self.add_supplier(),
            MenuChoice::UpdateSupplier => self.update_supplier(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_item(&mut self) -> Result<(), CliError> {
        let code = self.console.prompt("Enter item code: ")?;
        let name = self.console.prompt("Enter item name: ")?;
        let price = self.console.prompt_price("Enter item price: ")?;
        let quantity: i64 = self.console.prompt_number("Enter item quantity: ", "quantity")?;

        let item = match ItemCode::new(code).and_then(|code| Item::new(code, name, price)) {
            Ok(item) => item,
            Err(err) => return self.report(&err),
        };

        // An unstocked code only fails here on a negative quantity.
        match self.inventory.add_stock(item, quantity) {
            Ok(_) => self.console.say("Item added successfully!"),
            Err(DomainError::NotFound(_)) => {
                self.console.say("Invalid input: quantity must be positive.")
            }
            Err(err) => self.report(&err),
        }
    }

    fn remove_item(&mut self) -> Result<(), CliError> {
        let code = self.console.prompt("Enter item code to remove: ")?;
        let quantity: i64 = self
            .console
            .prompt_number("Enter quantity to remove: ", "quantity")?;

        // A blank code can never be stocked.
        let result = ItemCode::new(code)
            .map_err(|_| DomainError::not_found("blank item code"))
            .and_then(|code| self.inventory.remove_stock(&code, quantity));

        match result {
            Ok(_) => self.console.say("Item removed successfully!"),
            Err(DomainError::NotFound(_)) => self.console.say("Item not found in inventory!"),
            Err(DomainError::InsufficientQuantity { .. }) => {
                self.console.say("Insufficient quantity to remove.")
            }
            Err(err) => self.report(&err),
        }
    }

    fn view_item(&mut self) -> Result<(), CliError> {
        let code = self.console.prompt("Enter item code to get details: ")?;
        let details = ItemCode::new(code)
            .ok()
            .and_then(|code| self.inventory.get_item_details(&code));

        match details {
            Some(d) => self.console.say(format!(
                "Item Details: Code - {}, Name - {}, Price - ${}, Quantity - {}",
                d.code, d.name, d.price, d.quantity
            )),
            None => self.console.say("Item not found in inventory."),
        }
    }

    fn place_order(&mut self) -> Result<(), CliError> {
        self.console.say("Placing order...")?;
        let mut lines: Vec<OrderLine> = Vec::new();

        loop {
            let code = self
                .console
                .prompt("Enter item code to order (or 'done' to finish): ")?;
            if code.trim().eq_ignore_ascii_case(ORDER_SENTINEL) {
                break;
            }
            let quantity: i64 = self
                .console
                .prompt_number("Enter quantity to order: ", "quantity")?;

            let entry = ItemCode::new(code)
                .ok()
                .and_then(|code| self.inventory.stock_entry(&code));
            let Some(entry) = entry else {
                self.console.say("Item not found in inventory.")?;
                continue;
            };

            let line = match OrderLine::new(entry.item().clone(), quantity) {
                Ok(line) => line,
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            };

            // Units already on this order count against what is on hand.
            let requested = lines
                .iter()
                .filter(|l| l.item().code() == line.item().code())
                .map(OrderLine::quantity)
                .try_fold(line.quantity(), i64::checked_add);
            if requested.is_none_or(|requested| requested > entry.quantity()) {
                self.console.say("Insufficient quantity in inventory.")?;
                continue;
            }

            self.console.say(format!(
                "{} {}(s) added to the order.",
                line.quantity(),
                line.item().name()
            ))?;
            lines.push(line);
        }

        if lines.is_empty() {
            return self.console.say("No items added to the order.");
        }

        match Order::new(self.inventory.next_order_id(), lines) {
            Ok(order) => self.submit_order(order),
            Err(err) => self.report(&err),
        }
    }

    /// Take the order's stock, then record it and print its invoice.
    ///
    /// The order is only recorded once its stock update has applied.
    fn submit_order(&mut self, order: Order) -> Result<(), CliError> {
        if let Err(err) = self.inventory.update_inventory(&order) {
            return self.report(&err);
        }
        self.inventory.place_order(order.clone());
        self.console.say("Order placed successfully!")?;

        match self.inventory.generate_invoice(&order) {
            Ok(invoice) => self.console.say(format!(
                "Invoice #{} for order #{}: total ${}",
                invoice.invoice_id(),
                invoice.order_id(),
                invoice.total_amount()
            )),
            Err(err) => self.report(&err),
        }
    }

    fn add_supplier(&mut self) -> Result<(), CliError> {
        let supplier_id: i64 = self
            .console
            .prompt_number("Enter supplier ID: ", "supplier ID")?;
        let name = self.console.prompt("Enter supplier name: ")?;
        let email = self.console.prompt("Enter supplier email: ")?;

        self.inventory
            .add_supplier(Supplier::new(SupplierId::new(supplier_id), name, email));
        self.console.say("Supplier added successfully!")
    }

    fn update_supplier(&mut self) -> Result<(), CliError> {
        let supplier_id: i64 = self
            .console
            .prompt_number("Enter supplier ID to update: ", "supplier ID")?;
        let name = self.console.prompt("Enter updated supplier name: ")?;
        let email = self.console.prompt("Enter updated supplier email: ")?;

        let supplier = Supplier::new(SupplierId::new(supplier_id), name, email);
        if self.inventory.update_supplier(supplier) {
            self.console.say("Supplier updated successfully!")
        } else {
            self.console.say("Supplier not found; nothing was updated.")
        }
    }

    fn report(&mut self, err: &DomainError) -> Result<(), CliError> {
        tracing::debug!(error = %err, "operation rejected");
        let message = match err {
            DomainError::Validation(msg) => format!("Invalid input: {msg}."),
            DomainError::NotFound(_) => "Item not found in inventory.".to_string(),
            DomainError::InsufficientQuantity { .. } => {
                "Insufficient quantity in inventory.".to_string()
            }
            other => format!("Error: {other}."),
        };
        self.console.say(message)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rust_decimal_macros::dec;

    use super::*;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
    }

    fn transcript(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let Session { console, .. } = session;
        let (_, output) = console.into_inner();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn exit_ends_the_loop() {
        let mut s = session("7\n1\n");
        s.run().unwrap();
        let out = transcript(s);
        assert!(out.contains("Exiting..."));
        assert_eq!(out.matches("Inventory Management System").count(), 1);
    }

    #[test]
    fn invalid_choice_redisplays_menu() {
        let mut s = session("9\n7\n");
        s.run().unwrap();
        let out = transcript(s);
        assert!(out.contains("Invalid choice. Please try again."));
        assert_eq!(out.matches("Inventory Management System").count(), 2);
    }

    #[test]
    fn end_of_input_ends_the_session_quietly() {
        let mut s = session("1\nA001\nWidget\n");
        s.run().unwrap();
        assert_eq!(s.inventory().item_count(), 0);
    }

    #[test]
    fn malformed_quantity_terminates_the_session() {
        let mut s = session("1\nA001\nWidget\n2.50\nten\n7\n");
        match s.run() {
            Err(CliError::MalformedNumber { field, input }) => {
                assert_eq!(field, "quantity");
                assert_eq!(input, "ten");
            }
            other => panic!("Expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn negative_price_is_reported_and_not_stocked() {
        let mut s = session("1\nA001\nWidget\n-1\n5\n7\n");
        s.run().unwrap();
        assert_eq!(s.inventory().item_count(), 0);
        assert!(transcript(s).contains("Invalid input: price cannot be negative."));
    }

    #[test]
    fn order_counts_pending_units_against_stock() {
        let input = "1\nA001\nWidget\n2.50\n5\n4\nA001\n3\nA001\n3\ndone\n7\n";
        let mut s = session(input);
        s.run().unwrap();

        let inventory = s.inventory();
        assert_eq!(inventory.orders().len(), 1);
        assert_eq!(inventory.orders()[0].lines().len(), 1);
        assert_eq!(inventory.available_quantity(&ItemCode::new("A001").unwrap()), 2);

        let out = transcript(s);
        assert!(out.contains("3 Widget(s) added to the order."));
        assert!(out.contains("Insufficient quantity in inventory."));
        assert!(out.contains("Invoice #1 for order #1: total $7.50"));
    }

    #[test]
    fn oversized_repeat_line_is_refused_without_overflow() {
        let input = "1\nA001\nWidget\n2.50\n10\n4\nA001\n5\nA001\n9223372036854775807\ndone\n7\n";
        let mut s = session(input);
        s.run().unwrap();

        let inventory = s.inventory();
        assert_eq!(inventory.orders().len(), 1);
        assert_eq!(inventory.orders()[0].lines().len(), 1);
        assert_eq!(inventory.available_quantity(&ItemCode::new("A001").unwrap()), 5);
        assert!(transcript(s).contains("Insufficient quantity in inventory."));
    }

    #[test]
    fn failed_stock_update_does_not_record_the_order() {
        let widget = Item::new(ItemCode::new("A001").unwrap(), "Widget", dec!(2.50)).unwrap();
        let mut s = session("");
        s.inventory.add_stock(widget.clone(), 5).unwrap();

        let lines = vec![
            OrderLine::new(widget.clone(), 3).unwrap(),
            OrderLine::new(widget.clone(), 3).unwrap(),
        ];
        let order = Order::new(s.inventory().next_order_id(), lines).unwrap();
        s.submit_order(order).unwrap();

        assert!(s.inventory().orders().is_empty());
        assert_eq!(s.inventory().available_quantity(widget.code()), 5);
        let out = transcript(s);
        assert!(out.contains("Insufficient quantity in inventory."));
        assert!(!out.contains("Order placed successfully!"));
        assert!(!out.contains("Invoice #"));
    }

    #[test]
    fn negative_quantity_for_a_new_item_is_invalid_input() {
        let mut s = session("1\nA001\nWidget\n2.50\n-3\n7\n");
        s.run().unwrap();
        assert_eq!(s.inventory().item_count(), 0);

        let out = transcript(s);
        assert!(out.contains("Invalid input: quantity must be positive."));
        assert!(!out.contains("Item not found in inventory."));
    }

    #[test]
    fn price_accepts_scientific_notation() {
        let mut s = session("1\nA001\nWidget\n1e3\n2\n7\n");
        s.run().unwrap();
        assert_eq!(
            s.inventory().get_item_details(&ItemCode::new("A001").unwrap()).unwrap().price,
            dec!(1000)
        );
    }

    #[test]
    fn order_without_lines_is_not_placed() {
        let mut s = session("4\nZZZ\n1\nDONE\n7\n");
        s.run().unwrap();
        assert!(s.inventory().orders().is_empty());

        let out = transcript(s);
        assert!(out.contains("Item not found in inventory."));
        assert!(out.contains("No items added to the order."));
    }

    #[test]
    fn view_item_prints_details() {
        let mut s = session("1\nA001\nWidget\n2.50\n10\n3\nA001\n7\n");
        s.run().unwrap();
        assert_eq!(
            s.inventory().get_item_details(&ItemCode::new("A001").unwrap()).unwrap().price,
            dec!(2.50)
        );
        assert!(transcript(s)
            .contains("Item Details: Code - A001, Name - Widget, Price - $2.50, Quantity - 10"));
    }

    #[test]
    fn updating_unknown_supplier_says_so() {
        let mut s = session("6\n9\nNobody\nn@x.com\n7\n");
        s.run().unwrap();
        assert_eq!(s.inventory().suppliers().count(), 0);
        assert!(transcript(s).contains("Supplier not found; nothing was updated."));
    }
}
