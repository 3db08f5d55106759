use std::io::{BufRead, Write};

use crate::{CliError, Console};

/// One entry of the main menu, selected by its number key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddItem,
    RemoveItem,
    ViewItem,
    PlaceOrder,
    AddSupplier,
    UpdateSupplier,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::AddItem,
        MenuChoice::RemoveItem,
        MenuChoice::ViewItem,
        MenuChoice::PlaceOrder,
        MenuChoice::AddSupplier,
        MenuChoice::UpdateSupplier,
        MenuChoice::Exit,
    ];

    /// Parse a menu selection; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddItem),
            "2" => Some(MenuChoice::RemoveItem),
            "3" => Some(MenuChoice::ViewItem),
            "4" => Some(MenuChoice::PlaceOrder),
            "5" => Some(MenuChoice::AddSupplier),
            "6" => Some(MenuChoice::UpdateSupplier),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn key(self) -> u8 {
        match self {
            MenuChoice::AddItem => 1,
            MenuChoice::RemoveItem => 2,
            MenuChoice::ViewItem => 3,
            MenuChoice::PlaceOrder => 4,
            MenuChoice::AddSupplier => 5,
            MenuChoice::UpdateSupplier => 6,
            MenuChoice::Exit => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddItem => "Add Item",
            MenuChoice::RemoveItem => "Remove Item",
            MenuChoice::ViewItem => "Get Item Details",
            MenuChoice::PlaceOrder => "Place Order",
            MenuChoice::AddSupplier => "Add Supplier",
            MenuChoice::UpdateSupplier => "Update Supplier",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Print the main menu.
pub fn render<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(), CliError> {
    console.say("\nInventory Management System")?;
    for choice in MenuChoice::ALL {
        console.say(format!("{}. {}", choice.key(), choice.label()))?;
    }
    Ok(())
}
