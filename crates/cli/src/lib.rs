//! `stockroom-cli` — interactive console front end.
//!
//! Owns every piece of I/O: configuration, the login prompt, and the menu
//! session driving the [`Inventory`] aggregate.

use std::io::{BufRead, Write};

use stockroom_auth::authenticate;
use stockroom_inventory::Inventory;

pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod session;

pub use config::{AppConfig, CliArgs};
pub use console::Console;
pub use error::CliError;
pub use menu::MenuChoice;
pub use session::Session;

/// Log in, then run the menu until the operator exits or input closes.
///
/// Returns the inventory as it stood when the session ended.
pub fn run<R, W>(config: &AppConfig, input: R, output: W) -> Result<Inventory, CliError>
where
    R: BufRead,
    W: Write,
{
    let mut console = Console::new(input, output);

    let principal = authenticate(&mut console, &config.credentials(), config.retry_policy)?;
    console.say("Login successful!")?;

    let span = tracing::info_span!("session", user = %principal);
    let _guard = span.enter();

    let mut session = Session::new(console);
    session.run()?;
    Ok(session.into_inventory())
}
