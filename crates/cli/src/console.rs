//! Line-oriented console: prompts on the writer, answers from the reader.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use stockroom_auth::{LoginAttempt, LoginError, LoginPrompt};

use crate::CliError;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<(), CliError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `label` (no newline) and read one line, without its line ending.
    pub fn prompt(&mut self, label: &str) -> Result<String, CliError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prompt for a number; unparsable input is a [`CliError::MalformedNumber`].
    pub fn prompt_number<T>(&mut self, label: &str, field: &'static str) -> Result<T, CliError>
    where
        T: FromStr,
    {
        let raw = self.prompt(label)?;
        raw.trim().parse::<T>().map_err(|_| {
            tracing::warn!(field, input = %raw, "malformed number");
            CliError::MalformedNumber { field, input: raw }
        })
    }

    /// Prompt for a price. Scientific notation (`1e3`) is accepted.
    pub fn prompt_price(&mut self, label: &str) -> Result<Decimal, CliError> {
        let raw = self.prompt(label)?;
        let trimmed = raw.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| {
                tracing::warn!(field = "price", input = %raw, "malformed number");
                CliError::MalformedNumber { field: "price", input: raw }
            })
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> LoginPrompt for Console<R, W> {
    fn next_attempt(&mut self) -> Result<Option<LoginAttempt>, LoginError> {
        let username = match self.prompt("Enter username: ") {
            Ok(username) => username,
            Err(CliError::InputClosed) => return Ok(None),
            Err(err) => return Err(LoginError::Prompt(err.to_string())),
        };
        let password = match self.prompt("Enter password: ") {
            Ok(password) => password,
            Err(CliError::InputClosed) => return Ok(None),
            Err(err) => return Err(LoginError::Prompt(err.to_string())),
        };
        Ok(Some(LoginAttempt::new(username, password)))
    }

    fn rejected(&mut self, _error: &LoginError) -> Result<(), LoginError> {
        self.say("Invalid username or password. Please try again.")
            .map_err(|err| LoginError::Prompt(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn prompt_strips_line_endings_only() {
        let mut console = console("  Blue Widget \r\n");
        assert_eq!(console.prompt("Name: ").unwrap(), "  Blue Widget ");
        let (_, output) = console.into_inner();
        assert_eq!(String::from_utf8(output).unwrap(), "Name: ");
    }

    #[test]
    fn prompt_at_end_of_input_reports_closed() {
        let mut console = console("");
        assert!(matches!(console.prompt("x: "), Err(CliError::InputClosed)));
    }

    #[test]
    fn numbers_are_trimmed_then_parsed() {
        let mut console = console(" 42 \nabc\n");
        let n: i64 = console.prompt_number("n: ", "quantity").unwrap();
        assert_eq!(n, 42);

        match console.prompt_number::<i64>("n: ", "quantity") {
            Err(CliError::MalformedNumber { field, input }) => {
                assert_eq!(field, "quantity");
                assert_eq!(input, "abc");
            }
            other => panic!("Expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn prices_accept_plain_and_scientific_forms() {
        let mut console = console("2.50\n1e3\n1.5e-1\nfree\n");
        assert_eq!(console.prompt_price("p: ").unwrap(), Decimal::new(250, 2));
        assert_eq!(console.prompt_price("p: ").unwrap(), Decimal::from(1000));
        assert_eq!(console.prompt_price("p: ").unwrap(), Decimal::new(15, 2));

        match console.prompt_price("p: ") {
            Err(CliError::MalformedNumber { field, input }) => {
                assert_eq!(field, "price");
                assert_eq!(input, "free");
            }
            other => panic!("Expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn login_prompt_reads_username_then_password() {
        let mut console = console("admin\nadmin123\n");
        let attempt = console.next_attempt().unwrap().unwrap();
        assert_eq!(attempt, LoginAttempt::new("admin", "admin123"));
        assert_eq!(console.next_attempt().unwrap(), None);
    }
}
