use anyhow::Result;
use clap::{Parser, ValueEnum};

use stockroom_auth::{RetryPolicy, StaticCredentials};
use stockroom_observability::{LogFormat, TracingConfig};

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "stockroom", about = "Interactive in-memory inventory tracker", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "STOCKROOM_USERNAME",
        value_name = "NAME",
        help = "Operator username accepted at login"
    )]
    pub username: Option<String>,

    #[arg(
        long,
        env = "STOCKROOM_PASSWORD",
        hide_env_values = true,
        value_name = "PASSWORD",
        help = "Operator password accepted at login"
    )]
    pub password: Option<String>,

    #[arg(
        long,
        env = "STOCKROOM_MAX_LOGIN_ATTEMPTS",
        value_name = "N",
        help = "Give up after N failed logins (0 or unset: keep asking)"
    )]
    pub max_login_attempts: Option<u32>,

    #[arg(
        long,
        env = "STOCKROOM_LOG",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_filter: Option<String>,

    #[arg(
        long,
        env = "STOCKROOM_LOG_FORMAT",
        value_enum,
        value_name = "FORMAT",
        help = "Log output format (pretty or json)"
    )]
    pub log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub username: String,
    pub password: String,
    pub retry_policy: RetryPolicy,
    pub tracing: TracingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            retry_policy: RetryPolicy::Unbounded,
            tracing: TracingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            username,
            password,
            max_login_attempts,
            log_filter,
            log_format,
        } = args;

        let username = username
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        anyhow::ensure!(!username.is_empty(), "username cannot be empty");

        let password = password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        anyhow::ensure!(!password.is_empty(), "password cannot be empty");

        let default_filter = log_filter
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            username,
            password,
            retry_policy: RetryPolicy::from_max_attempts(max_login_attempts),
            tracing: TracingConfig {
                default_filter,
                format: log_format.map(LogFormat::from).unwrap_or_default(),
            },
        })
    }

    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::single(self.username.clone(), self.password.clone())
    }

    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn empty_args_give_the_built_in_defaults() {
        let config = AppConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "admin123");
        assert_eq!(config.retry_policy, RetryPolicy::Unbounded);
        assert_eq!(config.tracing.default_filter, "warn");
        assert_eq!(config.tracing.format, LogFormat::Pretty);
        assert!(config.uses_default_password());
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "stockroom",
            "--username",
            "clerk",
            "--password",
            "hunter2",
            "--max-login-attempts",
            "3",
            "--log-filter",
            "stockroom_inventory=debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = AppConfig::from_args(args).unwrap();

        assert_eq!(config.username, "clerk");
        assert_eq!(config.password, "hunter2");
        assert_eq!(
            config.retry_policy,
            RetryPolicy::Limited(NonZeroU32::new(3).unwrap())
        );
        assert_eq!(config.tracing.default_filter, "stockroom_inventory=debug");
        assert_eq!(config.tracing.format, LogFormat::Json);
        assert!(!config.uses_default_password());
    }

    #[test]
    fn blank_username_is_rejected() {
        let args = CliArgs {
            username: Some("  ".to_string()),
            ..CliArgs::default()
        };
        assert!(AppConfig::from_args(args).is_err());
    }
}
