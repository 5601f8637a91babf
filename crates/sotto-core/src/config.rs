//! Process-environment configuration.
//!
//! Missing any required value is fatal at startup, before any
//! connection attempt.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default liveness probe port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default ledger document path, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = "data/ledger.json";

/// Default display label appended after the id on anonymous posts.
pub const DEFAULT_ANONYMOUS_LABEL: &str = "Anonymous";

/// Startup configuration for the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Chat platform bot credential.
    pub bot_token: String,
    /// Public channel hosting the entry point.
    pub channel_id: String,
    /// Anonymous publish (webhook) credential.
    pub webhook_url: String,
    /// Community the relay serves.
    pub guild_id: String,
    /// Liveness probe listen port.
    pub port: u16,
    /// Ledger document path.
    pub ledger_path: PathBuf,
    /// Display label for anonymous posts.
    pub anonymous_label: String,
}

impl RelayConfig {
    /// Read configuration from the process environment.
    ///
    /// Required: `BOT_TOKEN`, `CHANNEL_ID`, `WEBHOOK_URL`, `GUILD_ID`.
    /// Optional: `PORT`, `LEDGER_PATH`, `ANON_LABEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an injectable lookup, so the parsing
    /// rules are testable without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required =
            |name: &'static str| lookup(name).ok_or(ConfigError::Missing { name });

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("not a port number: {raw}"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            channel_id: required("CHANNEL_ID")?,
            webhook_url: required("WEBHOOK_URL")?,
            guild_id: required("GUILD_ID")?,
            port,
            ledger_path: lookup("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| DEFAULT_LEDGER_PATH.into()),
            anonymous_label: lookup("ANON_LABEL")
                .unwrap_or_else(|| DEFAULT_ANONYMOUS_LABEL.to_string()),
        })
    }
}
