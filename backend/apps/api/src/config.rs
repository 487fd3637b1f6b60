//! Runtime Configuration
//!
//! Everything is read from the environment (optionally seeded from `.env`).
//! Parsing goes through a lookup closure so tests can feed values without
//! touching the process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use platform::password::DEFAULT_COST;
use thiserror::Error;

/// Port used when `PORT` is absent or empty
pub const DEFAULT_PORT: u16 = 3000;

/// Plaintext hashed by the startup pipeline
pub const DEMO_PLAINTEXT: &str = "sUperpassw0rd!";

/// Plaintext that must not verify against the demo hash
pub const DEMO_DECOY: &str = "pass123";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be an integer between 0 and 65535 (got {value:?})")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("HOST must be an IP address (got {value:?})")]
    InvalidHost {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("SALT_ROUNDS must be a non-negative integer (got {value:?})")]
    InvalidSaltRounds {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Reads a variable, treating an empty value the same as an unset one
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match non_empty(&lookup, "PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        let host = match non_empty(&lookup, "HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { value, source })?,
            None => defaults.host,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Inputs of the startup hash-then-verify pipeline
///
/// `salt_rounds` stays unchecked here; the range is enforced by the hash
/// stage so a bad value ends the pipeline instead of the process.
#[derive(Clone)]
pub struct DemoConfig {
    pub plaintext: String,
    pub decoy: String,
    pub salt_rounds: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            plaintext: DEMO_PLAINTEXT.to_string(),
            decoy: DEMO_DECOY.to_string(),
            salt_rounds: DEFAULT_COST,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_empty(&lookup, "SALT_ROUNDS") {
            config.salt_rounds = value
                .parse::<u32>()
                .map_err(|source| ConfigError::InvalidSaltRounds { value, source })?;
        }

        Ok(config)
    }
}

impl fmt::Debug for DemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoConfig")
            .field("plaintext", &"[REDACTED]")
            .field("decoy", &"[REDACTED]")
            .field("salt_rounds", &self.salt_rounds)
            .finish()
    }
}
