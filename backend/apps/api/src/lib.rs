//! Password demo service
//!
//! Hashes a fixed plaintext with bcrypt at startup, verifies it against the
//! fresh hash, and serves a near-empty HTTP application alongside.

pub mod app;
pub mod config;
pub mod demo;
pub mod harness;

pub use config::{ConfigError, DemoConfig, ServerConfig};
pub use demo::{DemoError, DemoReport};

#[cfg(test)]
mod tests;
