//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and verification (bcrypt with a tunable cost factor)
//! - Blocking-pool wrappers so hashing never stalls the async runtime

pub mod password;
