//! Shared Kernel - Domain-crossing minimal core
//!
//! Holds the error vocabulary the HTTP surface agrees on:
//! - [`error::app_error::AppError`], the error every handler returns
//! - [`error::kind::ErrorKind`], its HTTP classification
//! - Problem-details rendering behind the `axum` feature
//!
//! Anything that would pull in a domain concept belongs elsewhere.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
