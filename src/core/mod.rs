//! Core types for Gazelle
//!
//! This module holds the error types shared by the resolver, the rule generator,
//! the package walker and the command layer.
//!
//! - [`GazelleError`] - Enumerated error types covering every failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format

pub mod error;

pub use error::{ErrorContext, GazelleError, Result, user_friendly_error};
