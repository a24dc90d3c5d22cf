//! Integration test suite for Gazelle
//!
//! These tests run the `gazelle` binary against Go source trees written into
//! temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **generate**: fix and print modes, layout styles, idempotence
//! - **config**: `gazelle.toml` loading and flag precedence
//! - **errors**: failures and their user-facing reports

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config;
mod errors;
mod generate;
