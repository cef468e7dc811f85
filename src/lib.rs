//! Core library for the token-swap form.
//!
//! Price feed ingestion, catalog normalization, rate quoting, swap
//! validation and the session state machine that ties them together.
//! Rendering is left to whoever drives a `SwapSession`.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod feed;
pub mod ledger;
pub mod models;
pub mod session;
pub mod settings;
pub mod swap;
pub mod utils;
