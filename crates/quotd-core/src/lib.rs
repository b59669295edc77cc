//! quotd-core - Core library for quotd
//!
//! This crate contains the quote collection store, its durability layer,
//! and the server reconciliation logic shared by all quotd interfaces.

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use models::{Quote, ValidationError};
pub use store::QuoteStore;
