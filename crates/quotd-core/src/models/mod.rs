//! Data models for quotd

mod quote;

pub use quote::{Quote, ValidationError};
