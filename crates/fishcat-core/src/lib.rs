//! Fishcat Core - Domain models, slug derivation, and configuration
//!
//! This crate contains the core domain logic for the fisheries spatial catalog.

pub mod config;
pub mod error;
pub mod models;
pub mod slug;

pub use error::{CatalogError, Result};
