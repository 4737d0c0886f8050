//! Fishcat Store - Storage ports and adapters
//!
//! This crate defines the storage ports for the registry and catalog and
//! provides two adapters: an in-memory store for development and tests, and
//! a PostgreSQL/PostGIS store for production.

pub mod memory;
pub mod ports;
pub mod postgres;
