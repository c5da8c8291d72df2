//! Geodrill Core - Domain models, configuration, and data-source port
//!
//! This crate contains the drill-down domain types shared by the resolver,
//! the navigator, and the HTTP adapter.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{GeodrillError, Result};
