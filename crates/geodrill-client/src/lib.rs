//! Geodrill Client - Adapters for the stats backend
//!
//! `HttpStatsSource` talks to the REST API; `MemoryStatsSource` serves
//! fixture data for development and testing.

pub mod http;
pub mod memory;

pub use http::HttpStatsSource;
pub use memory::{Fixture, MemoryStatsSource};
