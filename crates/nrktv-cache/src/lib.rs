//! Lookup cache for nrktv.
//!
//! Uses `rusqlite` (bundled `SQLite`) to cache expensive per-item
//! lookups from the NRK playback service, keyed by request URL and
//! bounded by a fixed time-to-live.

mod connection;
mod migrations;
mod store;

pub use connection::open_db;
pub use store::{DEFAULT_TTL_HOURS, LookupCache};
