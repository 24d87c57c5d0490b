//! NRK playback service (psapi) client module.
//!
//! Resolves playable media URLs for video ids and serves per-item
//! descriptions through the TTL-bounded lookup cache.

mod client;
mod descriptions;

#[allow(clippy::module_name_repetitions)]
pub use client::{MediaClient, MediaClientBuilder};
pub use descriptions::{cached_field, resolve_description};
