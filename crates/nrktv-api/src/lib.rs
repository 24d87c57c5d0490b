//! Client library for nrktv.
//!
//! Provides clients for the NRK TV website listing endpoints and the
//! NRK playback service (psapi).

/// NRK TV website client (listings, search, seasons, live).
pub mod tv;

/// NRK playback service client (media URLs, cached descriptions).
pub mod psapi;
