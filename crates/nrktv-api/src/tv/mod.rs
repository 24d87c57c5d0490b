//! NRK TV website client module.
//!
//! Handles HTTP requests to the tv.nrk.no listing endpoints and
//! normalizes the heterogeneous HTML and JSON responses into ordered
//! [`ContentItem`] sequences.

mod api;
mod client;
mod html;
mod json;
mod types;
mod urls;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalNrkTvApi, NrkTvApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TvClient, TvClientBuilder};
pub use types::{Category, ContentItem, LiveStream, categories};
pub use urls::{fanart_url, thumb_url};
