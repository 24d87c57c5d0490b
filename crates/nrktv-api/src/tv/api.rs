//! `NrkTvApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{ContentItem, LiveStream};

/// NRK TV listing API trait.
///
/// Abstracts the listing operations for mock substitution in front ends.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(NrkTvApi: Send)]
pub trait LocalNrkTvApi {
    /// Lists programs whose title starts with `letter`.
    ///
    /// Only programs with on-demand playback rights are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn programs_by_letter(&self, letter: &str) -> Result<Vec<ContentItem>>;

    /// Lists programs in `category` whose title starts with `letter`.
    ///
    /// Only programs with on-demand playback rights are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn programs_by_category(&self, category: &str, letter: &str)
    -> Result<Vec<ContentItem>>;

    /// Lists the front-page recommendations.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the page misses the
    /// recommendation container.
    async fn recommended(&self) -> Result<Vec<ContentItem>>;

    /// Lists the most recently sent programs (up to 100).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn most_recent(&self) -> Result<Vec<ContentItem>>;

    /// Lists the most popular programs of the last week (up to 100).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn most_popular_week(&self) -> Result<Vec<ContentItem>>;

    /// Lists the most popular programs of the last month (up to 100).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn most_popular_month(&self) -> Result<Vec<ContentItem>>;

    /// Searches programs and episodes, one result page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or any result item
    /// misses an expected field.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<ContentItem>>;

    /// Lists the seasons of a series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or a season entry
    /// misses an expected field.
    async fn seasons(&self, series_id: &str) -> Result<Vec<ContentItem>>;

    /// Lists the playable episodes of a series season.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the page does not
    /// contain exactly one episode list, or an episode misses an
    /// expected field.
    async fn episodes(&self, series_id: &str, season_id: &str) -> Result<Vec<ContentItem>>;

    /// Looks up the live stream locator and poster for a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the page misses the
    /// player or poster element.
    async fn live_stream(&self, channel: &str) -> Result<LiveStream>;
}
