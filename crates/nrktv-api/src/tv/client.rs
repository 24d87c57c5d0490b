//! `TvClient` - NRK TV website client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::instrument;
use url::Url;

use super::api::LocalNrkTvApi;
use super::html;
use super::json::{ListObjectsEnvelope, ProgramDescriptor};
use super::types::{ContentItem, LiveStream};
use super::urls;

/// Default base URL for the NRK TV website.
const DEFAULT_BASE_URL: &str = "http://tv.nrk.no";

/// Default User-Agent presented to the site.
const DEFAULT_USER_AGENT: &str = "xbmc.org";

/// Player-settings cookie selecting the HLS players for on-demand and
/// live playback.
const PLAYER_SETTINGS_COOKIE: &str = "NRK_PLAYER_SETTINGS_TV=devicetype=desktop&preferred-player-odm=hlslink&preferred-player-live=hlslink";

/// NRK TV website client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvClient {
    /// HTTP client (reqwest, gzip enabled, static headers).
    http_client: Client,
    /// Base URL.
    base_url: Url,
}

/// Builder for `TvClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl TvClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the User-Agent (default: `xbmc.org`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TvClient> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(COOKIE, HeaderValue::from_static(PLAYER_SETTINGS_COOKIE));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TvClient {
            http_client,
            base_url,
        })
    }
}

impl TvClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TvClientBuilder {
        TvClientBuilder::new()
    }

    /// Fetches a page as raw text.
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read {path} response"))?;

        tracing::debug!(%path, %status, body_len = body.len(), "Response body received");
        Ok(body)
    }

    /// Fetches and decodes a JSON endpoint.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        tracing::debug!(%path, status = %response.status(), "Response received");

        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode {path} response"))
    }

    /// Normalizes a program-descriptor array, keeping only programs with
    /// on-demand playback rights.
    pub(crate) fn normalize_program_list(descriptors: Vec<ProgramDescriptor>) -> Vec<ContentItem> {
        descriptors
            .into_iter()
            .filter(|descriptor| descriptor.has_ondemand_rights)
            .map(|descriptor| {
                let fanart = urls::fanart_url(&descriptor.url);
                ContentItem {
                    title: descriptor.title,
                    description: None,
                    url: descriptor.url,
                    thumbnail: descriptor.image_url,
                    fanart,
                }
            })
            .collect()
    }

    /// Normalizes a `listobjects` envelope. The first image rendition of
    /// each item becomes the thumbnail; an item without images is a
    /// shape error.
    pub(crate) fn normalize_list_objects(envelope: ListObjectsEnvelope) -> Result<Vec<ContentItem>> {
        envelope
            .data
            .into_iter()
            .map(|item| {
                let thumbnail = item
                    .images
                    .into_iter()
                    .next()
                    .map(|image| image.image_url)
                    .context("list object has no images")?;
                let fanart = urls::fanart_url(&item.url);
                Ok(ContentItem {
                    title: html::decode_entities(&item.title),
                    description: None,
                    url: item.url,
                    thumbnail,
                    fanart,
                })
            })
            .collect()
    }

    /// Fetches and normalizes one `listobjects` page.
    async fn list_objects(&self, path: &str) -> Result<Vec<ContentItem>> {
        let envelope = self.get_json::<ListObjectsEnvelope>(path).await?;
        Self::normalize_list_objects(envelope)
    }
}

impl LocalNrkTvApi for TvClient {
    #[instrument(skip_all)]
    async fn programs_by_letter(&self, letter: &str) -> Result<Vec<ContentItem>> {
        let descriptors = self
            .get_json::<Vec<ProgramDescriptor>>(&format!("/programmer/{letter}"))
            .await?;
        Ok(Self::normalize_program_list(descriptors))
    }

    #[instrument(skip_all)]
    async fn programs_by_category(
        &self,
        category: &str,
        letter: &str,
    ) -> Result<Vec<ContentItem>> {
        let descriptors = self
            .get_json::<Vec<ProgramDescriptor>>(&format!("/programmer/{category}/{letter}"))
            .await?;
        Ok(Self::normalize_program_list(descriptors))
    }

    #[instrument(skip_all)]
    async fn recommended(&self) -> Result<Vec<ContentItem>> {
        let page = self.get_text("/programmer", &[]).await?;
        html::parse_recommended(&page)
    }

    #[instrument(skip_all)]
    async fn most_recent(&self) -> Result<Vec<ContentItem>> {
        self.list_objects("/listobjects/recentlysent.json/page/0/100")
            .await
    }

    #[instrument(skip_all)]
    async fn most_popular_week(&self) -> Result<Vec<ContentItem>> {
        self.list_objects("/listobjects/mostpopular/Week.json/page/0/100")
            .await
    }

    #[instrument(skip_all)]
    async fn most_popular_month(&self) -> Result<Vec<ContentItem>> {
        self.list_objects("/listobjects/mostpopular/Month.json/page/0/100")
            .await
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &str, page: u32) -> Result<Vec<ContentItem>> {
        let body = self
            .get_text(
                "/sokmaxresults",
                &[("q", String::from(query)), ("page", page.to_string())],
            )
            .await?;
        html::parse_search_results(&body)
    }

    #[instrument(skip_all)]
    async fn seasons(&self, series_id: &str) -> Result<Vec<ContentItem>> {
        let page = self.get_text(&format!("/serie/{series_id}"), &[]).await?;
        html::parse_seasons(&page, series_id)
    }

    #[instrument(skip_all)]
    async fn episodes(&self, series_id: &str, season_id: &str) -> Result<Vec<ContentItem>> {
        let page = self
            .get_text(&format!("/program/Episodes/{series_id}/{season_id}"), &[])
            .await?;
        html::parse_episodes(&page, series_id)
    }

    #[instrument(skip_all)]
    async fn live_stream(&self, channel: &str) -> Result<LiveStream> {
        let page = self.get_text(&format!("/direkte/nrk{channel}"), &[]).await?;
        html::parse_live(&page)
    }
}
