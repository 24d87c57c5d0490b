//! `MediaClient` - NRK playback service client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

/// Default base URL for the playback service API.
const DEFAULT_BASE_URL: &str = "http://v7.psapi.nrk.no";

/// Default User-Agent presented to the service.
const DEFAULT_USER_AGENT: &str = "xbmc.org";

/// One media-element document. Only the fields this module reads are
/// decoded; description extraction goes through the raw document text so
/// the cached payload stays selectively extractable.
#[derive(Debug, Deserialize)]
struct MediaElement {
    /// Playable stream URL.
    #[serde(rename = "mediaUrl")]
    media_url: String,
}

/// NRK playback service client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MediaClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL.
    base_url: Url,
}

/// Builder for `MediaClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MediaClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl MediaClientBuilder {
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
    pub fn build(self) -> Result<MediaClient> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(MediaClient {
            http_client,
            base_url,
        })
    }
}

impl MediaClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> MediaClientBuilder {
        MediaClientBuilder::new()
    }

    /// Builds the media-element document URL for a video id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not form a valid URL path segment.
    pub fn mediaelement_url(&self, video_id: &str) -> Result<Url> {
        self.base_url
            .join(&format!("/mediaelement/{video_id}"))
            .with_context(|| format!("failed to build mediaelement URL for {video_id}"))
    }

    /// Resolves the playable media URL for a video id.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the document misses
    /// the media URL field.
    #[instrument(skip_all)]
    pub async fn media_url(&self, video_id: &str) -> Result<String> {
        let url = self.mediaelement_url(video_id)?;
        let element = self
            .http_client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET mediaelement/{video_id} failed"))?
            .json::<MediaElement>()
            .await
            .with_context(|| format!("failed to decode mediaelement/{video_id} response"))?;
        Ok(element.media_url)
    }

    /// Fetches a document as raw text.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read {url} response"))?;

        tracing::debug!(%url, %status, body_len = body.len(), "Response body received");
        Ok(body)
    }
}
