//! Cached description lookups against the playback service.
//!
//! Descriptions are the one per-item lookup expensive enough to cache:
//! the raw media-element document is stored under its request URL in the
//! TTL-bounded [`LookupCache`] and fields are extracted from it by name.

use anyhow::{Context, Result};
use nrktv_cache::LookupCache;
use tracing::instrument;
use url::Url;

use super::client::MediaClient;

/// Result of reading one field out of the cache.
#[derive(Debug)]
enum CacheOutcome {
    /// Entry present and the field extracted.
    Hit(String),
    /// No entry for the key.
    Miss,
    /// Entry present but not parsable as JSON or missing the field.
    Corrupted,
}

/// Extracts a string field from a raw JSON document by name.
fn extract_field(raw: &str, field: &str) -> Result<String> {
    let document: serde_json::Value =
        serde_json::from_str(raw).context("document is not valid JSON")?;
    let value = document
        .get(field)
        .with_context(|| format!("document has no {field} field"))?
        .as_str()
        .with_context(|| format!("{field} field is not a string"))?;
    Ok(String::from(value))
}

/// Reads `field` from the cached document under `key`, if any.
///
/// A corrupted entry reads as [`CacheOutcome::Corrupted`] rather than an
/// error; only backend failures propagate.
fn read_cached_field(store: &LookupCache, key: &str, field: &str) -> Result<CacheOutcome> {
    let Some(raw) = store.get(key)? else {
        return Ok(CacheOutcome::Miss);
    };
    match extract_field(&raw, field) {
        Ok(value) => Ok(CacheOutcome::Hit(value)),
        Err(error) => {
            tracing::debug!(%key, %error, "ignoring corrupted cache entry");
            Ok(CacheOutcome::Corrupted)
        }
    }
}

/// Reads `field` from the JSON document at `url`, caching the raw
/// document text under the URL.
///
/// A corrupted cache entry is treated as a miss and replaced by a fresh
/// fetch: the stale entry is deleted, the fresh text written, and the
/// field extracted from the fresh text.
///
/// # Errors
///
/// Returns an error if the cache backend fails, or if the fresh fetch,
/// parse, or extraction fails. Cache corruption itself is never
/// surfaced.
pub async fn cached_field(
    store: &LookupCache,
    client: &MediaClient,
    url: &Url,
    field: &str,
) -> Result<String> {
    match read_cached_field(store, url.as_str(), field)? {
        CacheOutcome::Hit(value) => return Ok(value),
        CacheOutcome::Miss | CacheOutcome::Corrupted => {}
    }

    let fresh = client.get_text(url.clone()).await?;
    store.delete(url.as_str())?;
    store.set(url.as_str(), &fresh)?;
    extract_field(&fresh, field)
}

/// Resolves the descriptive text for a listed item.
///
/// The video id is the fourth path segment of the item locator. Listing
/// rendering must survive a single broken description, so this is the
/// one operation that swallows every failure and returns an empty
/// string instead.
#[instrument(skip_all)]
pub async fn resolve_description(
    store: &LookupCache,
    client: &MediaClient,
    locator: &str,
) -> String {
    match try_resolve(store, client, locator).await {
        Ok(description) => description,
        Err(error) => {
            tracing::debug!(%locator, %error, "description lookup failed");
            String::new()
        }
    }
}

/// Fallible inner path of [`resolve_description`].
async fn try_resolve(store: &LookupCache, client: &MediaClient, locator: &str) -> Result<String> {
    let video_id = locator
        .split('/')
        .nth(3)
        .context("locator has no video id segment")?;
    let url = client.mediaelement_url(video_id)?;
    cached_field(store, client, &url, "description").await
}
