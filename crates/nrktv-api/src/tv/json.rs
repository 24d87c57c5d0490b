//! JSON response types for the tv.nrk.no listing endpoints.

use serde::Deserialize;

/// One program descriptor from the letter/category listing arrays.
#[derive(Debug, Deserialize)]
pub struct ProgramDescriptor {
    /// Program title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Relative program locator.
    #[serde(rename = "Url")]
    pub url: String,
    /// Thumbnail image URL.
    #[serde(rename = "ImageUrl")]
    pub image_url: String,
    /// Whether the program may be played on demand.
    #[serde(rename = "hasOndemandRights")]
    pub has_ondemand_rights: bool,
}

/// `listobjects` response envelope (most-recent / most-popular).
#[derive(Debug, Deserialize)]
pub struct ListObjectsEnvelope {
    /// Listed items, at most 100 per page.
    #[serde(rename = "Data")]
    pub data: Vec<ListObjectsItem>,
}

/// One item of a `listobjects` envelope.
#[derive(Debug, Deserialize)]
pub struct ListObjectsItem {
    /// Program title, possibly entity-encoded.
    #[serde(rename = "Title")]
    pub title: String,
    /// Relative program locator.
    #[serde(rename = "Url")]
    pub url: String,
    /// Image renditions; the first entry is the listing thumbnail.
    #[serde(rename = "Images")]
    pub images: Vec<ImageRef>,
}

/// One image rendition reference.
#[derive(Debug, Deserialize)]
pub struct ImageRef {
    /// Image URL.
    #[serde(rename = "ImageUrl")]
    pub image_url: String,
}
