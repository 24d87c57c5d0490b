//! Normalized content types and the static category catalog.

use super::urls;

/// One normalized program, episode, or search result.
///
/// Items are value objects: constructed once per request with every field
/// explicit, never mutated afterwards. Sequence order is presentation
/// order and follows the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Display title, HTML-entity-decoded.
    pub title: String,
    /// Descriptive text, where the source listing carries one.
    pub description: Option<String>,
    /// Relative or absolute locator for the next navigation step or
    /// media id.
    pub url: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Fanart image URL, derived deterministically from the item's
    /// identifying path segment.
    pub fanart: String,
}

impl ContentItem {
    /// Builds an item sequence from parallel columns, deriving each
    /// item's fanart from its url.
    ///
    /// Extraction routines that read titles, urls, and thumbnails as
    /// separate per-document passes zip them back together here; the
    /// shortest column bounds the sequence.
    pub(crate) fn from_columns(
        titles: Vec<String>,
        urls: Vec<String>,
        thumbnails: Vec<String>,
        descriptions: Option<Vec<String>>,
    ) -> Vec<Self> {
        let mut descriptions = descriptions.map(Vec::into_iter);
        titles
            .into_iter()
            .zip(urls)
            .zip(thumbnails)
            .map(|((title, url), thumbnail)| {
                let description = descriptions.as_mut().and_then(Iterator::next);
                let fanart = urls::fanart_url(&url);
                Self {
                    title,
                    description,
                    url,
                    thumbnail,
                    fanart,
                }
            })
            .collect()
    }
}

/// Live channel playback location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStream {
    /// Stream locator from the player element.
    pub stream_url: String,
    /// Poster image URL shown before playback starts.
    pub poster_url: String,
}

/// One entry of the static category catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Display name.
    pub name: &'static str,
    /// Machine id used in listing paths.
    pub id: &'static str,
}

/// The category catalog, hand-maintained to match the site's sections.
static CATEGORIES: [Category; 9] = [
    Category {
        name: "Barn",
        id: "barn",
    },
    Category {
        name: "Dokumentar og fakta",
        id: "dokumentar-og-fakta",
    },
    Category {
        name: "Filmer og serier",
        id: "filmer-og-serier",
    },
    Category {
        name: "Helse, forbruker og livsstil",
        id: "helse-forbruker-og-livsstil",
    },
    Category {
        name: "Kultur og underholdning",
        id: "kultur-og-underholdning",
    },
    Category {
        name: "Nyheter",
        id: "nyheter",
    },
    Category {
        name: "Samisk",
        id: "samisk",
    },
    Category {
        name: "Sport",
        id: "sport",
    },
    Category {
        name: "Tegnspråk",
        id: "tegnspraak",
    },
];

/// Returns the category catalog in display order. Never fetched remotely.
#[must_use]
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}
