//! HTML normalizer routines for the tv.nrk.no listing pages.
//!
//! Each routine maps one raw HTML response into an ordered sequence of
//! [`ContentItem`]s (or, for live pages, a [`LiveStream`]). A missing
//! expected element fails the whole routine; there is no partial-result
//! recovery.

use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use scraper::{ElementRef, Html, Selector};

use super::types::{ContentItem, LiveStream};
use super::urls;

#[allow(clippy::expect_used)]
static RECOMMENDED_LIST: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.recommended-list").expect("failed to compile recommended-list selector")
});
#[allow(clippy::expect_used)]
static SEASON_MENU_ITEM: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li.season-menu-item").expect("failed to compile season-menu selector")
});
#[allow(clippy::expect_used)]
static EPISODE_LIST: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("ul.episode-list").expect("failed to compile episode-list selector")
});
#[allow(clippy::expect_used)]
static PLAYER_ELEMENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div#playerelement").expect("failed to compile player selector")
});
#[allow(clippy::expect_used)]
static POSTER_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.poster").expect("failed to compile poster selector"));
#[allow(clippy::expect_used)]
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("failed to compile li selector"));
#[allow(clippy::expect_used)]
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("failed to compile anchor selector"));
#[allow(clippy::expect_used)]
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("failed to compile img selector"));
#[allow(clippy::expect_used)]
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("failed to compile heading selector"));
#[allow(clippy::expect_used)]
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("failed to compile paragraph selector"));

/// Decodes HTML entities in text arriving outside of a parsed document.
///
/// Listing JSON carries entity-encoded titles; text extracted from parsed
/// documents is already decoded by the parser.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}

/// Visible text of an element with all markup stripped, trimmed.
fn stripped_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Normalizes the front-page recommendation container.
///
/// Titles come from image alt texts, locators from anchor hrefs, and
/// thumbnails from image sources, read as parallel columns in document
/// order.
pub(crate) fn parse_recommended(html: &str) -> Result<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let container = document
        .select(&RECOMMENDED_LIST)
        .next()
        .context("recommended-list container not found")?;

    let titles: Vec<String> = container
        .select(&IMAGE)
        .filter_map(|img| img.value().attr("alt"))
        .map(ToOwned::to_owned)
        .collect();
    let urls: Vec<String> = container
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(ToOwned::to_owned)
        .collect();
    let thumbnails: Vec<String> = container
        .select(&IMAGE)
        .filter_map(|img| img.value().attr("src"))
        .map(ToOwned::to_owned)
        .collect();

    Ok(ContentItem::from_columns(titles, urls, thumbnails, None))
}

/// Normalizes a search results page.
///
/// Every list item must carry exactly one image, link, and heading; a
/// zero match fails the operation. Absolute result links have the fixed
/// site prefix stripped so they stay relative.
pub(crate) fn parse_search_results(html: &str) -> Result<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for li in document.select(&LIST_ITEM) {
        let image = li
            .select(&IMAGE)
            .next()
            .context("search result item has no image")?;
        let title = image
            .value()
            .attr("alt")
            .context("search result image has no alt text")?
            .to_owned();
        let thumbnail = image
            .value()
            .attr("src")
            .context("search result image has no src")?
            .to_owned();

        let href = li
            .select(&ANCHOR)
            .next()
            .context("search result item has no link")?
            .value()
            .attr("href")
            .context("search result link has no href")?;
        let url = href.strip_prefix(urls::TV_BASE_URL).unwrap_or(href).to_owned();

        let heading = li
            .select(&HEADING)
            .next()
            .context("search result item has no heading")?;
        let description = stripped_text(heading);

        let fanart = urls::fanart_url(&url);
        items.push(ContentItem {
            title,
            description: Some(description),
            url,
            thumbnail,
            fanart,
        });
    }

    Ok(items)
}

/// Normalizes the season menu of a series page.
///
/// Locators are synthesized from the series and season ids; artwork is
/// the series-derived pair repeated for every season.
pub(crate) fn parse_seasons(html: &str, series_id: &str) -> Result<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let thumbnail = urls::thumb_url(series_id);
    let fanart = urls::fanart_url(series_id);
    let mut items = Vec::new();

    for li in document.select(&SEASON_MENU_ITEM) {
        let anchor = li
            .select(&ANCHOR)
            .next()
            .context("season menu item has no link")?;
        let title = stripped_text(anchor);
        let season_id = anchor
            .value()
            .attr("data-season")
            .context("season menu link has no data-season attribute")?;

        items.push(ContentItem {
            title,
            description: None,
            url: urls::episodes_path(series_id, season_id),
            thumbnail: thumbnail.clone(),
            fanart: fanart.clone(),
        });
    }

    Ok(items)
}

/// Normalizes a season's episode list.
///
/// The page must contain exactly one episode-list container. Items whose
/// class marks them as without playback rights are excluded; artwork is
/// the series-derived pair repeated for every episode.
pub(crate) fn parse_episodes(html: &str, series_id: &str) -> Result<Vec<ContentItem>> {
    let document = Html::parse_document(html);

    let mut containers = document.select(&EPISODE_LIST);
    let list = containers.next().context("episode list not found")?;
    if containers.next().is_some() {
        bail!("multiple episode lists found");
    }

    let thumbnail = urls::thumb_url(series_id);
    let fanart = urls::fanart_url(series_id);
    let mut items = Vec::new();

    for li in list.select(&LIST_ITEM) {
        let no_rights = li
            .value()
            .attr("class")
            .is_some_and(|class| class.contains("no-rights"));
        if no_rights {
            continue;
        }

        let heading = li
            .select(&HEADING)
            .next()
            .context("episode item has no heading")?;
        let title = stripped_text(heading);

        let url = li
            .select(&ANCHOR)
            .next()
            .context("episode item has no link")?
            .value()
            .attr("href")
            .context("episode link has no href")?
            .to_owned();

        let synopsis = li
            .select(&PARAGRAPH)
            .next()
            .context("episode item has no synopsis")?;
        let description = stripped_text(synopsis);

        items.push(ContentItem {
            title,
            description: Some(description),
            url,
            thumbnail: thumbnail.clone(),
            fanart: fanart.clone(),
        });
    }

    Ok(items)
}

/// Extracts the stream locator and poster image from a live channel page.
pub(crate) fn parse_live(html: &str) -> Result<LiveStream> {
    let document = Html::parse_document(html);

    let stream_url = document
        .select(&PLAYER_ELEMENT)
        .next()
        .context("player element not found")?
        .value()
        .attr("data-media")
        .context("player element has no data-media attribute")?
        .to_owned();

    let poster_url = document
        .select(&POSTER_IMG)
        .next()
        .context("poster image not found")?
        .value()
        .attr("src")
        .context("poster image has no src")?
        .to_owned();

    Ok(LiveStream {
        stream_url,
        poster_url,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_decode_entities() {
        // Arrange & Act & Assert
        assert_eq!(decode_entities("Br&#248;drene Dal"), "Brødrene Dal");
        assert_eq!(decode_entities("Fakta &amp; fiksjon"), "Fakta & fiksjon");
        assert_eq!(decode_entities("plain title"), "plain title");
    }

    #[test]
    fn test_parse_recommended() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/recommended.html");

        // Act
        let items = parse_recommended(html).unwrap();

        // Assert
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Nytt på nytt");
        assert_eq!(items[0].url, "/serie/nytt-paa-nytt");
        assert_eq!(items[0].thumbnail, "http://m.nrk.no/img/55555_300.jpg");
        assert_eq!(items[0].fanart, "http://nrk.eu01.aws.af.cm/f/serie/nytt-paa-nytt");
        assert_eq!(items[1].title, "Skam");
    }

    #[test]
    fn test_parse_recommended_without_container_fails() {
        // Arrange
        let html = "<html><body><div class='other'></div></body></html>";

        // Act
        let result = parse_recommended(html);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_search_results() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/search_results.html");

        // Act
        let items = parse_search_results(html).unwrap();

        // Assert: fields drawn positionally from each list item
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Skam");
        assert_eq!(items[0].url, "/serie/skam");
        assert_eq!(items[0].description.as_deref(), Some("Skam sesong 3"));
        assert_eq!(items[0].thumbnail, "http://m.nrk.no/img/70001_300.jpg");
        assert_eq!(items[1].title, "Folkeopplysningen");
        assert_eq!(items[1].url, "/program/KOID75000316/folkeopplysningen");
    }

    #[test]
    fn test_parse_search_results_strips_site_prefix() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/search_results.html");

        // Act
        let items = parse_search_results(html).unwrap();

        // Assert
        for item in &items {
            assert!(!item.url.starts_with("http://tv.nrk.no"));
            assert_eq!(item.fanart, urls::fanart_url(&item.url));
        }
    }

    #[test]
    fn test_parse_search_results_missing_image_fails() {
        // Arrange: a result item with no image is a shape error
        let html = "<ul><li><a href='/serie/x'></a><h3>X</h3></li></ul>";

        // Act
        let result = parse_search_results(html);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seasons() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/seasons.html");

        // Act
        let items = parse_seasons(html, "brannmann-sam").unwrap();

        // Assert
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Sesong 5");
        assert_eq!(items[0].url, "/program/Episodes/brannmann-sam/5/0");
        assert_eq!(items[2].title, "Ekstramateriale");
        assert_eq!(items[2].url, "/program/Episodes/brannmann-sam/ekstramateriale/0");
    }

    #[test]
    fn test_parse_seasons_repeats_series_artwork() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/seasons.html");

        // Act
        let items = parse_seasons(html, "brannmann-sam").unwrap();

        // Assert: the same two derived URLs for every season
        for item in &items {
            assert_eq!(item.thumbnail, "http://nrk.eu01.aws.af.cm/t/brannmann-sam");
            assert_eq!(item.fanart, "http://nrk.eu01.aws.af.cm/f/brannmann-sam");
        }
    }

    #[test]
    fn test_parse_episodes() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/episodes.html");

        // Act
        let items = parse_episodes(html, "brannmann-sam").unwrap();

        // Assert: the no-rights item is excluded, order preserved
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "3:4 Brannmann Sam");
        assert_eq!(
            items[0].url,
            "/serie/brannmann-sam/MSUI28009314/sesong-3/episode-4"
        );
        assert_eq!(
            items[0].description.as_deref(),
            Some("Sam redder dagen nok en gang.")
        );
        assert_eq!(items[1].title, "3:6 Brannmann Sam");
        assert_eq!(
            items[1].description.as_deref(),
            Some("Norman får seg en overraskelse.")
        );
    }

    #[test]
    fn test_parse_episodes_repeats_series_artwork() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/episodes.html");

        // Act
        let items = parse_episodes(html, "brannmann-sam").unwrap();

        // Assert
        for item in &items {
            assert_eq!(item.thumbnail, "http://nrk.eu01.aws.af.cm/t/brannmann-sam");
            assert_eq!(item.fanart, "http://nrk.eu01.aws.af.cm/f/brannmann-sam");
        }
    }

    #[test]
    fn test_parse_episodes_without_list_fails() {
        // Arrange
        let html = "<html><body><ul class='other-list'></ul></body></html>";

        // Act
        let result = parse_episodes(html, "x");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_episodes_with_duplicate_lists_fails() {
        // Arrange
        let html = "<html><body>\
            <ul class='episode-list'></ul>\
            <ul class='episode-list'></ul>\
            </body></html>";

        // Act
        let result = parse_episodes(html, "x");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_live() {
        // Arrange
        let html = include_str!("../../../../fixtures/nrk/live.html");

        // Act
        let live = parse_live(html).unwrap();

        // Assert
        assert_eq!(
            live.stream_url,
            "http://nordond35b-f.akamaihd.net/i/no/open/nrk1/nrk1_0@1423/master.m3u8"
        );
        assert_eq!(live.poster_url, "http://m.nrk.no/img/direkte_nrk1_poster.jpg");
    }

    #[test]
    fn test_parse_live_without_player_fails() {
        // Arrange
        let html = "<html><body><p>offline</p></body></html>";

        // Act
        let result = parse_live(html);

        // Assert
        assert!(result.is_err());
    }
}
