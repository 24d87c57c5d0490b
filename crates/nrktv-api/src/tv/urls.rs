//! Deterministic URL construction for listing paths and artwork.

/// Base URL of the NRK TV website, stripped from absolute search-result
/// links so navigation stays relative.
pub(crate) const TV_BASE_URL: &str = "http://tv.nrk.no";

/// Host serving derived thumbnail/fanart renditions.
const STATIC_ART_BASE: &str = "http://nrk.eu01.aws.af.cm";

/// Trims slashes and whitespace so identical ids always map to identical
/// asset URLs.
fn strip_id(id: &str) -> &str {
    id.trim_matches(|c: char| c == '/' || c.is_whitespace())
}

/// Thumbnail URL for an identifying path segment.
#[must_use]
pub fn thumb_url(id: &str) -> String {
    format!("{STATIC_ART_BASE}/t/{}", strip_id(id))
}

/// Fanart URL for an identifying path segment.
#[must_use]
pub fn fanart_url(id: &str) -> String {
    format!("{STATIC_ART_BASE}/f/{}", strip_id(id))
}

/// Relative episode-listing path for a series season.
pub(crate) fn episodes_path(series_id: &str, season_id: &str) -> String {
    format!("/program/Episodes/{series_id}/{season_id}/0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fanart_url_strips_slashes() {
        // Arrange & Act & Assert
        assert_eq!(
            fanart_url("/serie/abc/"),
            "http://nrk.eu01.aws.af.cm/f/serie/abc"
        );
    }

    #[test]
    fn test_fanart_url_strips_whitespace() {
        // Arrange & Act & Assert
        assert_eq!(
            fanart_url(" /serie/abc "),
            "http://nrk.eu01.aws.af.cm/f/serie/abc"
        );
    }

    #[test]
    fn test_thumb_url_uses_thumb_prefix() {
        // Arrange & Act & Assert
        assert_eq!(thumb_url("kveldsnytt"), "http://nrk.eu01.aws.af.cm/t/kveldsnytt");
    }

    #[test]
    fn test_identical_ids_resolve_identically() {
        // Arrange & Act & Assert: derivation is a pure function of the id
        assert_eq!(fanart_url("/serie/skam/"), fanart_url("serie/skam"));
    }

    #[test]
    fn test_episodes_path_template() {
        // Arrange & Act & Assert
        assert_eq!(
            episodes_path("brannmann-sam", "3"),
            "/program/Episodes/brannmann-sam/3/0"
        );
    }
}
