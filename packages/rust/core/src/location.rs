//! Identifier extraction from page URLs.
//!
//! Accepts absolute URLs as well as the relative forms that appear in the
//! site's own links (`voyage.html?v=3`, `#v3`).

use std::sync::LazyLock;

use url::Url;

use voyagelog_shared::{Result, Routing, VoyageLogError};

/// Query parameter carrying the chapter identifier.
pub const QUERY_PARAM: &str = "v";

/// Base used to resolve relative locations.
static PLACEHOLDER_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://voyagelog.local/").expect("valid base URL"));

/// Parse an absolute or site-relative location into a URL.
pub fn parse_location(location: &str) -> Result<Url> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => PLACEHOLDER_BASE
            .join(location)
            .map_err(|e| VoyageLogError::parse(format!("invalid location '{location}': {e}"))),
        Err(e) => Err(VoyageLogError::parse(format!(
            "invalid location '{location}': {e}"
        ))),
    }
}

/// Extract the raw chapter identifier from `url` under the given routing.
///
/// Hash routing only recognizes fragments starting with `v` (`#v3` → `v3`);
/// query routing takes the first `v` parameter verbatim. Empty values count
/// as absent.
pub fn chapter_id(url: &Url, routing: Routing) -> Option<String> {
    let raw = match routing {
        Routing::Hash => url
            .fragment()
            .filter(|f| f.starts_with('v'))
            .map(str::to_string),
        Routing::Query => url
            .query_pairs()
            .find(|(key, _)| key == QUERY_PARAM)
            .map(|(_, value)| value.into_owned()),
    };
    raw.filter(|id| !id.is_empty())
}

/// Link to a chapter's detail view.
///
/// Query routing strips one leading `v` (`v3` → `voyage.html?v=3`); hash
/// routing links straight to the fragment.
pub fn chapter_href(chapter_id: &str, routing: Routing, detail_page: &str) -> String {
    match routing {
        Routing::Hash => format!("#{chapter_id}"),
        Routing::Query => {
            let bare = chapter_id.strip_prefix('v').unwrap_or(chapter_id);
            let encoded: String = url::form_urlencoded::byte_serialize(bare.as_bytes()).collect();
            format!("{detail_page}?{QUERY_PARAM}={encoded}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(location: &str, routing: Routing) -> Option<String> {
        chapter_id(&parse_location(location).unwrap(), routing)
    }

    #[test]
    fn query_param_is_extracted() {
        assert_eq!(id("voyage.html?v=3", Routing::Query), Some("3".into()));
        assert_eq!(
            id("https://example.com/voyage.html?lang=vi&v=v2", Routing::Query),
            Some("v2".into())
        );
    }

    #[test]
    fn query_param_missing_or_empty() {
        assert_eq!(id("voyage.html", Routing::Query), None);
        assert_eq!(id("voyage.html?v=", Routing::Query), None);
        assert_eq!(id("voyage.html?x=1", Routing::Query), None);
    }

    #[test]
    fn first_query_param_wins() {
        assert_eq!(id("voyage.html?v=1&v=2", Routing::Query), Some("1".into()));
    }

    #[test]
    fn query_value_is_percent_decoded() {
        assert_eq!(id("voyage.html?v=ch%C6%B0%C6%A1ng", Routing::Query), Some("chương".into()));
    }

    #[test]
    fn hash_fragment_is_extracted() {
        assert_eq!(id("#v3", Routing::Hash), Some("v3".into()));
        assert_eq!(id("https://example.com/index.html#v12", Routing::Hash), Some("v12".into()));
    }

    #[test]
    fn hash_without_v_prefix_is_ignored() {
        assert_eq!(id("#about", Routing::Hash), None);
        assert_eq!(id("#", Routing::Hash), None);
        assert_eq!(id("index.html", Routing::Hash), None);
    }

    #[test]
    fn routing_modes_do_not_mix() {
        assert_eq!(id("voyage.html?v=3", Routing::Hash), None);
        assert_eq!(id("#v3", Routing::Query), None);
    }

    #[test]
    fn chapter_href_per_routing() {
        assert_eq!(chapter_href("v3", Routing::Query, "voyage.html"), "voyage.html?v=3");
        assert_eq!(chapter_href("vv3", Routing::Query, "voyage.html"), "voyage.html?v=v3");
        assert_eq!(
            chapter_href("chuong cuoi", Routing::Query, "voyage.html"),
            "voyage.html?v=chuong+cuoi"
        );
        assert_eq!(chapter_href("v3", Routing::Hash, "voyage.html"), "#v3");
    }

    #[test]
    fn href_roundtrips_through_resolution_input() {
        let href = chapter_href("v7", Routing::Query, "voyage.html");
        assert_eq!(id(&href, Routing::Query), Some("7".into()));
    }
}
