//! Navigation entry point.
//!
//! The host calls [`navigate`] once per navigation event (initial load,
//! hash change, link click) with the outcome of the chapter-list load and the
//! current URL. Nothing is retained between calls.

use tracing::{info, instrument, warn};
use url::Url;

use voyagelog_shared::{ChapterRecord, Routing, VoyageLogError};

use crate::composer::escape_html;
use crate::location::chapter_id;
use crate::render::{self, RenderOptions};
use crate::resolver::{MatchRule, Resolution, resolve};

/// Which kind of page was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// Chapter list (hash-routed index page).
    Index,
    /// A single chapter.
    Detail {
        chapter_id: String,
        index: usize,
        rule: MatchRule,
    },
    /// No chapter named; ask the reader to pick one.
    Prompt,
    /// A chapter was named but does not exist.
    NotFound { attempted: String },
    /// The chapter list never arrived.
    Unavailable,
}

/// A rendered page: document title plus the fragment for the page root.
#[derive(Debug, Clone)]
pub struct PageView {
    pub kind: ViewKind,
    pub title: String,
    pub body: String,
}

impl PageView {
    /// Whether the view reports a failure to the reader.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, ViewKind::NotFound { .. } | ViewKind::Unavailable)
    }

    /// Wrap the fragment in a standalone HTML document.
    pub fn to_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"vi\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n</head>\n<body>\n<div id=\"voyage-root\">\n{}</div>\n</body>\n</html>\n",
            escape_html(&self.title),
            self.body,
        )
    }
}

/// Produce the page for `url`.
///
/// A failed load short-circuits to the unavailable view; resolution and
/// composition only run on a loaded chapter list.
#[instrument(skip_all, fields(url = %url, routing = %opts.routing))]
pub fn navigate(
    chapters: std::result::Result<&[ChapterRecord], &VoyageLogError>,
    url: &Url,
    opts: &RenderOptions,
) -> PageView {
    let chapters = match chapters {
        Ok(chapters) => chapters,
        Err(e) => {
            warn!(error = %e, "chapter list unavailable");
            return PageView {
                kind: ViewKind::Unavailable,
                title: opts.site_title.clone(),
                body: render::unavailable(&e.to_string()),
            };
        }
    };

    let raw_id = chapter_id(url, opts.routing);

    match resolve(chapters, raw_id.as_deref()) {
        Resolution::Found(resolved) => {
            info!(
                chapter = %resolved.chapter.id,
                index = resolved.index,
                rule = %resolved.rule,
                "rendering chapter"
            );
            PageView {
                kind: ViewKind::Detail {
                    chapter_id: resolved.chapter.id.clone(),
                    index: resolved.index,
                    rule: resolved.rule,
                },
                title: render::page_title(resolved.chapter, &opts.site_title),
                body: render::chapter_detail(&resolved, opts),
            }
        }
        Resolution::NotFound { attempted } => {
            warn!(%attempted, "chapter not found");
            PageView {
                title: opts.site_title.clone(),
                body: render::not_found(&attempted),
                kind: ViewKind::NotFound { attempted },
            }
        }
        Resolution::NoIdentifier => match opts.routing {
            Routing::Hash => PageView {
                kind: ViewKind::Index,
                title: opts.site_title.clone(),
                body: render::chapter_list(chapters, opts),
            },
            Routing::Query => PageView {
                kind: ViewKind::Prompt,
                title: opts.site_title.clone(),
                body: render::prompt(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::parse_location;

    fn chapters() -> Vec<ChapterRecord> {
        vec![
            ChapterRecord::new("v1", "Rời cảng").with_number(1),
            ChapterRecord::new("v2", "Bão").with_number(2),
            ChapterRecord::new("v3", "Đảo"),
        ]
    }

    fn hash_opts() -> RenderOptions {
        RenderOptions {
            routing: Routing::Hash,
            ..RenderOptions::default()
        }
    }

    fn go(chapters: &[ChapterRecord], location: &str, opts: &RenderOptions) -> PageView {
        navigate(Ok(chapters), &parse_location(location).unwrap(), opts)
    }

    #[test]
    fn query_location_renders_detail() {
        let chapters = chapters();
        let view = go(&chapters, "voyage.html?v=2", &RenderOptions::default());
        assert_eq!(
            view.kind,
            ViewKind::Detail {
                chapter_id: "v2".into(),
                index: 1,
                rule: MatchRule::PrefixedId,
            }
        );
        assert_eq!(view.title, "Bão — Nhật Ký Hải Trình");
        assert!(!view.is_error());
    }

    #[test]
    fn hash_location_renders_detail() {
        let chapters = chapters();
        let view = go(&chapters, "index.html#v3", &hash_opts());
        assert!(matches!(view.kind, ViewKind::Detail { index: 2, .. }));
    }

    #[test]
    fn missing_id_prompts_in_query_routing() {
        let chapters = chapters();
        let view = go(&chapters, "voyage.html", &RenderOptions::default());
        assert_eq!(view.kind, ViewKind::Prompt);
        assert!(view.body.contains("alert-info"));
    }

    #[test]
    fn missing_id_lists_chapters_in_hash_routing() {
        let chapters = chapters();
        let view = go(&chapters, "index.html", &hash_opts());
        assert_eq!(view.kind, ViewKind::Index);
        assert_eq!(view.body.matches("chapter-card").count(), 3);
    }

    #[test]
    fn unknown_id_is_not_found_without_partial_render() {
        let chapters = chapters();
        let view = go(&chapters, "voyage.html?v=999", &RenderOptions::default());
        assert_eq!(
            view.kind,
            ViewKind::NotFound {
                attempted: "999".into()
            }
        );
        assert!(view.is_error());
        assert!(!view.body.contains("chapter-section"));
    }

    #[test]
    fn load_failure_skips_resolution() {
        let err = VoyageLogError::data_unavailable("journal.json", "HTTP 404");
        let url = parse_location("voyage.html?v=1").unwrap();
        let view = navigate(Err(&err), &url, &RenderOptions::default());
        assert_eq!(view.kind, ViewKind::Unavailable);
        assert!(view.body.contains("HTTP 404"));
        assert!(!view.body.contains("chapter-section"));
    }

    #[test]
    fn repeated_navigation_is_stateless() {
        let chapters = chapters();
        let opts = hash_opts();
        let first = go(&chapters, "#v1", &opts);
        let _ = go(&chapters, "#v2", &opts);
        let again = go(&chapters, "#v1", &opts);
        assert_eq!(first.kind, again.kind);
        assert_eq!(first.body, again.body);
    }

    #[test]
    fn document_escapes_title() {
        let view = PageView {
            kind: ViewKind::Prompt,
            title: "A & <B>".into(),
            body: String::new(),
        };
        let doc = view.to_document();
        assert!(doc.contains("<title>A &amp; &lt;B&gt;</title>"));
        assert!(doc.contains("id=\"voyage-root\""));
    }
}
