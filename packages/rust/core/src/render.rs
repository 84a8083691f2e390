//! HTML fragments for the journal pages.
//!
//! Every piece of chapter text is escaped at the point where it is embedded;
//! no renderer trusts its input to be pre-escaped.

use std::sync::LazyLock;

use regex::Regex;

use voyagelog_shared::{ChapterRecord, Routing, SiteConfig};

use crate::composer::{compose, escape_html, image_card, nl2p};
use crate::location::chapter_href;
use crate::resolver::ResolvedChapter;

/// Shown in place of a chapter number when nothing better is available.
const NUMBER_PLACEHOLDER: &str = "—";

const PROMPT_MESSAGE: &str = "Vui lòng chọn một chuyến đi để xem chi tiết.";
const ERROR_HEADING: &str = "Đã xảy ra lỗi:";
const PREV_LABEL: &str = "Trước";
const NEXT_LABEL: &str = "Tiếp theo";

/// Rendering settings derived from the `[site]` config section.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub routing: Routing,
    pub detail_page: String,
    pub site_title: String,
}

impl From<&SiteConfig> for RenderOptions {
    fn from(site: &SiteConfig) -> Self {
        Self {
            routing: site.routing,
            detail_page: site.detail_page.clone(),
            site_title: site.site_title.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl RenderOptions {
    fn href(&self, chapter: &ChapterRecord) -> String {
        chapter_href(&chapter.id, self.routing, &self.detail_page)
    }
}

/// Number shown in the chapter badge.
///
/// Prefers `number`, then the first digit run in `id`, then `id` itself.
pub fn display_number(chapter: &ChapterRecord) -> String {
    static DIGITS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

    if let Some(number) = &chapter.number {
        return number.clone();
    }
    if let Some(m) = DIGITS_RE.find(&chapter.id) {
        return m.as_str().to_string();
    }
    if chapter.id.is_empty() {
        NUMBER_PLACEHOLDER.to_string()
    } else {
        chapter.id.clone()
    }
}

/// Document title for a chapter page.
pub fn page_title(chapter: &ChapterRecord, site_title: &str) -> String {
    format!("{} — {site_title}", chapter.title)
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

/// Index page: one linked card per chapter, in list order.
pub fn chapter_list(chapters: &[ChapterRecord], opts: &RenderOptions) -> String {
    let mut html = String::from("<div class=\"chapter-list\">\n");
    for chapter in chapters {
        html.push_str(&format!(
            "  <a class=\"chapter-card\" href=\"{href}\">\
             <div class=\"chapter-meta\">{date}</div>\
             <h2>{title}</h2>\
             <p class=\"chapter-preview\">{preview}</p></a>\n",
            href = escape_html(&opts.href(chapter)),
            date = escape_html(&chapter.date),
            title = escape_html(&chapter.title),
            preview = escape_html(&chapter.content),
        ));
    }
    html.push_str("</div>\n");
    html
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// Full chapter page: header, body with inline images, gallery of leftover
/// images, analysis, and prev/next navigation.
pub fn chapter_detail(resolved: &ResolvedChapter<'_>, opts: &RenderOptions) -> String {
    let chapter = resolved.chapter;
    let content = compose(&chapter.content, &chapter.images, &chapter.title);

    let mut html = String::from("<div class=\"chapter-section\">\n");

    html.push_str("  <div class=\"chapter-header\">\n");
    html.push_str(&format!(
        "    <div class=\"chapter-number\">{}</div>\n",
        escape_html(&display_number(chapter))
    ));
    html.push_str(&format!(
        "    <h2 class=\"chapter-title\">{}</h2>\n",
        escape_html(&chapter.title)
    ));
    html.push_str(&format!(
        "    <div class=\"chapter-meta\"><span class=\"meta-item\">\
         <i class=\"fas fa-calendar-alt\"></i><span>{}</span></span></div>\n",
        escape_html(&chapter.date)
    ));
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <div class=\"chapter-content\">{}</div>\n",
        content.html
    ));

    html.push_str("  <div class=\"media-grid\">");
    for src in &content.remaining_images {
        html.push_str(&image_card(src, &chapter.title));
    }
    if !chapter.analysis.trim().is_empty() {
        html.push_str(&format!(
            "<div class=\"analysis-box\">{}</div>",
            nl2p(&chapter.analysis)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("  <div class=\"chapter-navigation\">\n");
    html.push_str(&nav_button(
        resolved.previous,
        opts,
        &format!("<i class=\"fas fa-chevron-left\"></i> {PREV_LABEL}"),
    ));
    html.push_str(&nav_button(
        resolved.next,
        opts,
        &format!("{NEXT_LABEL} <i class=\"fas fa-chevron-right\"></i>"),
    ));
    html.push_str("  </div>\n</div>\n");

    html
}

fn nav_button(target: Option<&ChapterRecord>, opts: &RenderOptions, label: &str) -> String {
    match target {
        Some(chapter) => format!(
            "    <a class=\"nav-btn\" href=\"{}\" title=\"{}\">{label}</a>\n",
            escape_html(&opts.href(chapter)),
            escape_html(&chapter.title),
        ),
        None => format!("    <a class=\"nav-btn disabled\" href=\"#\">{label}</a>\n"),
    }
}

// ---------------------------------------------------------------------------
// Status views
// ---------------------------------------------------------------------------

/// Shown when the URL names no chapter.
pub fn prompt() -> String {
    format!("<div class=\"alert alert-info\">{PROMPT_MESSAGE}</div>\n")
}

/// Shown when the URL names a chapter that does not exist.
pub fn not_found(attempted: &str) -> String {
    error_alert(&format!(
        "Không tìm thấy dữ liệu cho chuyến đi số {attempted}."
    ))
}

/// Shown when the chapter list could not be loaded.
pub fn unavailable(reason: &str) -> String {
    error_alert(&format!("Không thể tải dữ liệu. {reason}"))
}

fn error_alert(message: &str) -> String {
    format!(
        "<div class=\"alert alert-danger\"><strong>{ERROR_HEADING}</strong> {}</div>\n",
        escape_html(message)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
