//! Chapter body composition: paragraphs with positionally interleaved images.
//!
//! Body text is split on blank lines. Image `i` belongs to split segment `i`
//! (counted before empty segments are dropped), so an image paired with a
//! blank segment is silently skipped rather than shifted onto the next
//! paragraph. Empty image slots are placeholders and never render. Images
//! past the last segment come back to the caller for a trailing gallery.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Composed chapter body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedContent {
    /// `<p>` elements with inline image cards.
    pub html: String,
    /// Images with no split segment to attach to, in original order.
    pub remaining_images: Vec<String>,
}

/// Escape text for embedding in element bodies or quoted attributes.
///
/// Covers `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Split `text` into paragraphs and interleave `images` after them.
///
/// `alt_title` feeds the image alt text (`"<title> image"`). Single newlines
/// inside a paragraph become `<br>`.
pub fn compose(text: &str, images: &[String], alt_title: &str) -> ComposedContent {
    static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

    if text.is_empty() {
        return ComposedContent {
            html: String::new(),
            remaining_images: non_empty(images),
        };
    }

    let mut html = String::new();
    let mut segment_count = 0;

    for (i, segment) in PARAGRAPH_BREAK_RE.split(text).enumerate() {
        segment_count = i + 1;

        let paragraph = segment.trim();
        if paragraph.is_empty() {
            continue;
        }

        let body = escape_html(paragraph).replace('\n', "<br>");
        html.push_str(&format!("<p>{body}</p>\n"));

        if let Some(src) = images.get(i).filter(|src| !src.is_empty()) {
            html.push_str(&image_card(src, alt_title));
            html.push_str("\n\n");
        }
    }

    let remaining_images = non_empty(images.get(segment_count..).unwrap_or_default());

    ComposedContent {
        html,
        remaining_images,
    }
}

fn non_empty(images: &[String]) -> Vec<String> {
    images.iter().filter(|src| !src.is_empty()).cloned().collect()
}

/// Plain paragraph conversion: [`compose`] without images.
pub fn nl2p(text: &str) -> String {
    compose(text, &[], "").html
}

/// A single lazy-loaded image card, as used inline and in the media grid.
pub fn image_card(src: &str, alt_title: &str) -> String {
    format!(
        r#"<div class="media-card image-card"><img src="{}" alt="{} image" loading="lazy"/></div>"#,
        escape_html(src),
        escape_html(alt_title),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn imgs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn image_follows_its_paragraph() {
        let out = compose("A\n\nB", &imgs(&["img1.png"]), "T");
        let a = out.html.find("<p>A</p>").expect("paragraph A");
        let img = out.html.find("img1.png").expect("image");
        let b = out.html.find("<p>B</p>").expect("paragraph B");
        assert!(a < img && img < b);
        assert!(out.remaining_images.is_empty());
    }

    #[test]
    fn second_image_pairs_with_second_segment() {
        let out = compose("A\n\nB", &imgs(&["img1.png", "img2.png"]), "T");
        let b = out.html.find("<p>B</p>").expect("paragraph B");
        let img2 = out.html.find("img2.png").expect("second image inline");
        assert!(b < img2);
        assert!(out.remaining_images.is_empty());
    }

    #[test]
    fn images_past_last_segment_are_remaining() {
        let out = compose("A\n\nB", &imgs(&["1.png", "2.png", "3.png", "4.png"]), "T");
        assert_eq!(out.remaining_images, imgs(&["3.png", "4.png"]));
        assert!(!out.html.contains("3.png"));
    }

    #[test]
    fn single_newline_becomes_break() {
        let out = compose("Line1\nLine2", &[], "T");
        assert_eq!(out.html, "<p>Line1<br>Line2</p>\n");
    }

    #[test]
    fn long_newline_runs_split_once() {
        let out = compose("A\n\n\n\nB", &[], "T");
        assert_eq!(out.html, "<p>A</p>\n<p>B</p>\n");
    }

    #[test]
    fn blank_segment_keeps_image_index() {
        // Segments: "A", "   ", "C". Image 1 belongs to the blank segment.
        let out = compose("A\n\n   \n\nC", &imgs(&["a.png", "blank.png", "c.png"]), "T");
        assert!(!out.html.contains("blank.png"));
        let c = out.html.find("<p>C</p>").expect("paragraph C");
        let c_img = out.html.find("c.png").expect("image for C");
        assert!(c < c_img);
        assert_eq!(out.html.matches("<p>").count(), 2);
        assert!(out.remaining_images.is_empty());
    }

    #[test]
    fn null_image_slot_keeps_later_images_aligned() {
        let chapter: voyagelog_shared::ChapterRecord = serde_json::from_str(
            r#"{"id": "v1", "content": "A\n\nB\n\nC", "images": ["a.png", null, "c.png"]}"#,
        )
        .expect("deserialize chapter");

        let out = compose(&chapter.content, &chapter.images, &chapter.title);
        let b = out.html.find("<p>B</p>").expect("paragraph B");
        let c = out.html.find("<p>C</p>").expect("paragraph C");
        let c_img = out.html.find("c.png").expect("image for C");
        assert!(c < c_img);
        assert!(!out.html[b..c].contains("<img"));
        assert_eq!(out.html.matches("<img").count(), 2);
        assert!(out.remaining_images.is_empty());
    }

    #[test]
    fn empty_slots_are_left_out_of_remaining() {
        let out = compose("A", &imgs(&["a.png", "", "z.png"]), "T");
        assert_eq!(out.remaining_images, imgs(&["z.png"]));

        let out = compose("", &imgs(&["", "y.png"]), "T");
        assert_eq!(out.remaining_images, imgs(&["y.png"]));
    }

    #[test]
    fn paragraphs_are_trimmed() {
        let out = compose("  A  \n\n\tB\n", &[], "T");
        assert_eq!(out.html, "<p>A</p>\n<p>B</p>\n");
    }

    #[test]
    fn empty_text_returns_all_images() {
        let out = compose("", &imgs(&["x.png", "y.png"]), "T");
        assert!(out.html.is_empty());
        assert_eq!(out.remaining_images, imgs(&["x.png", "y.png"]));
    }

    #[test]
    fn body_and_alt_are_escaped_separately() {
        let out = compose("1 < 2 & \"q\" 'a'", &imgs(&["p.png"]), "Bão & <sóng>");
        assert!(out.html.contains("1 &lt; 2 &amp; &quot;q&quot;"));
        assert!(!out.html.contains("'a'"));
        assert!(out.html.contains("alt=\"Bão &amp; &lt;sóng&gt; image\""));
    }

    #[test]
    fn image_src_is_escaped() {
        let card = image_card("a.png\" onerror=\"x", "T");
        assert!(card.contains("src=\"a.png&quot; onerror=&quot;x\""));
    }

    #[test]
    fn nl2p_matches_compose_without_images() {
        let text = "First\nline\n\nSecond";
        assert_eq!(nl2p(text), compose(text, &[], "").html);
        assert_eq!(nl2p(text), "<p>First<br>line</p>\n<p>Second</p>\n");
        assert_eq!(nl2p(""), "");
    }

    #[test]
    fn escaped_text_displays_literally() {
        let title = "Bão <b>lớn</b> & gió";
        let html = nl2p(title);
        let fragment = scraper::Html::parse_fragment(&html);
        let selector = scraper::Selector::parse("p").expect("selector");
        let p = fragment.select(&selector).next().expect("paragraph");
        assert_eq!(p.text().collect::<String>(), title);
        let bold = scraper::Selector::parse("b").expect("selector");
        assert!(fragment.select(&bold).next().is_none());
    }
}
