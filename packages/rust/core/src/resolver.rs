//! Chapter resolution: map a URL-supplied identifier to a chapter record.
//!
//! Three identifier conventions show up in links to the journal (`v3`, `3`,
//! and bare chapter numbers), so matching runs through an ordered list of
//! rules. The first rule that matches any record wins; within a rule, the
//! first record in list order wins.

use tracing::debug;

use voyagelog_shared::ChapterRecord;

/// Which matching rule located a chapter, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRule {
    /// `chapter.id == raw_id`.
    ExactId,
    /// `chapter.id == "v" + raw_id`.
    PrefixedId,
    /// `chapter.number == raw_id`.
    Number,
    /// `"v" + chapter.number == raw_id`, only for ids starting with `v`.
    PrefixedNumber,
}

impl MatchRule {
    /// All rules, highest precedence first.
    pub const ALL: [MatchRule; 4] = [
        MatchRule::ExactId,
        MatchRule::PrefixedId,
        MatchRule::Number,
        MatchRule::PrefixedNumber,
    ];

    /// Whether `chapter` matches `raw_id` under this rule alone.
    pub fn matches(self, chapter: &ChapterRecord, raw_id: &str) -> bool {
        match self {
            Self::ExactId => chapter.id == raw_id,
            Self::PrefixedId => chapter
                .id
                .strip_prefix('v')
                .is_some_and(|rest| rest == raw_id),
            Self::Number => chapter.number.as_deref() == Some(raw_id),
            Self::PrefixedNumber => match (raw_id.strip_prefix('v'), chapter.number.as_deref()) {
                (Some(rest), Some(number)) => rest == number,
                _ => false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactId => "exact-id",
            Self::PrefixedId => "prefixed-id",
            Self::Number => "number",
            Self::PrefixedNumber => "prefixed-number",
        }
    }
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located chapter together with its neighbours in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChapter<'a> {
    pub chapter: &'a ChapterRecord,
    /// Position of `chapter` in the input list.
    pub index: usize,
    pub previous: Option<&'a ChapterRecord>,
    pub next: Option<&'a ChapterRecord>,
    /// The rule that produced the match.
    pub rule: MatchRule,
}

/// Outcome of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(ResolvedChapter<'a>),
    /// An identifier was given but nothing matched it.
    NotFound { attempted: String },
    /// No identifier in the URL; the page should prompt, not error.
    NoIdentifier,
}

impl<'a> Resolution<'a> {
    /// The resolved chapter, if any.
    pub fn found(&self) -> Option<&ResolvedChapter<'a>> {
        match self {
            Self::Found(resolved) => Some(resolved),
            _ => None,
        }
    }
}

/// Resolve `raw_id` against `chapters`.
///
/// An empty or absent identifier yields [`Resolution::NoIdentifier`]. String
/// comparison is exact: `"01"` never matches a chapter numbered `1`.
pub fn resolve<'a>(chapters: &'a [ChapterRecord], raw_id: Option<&str>) -> Resolution<'a> {
    let raw_id = match raw_id {
        Some(id) if !id.is_empty() => id,
        _ => return Resolution::NoIdentifier,
    };

    for rule in MatchRule::ALL {
        if let Some(index) = chapters.iter().position(|c| rule.matches(c, raw_id)) {
            debug!(raw_id, index, %rule, "chapter resolved");
            return Resolution::Found(ResolvedChapter {
                chapter: &chapters[index],
                index,
                previous: index.checked_sub(1).map(|i| &chapters[i]),
                next: chapters.get(index + 1),
                rule,
            });
        }
    }

    debug!(raw_id, candidates = chapters.len(), "no chapter matched");
    Resolution::NotFound {
        attempted: raw_id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
