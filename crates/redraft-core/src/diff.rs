//! Word-level diff between an original text and its rephrased version.
//!
//! Only additions are highlighted; removed words are kept in the segment
//! list but never rendered, so the rendered text always reads as the
//! revised version.

use std::time::Duration;

use similar::{Algorithm, ChangeTag, TextDiff};

/// Inputs above this many word/whitespace tokens on either side are not
/// diffed.
pub const MAX_DIFF_TOKENS: usize = 20_000;

/// Upper bound on diff search time. Once it passes, the remaining span is
/// reported as one removal plus one addition, which still renders as the
/// revised text.
pub const DIFF_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Whether this segment is part of the revised text.
    pub fn is_visible(&self) -> bool {
        self.kind != SegmentKind::Removed
    }
}

/// Result of [`highlight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// Original and revised are identical; holds the revised text.
    Unchanged(String),
    /// The diff was not computed; holds the revised text.
    Plain(String),
    /// Ordered segments covering both texts.
    Annotated(Vec<DiffSegment>),
}

impl Highlight {
    /// Rendering-safe markup. Added text is wrapped in
    /// `<span class="diff-added">`; the unannotated variants are returned
    /// verbatim.
    pub fn to_html(&self) -> String {
        match self {
            Highlight::Unchanged(text) | Highlight::Plain(text) => text.clone(),
            Highlight::Annotated(segments) => render_html(segments),
        }
    }

    /// The revised text with all annotation removed.
    pub fn revised_text(&self) -> String {
        match self {
            Highlight::Unchanged(text) | Highlight::Plain(text) => text.clone(),
            Highlight::Annotated(segments) => segments
                .iter()
                .filter(|s| s.is_visible())
                .map(|s| s.text.as_str())
                .collect(),
        }
    }

    pub fn segments(&self) -> Option<&[DiffSegment]> {
        match self {
            Highlight::Annotated(segments) => Some(segments),
            _ => None,
        }
    }
}

/// Diffs `revised` against `original`.
pub fn highlight(original: &str, revised: &str) -> Highlight {
    if original == revised {
        return Highlight::Unchanged(revised.to_string());
    }
    match compute_segments(original, revised) {
        Some(segments) => Highlight::Annotated(segments),
        None => {
            tracing::debug!("input too large to diff, showing plain text");
            Highlight::Plain(revised.to_string())
        }
    }
}

/// Word-granularity segments, adjacent segments of the same kind merged.
///
/// Returns `None` when either side exceeds [`MAX_DIFF_TOKENS`].
pub fn compute_segments(original: &str, revised: &str) -> Option<Vec<DiffSegment>> {
    if count_tokens(original) > MAX_DIFF_TOKENS || count_tokens(revised) > MAX_DIFF_TOKENS {
        return None;
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .timeout(DIFF_TIMEOUT)
        .diff_words(original, revised);
    let mut segments: Vec<DiffSegment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(DiffSegment::new(change.value(), kind)),
        }
    }

    Some(segments)
}

/// Escapes and concatenates visible segments.
pub fn render_html(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Unchanged => out.push_str(&html_escape(&segment.text)),
            SegmentKind::Added => {
                out.push_str(r#"<span class="diff-added">"#);
                out.push_str(&html_escape(&segment.text));
                out.push_str("</span>");
            }
            SegmentKind::Removed => {}
        }
    }
    out
}

pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Counts alternating runs of whitespace and non-whitespace.
fn count_tokens(text: &str) -> usize {
    let mut count = 0;
    let mut prev: Option<bool> = None;
    for ch in text.chars() {
        let ws = ch.is_whitespace();
        if prev != Some(ws) {
            count += 1;
            prev = Some(ws);
        }
    }
    count
}
