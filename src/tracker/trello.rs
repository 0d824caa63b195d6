use super::{TrackerKind, TrackerRef};
use regex::Regex;
use std::sync::LazyLock;

// Board links (https://trello.com/b/...) never match; only cards do.
static TRELLO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btrello\s?#(\d+|[a-z0-9]{8})\b|https://trello\.com/c/([a-z0-9]+)")
        .expect("valid regex literal")
});

/// Finds `trello#123` references and card links; `https://trello.com/c/123/title`
/// yields `123`.
pub fn cards(text: &str) -> Vec<TrackerRef> {
    TRELLO_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| TrackerRef::new(TrackerKind::Trello, m.as_str()))
        .collect()
}
