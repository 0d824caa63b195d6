use super::{TrackerKind, TrackerRef};
use regex::Regex;
use std::sync::LazyLock;

static BUGZILLA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:bsc|bnc|boo)\s?#(\d{2,9})").expect("valid regex literal")
});

/// `bnc` and `boo` are older names of the same tracker and are reported as `bsc`.
pub fn bugs(text: &str) -> Vec<TrackerRef> {
    BUGZILLA_RE
        .captures_iter(text)
        .map(|c| TrackerRef::new(TrackerKind::Bugzilla, &c[1]))
        .collect()
}
