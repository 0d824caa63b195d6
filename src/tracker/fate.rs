use super::{TrackerKind, TrackerRef};
use regex::Regex;
use std::sync::LazyLock;

static FATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bfate\s?#|https://fate\.[\w.-]+/)(\d+)").expect("valid regex literal")
});

/// Finds `fate#123` style references as well as `https://fate.<domain>/123` links.
pub fn features(text: &str) -> Vec<TrackerRef> {
    FATE_RE
        .captures_iter(text)
        .map(|c| TrackerRef::new(TrackerKind::Fate, &c[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(text: &str) -> Vec<String> {
        features(text).into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn keyword_forms() {
        assert_eq!(ids("fate#123"), vec!["123"]);
        assert_eq!(ids("Fate#12345"), vec!["12345"]);
        assert_eq!(ids("FATE#12345"), vec!["12345"]);
        assert_eq!(
            ids("see fate#123, Fate #345, and FATE#5678"),
            vec!["123", "345", "5678"]
        );
    }

    #[test]
    fn url_form() {
        assert_eq!(
            ids("Fix fate#123 and https://fate.suse.com/3456"),
            vec!["123", "3456"]
        );
    }

    #[test]
    fn nothing_to_find() {
        assert!(ids("the quick brown fox").is_empty());
        assert!(ids("fate is #1").is_empty());
    }
}
