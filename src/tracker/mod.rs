//! Issue-tracker references in commit messages.
//!
//! Each [`Tracker`] variant knows one grammar and yields normalized
//! [`TrackerRef`]s in the order they appear in the text. Nothing is
//! deduplicated here; that happens when a branch result is normalized.

pub mod bugzilla;
pub mod cve;
pub mod fate;
pub mod github;
pub mod trello;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use github::CrossRepoRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackerKind {
    /// `Fixes #123` in the repository itself.
    GitHub,
    /// `Fixes owner/repo#123` pointing at another repository.
    GitHubCross,
    /// SUSE Bugzilla, `bnc` and `boo` included.
    Bugzilla,
    Fate,
    Trello,
    Cve,
}

impl TrackerKind {
    pub const ALL: [TrackerKind; 6] = [
        TrackerKind::GitHub,
        TrackerKind::GitHubCross,
        TrackerKind::Bugzilla,
        TrackerKind::Fate,
        TrackerKind::Trello,
        TrackerKind::Cve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerKind::GitHub => "gh",
            TrackerKind::GitHubCross => "gh-cross",
            TrackerKind::Bugzilla => "bsc",
            TrackerKind::Fate => "fate",
            TrackerKind::Trello => "trello",
            TrackerKind::Cve => "CVE",
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackerRef {
    pub kind: TrackerKind,
    pub id: String,
}

impl TrackerRef {
    pub fn new(kind: TrackerKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracker {
    CloseKeyword,
    CrossRepo,
    BugTracker,
    Fate,
    Trello,
    Cve,
}

impl Tracker {
    /// Application order of [`find_references`].
    pub const ALL: [Tracker; 6] = [
        Tracker::Fate,
        Tracker::BugTracker,
        Tracker::CloseKeyword,
        Tracker::CrossRepo,
        Tracker::Trello,
        Tracker::Cve,
    ];

    pub fn extract(&self, text: &str) -> Vec<TrackerRef> {
        match self {
            Tracker::CloseKeyword => github::closed_issues(text),
            Tracker::CrossRepo => github::cross_repo_issues(text)
                .into_iter()
                .map(TrackerRef::from)
                .collect(),
            Tracker::BugTracker => bugzilla::bugs(text),
            Tracker::Fate => fate::features(text),
            Tracker::Trello => trello::cards(text),
            Tracker::Cve => cve::cves(text),
        }
    }
}

/// Runs every tracker over `text` and concatenates what they found.
pub fn find_references(text: &str) -> Vec<TrackerRef> {
    Tracker::ALL
        .iter()
        .flat_map(|tracker| tracker.extract(text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_has_no_references() {
        assert!(find_references("the quick brown fox").is_empty());
        assert!(find_references("text with 123,").is_empty());
        assert!(find_references("").is_empty());
    }

    #[test]
    fn every_close_keyword_yields_the_same_reference() {
        for msg in ["Fixes #123", "closes #123", "resolved #123", "Fixed #123", "RESOLVE #123"] {
            assert_eq!(
                find_references(msg),
                vec![TrackerRef::new(TrackerKind::GitHub, "123")],
                "message: {msg}"
            );
        }
    }

    #[test]
    fn mixed_message_is_dispatched_by_tracker_order() {
        let msg = "Fix bnc#555, closes #7 and trello#123\n\nSee fate#42, CVE-2017-12345 and bsc#555";
        let refs = find_references(msg);
        assert_eq!(
            refs,
            vec![
                TrackerRef::new(TrackerKind::Fate, "42"),
                TrackerRef::new(TrackerKind::Bugzilla, "555"),
                TrackerRef::new(TrackerKind::Bugzilla, "555"),
                TrackerRef::new(TrackerKind::GitHub, "7"),
                TrackerRef::new(TrackerKind::Trello, "123"),
                TrackerRef::new(TrackerKind::Cve, "2017-12345"),
            ]
        );
    }

    #[test]
    fn kind_names_match_result_keys() {
        let names: Vec<_> = TrackerKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["gh", "gh-cross", "bsc", "fate", "trello", "CVE"]);
    }
}
