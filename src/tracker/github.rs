use super::{TrackerKind, TrackerRef};
use regex::Regex;
use std::sync::LazyLock;

// see https://help.github.com/articles/closing-issues-via-commit-messages/
static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fix(?:es|ed)?|close[sd]?|resolve[sd]?)(?:\s+for)?\s*#(\d{1,9})")
        .expect("valid regex literal")
});

static CROSS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:fix(?:es|ed)?|close[sd]?|resolve[sd]?)(?:\s+for)?\s+([\w.-]+)/([\w.-]+)#(\d{1,9})",
    )
    .expect("valid regex literal")
});

/// An issue closed in another repository, `owner/repo#id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRepoRef {
    pub domain: String,
    pub repo: String,
    pub id: String,
}

impl From<CrossRepoRef> for TrackerRef {
    fn from(r: CrossRepoRef) -> Self {
        TrackerRef::new(
            TrackerKind::GitHubCross,
            format!("{}/{}#{}", r.domain, r.repo, r.id),
        )
    }
}

pub fn closed_issues(text: &str) -> Vec<TrackerRef> {
    CLOSE_RE
        .captures_iter(text)
        .map(|c| TrackerRef::new(TrackerKind::GitHub, &c[1]))
        .collect()
}

pub fn cross_repo_issues(text: &str) -> Vec<CrossRepoRef> {
    CROSS_RE
        .captures_iter(text)
        .map(|c| CrossRepoRef {
            domain: c[1].to_lowercase(),
            repo: c[2].to_lowercase(),
            id: c[3].to_string(),
        })
        .collect()
}
