pub mod clone;
pub mod repo;

pub use clone::acquire;
pub use repo::GitRepo;

use crate::error::Result;
use crate::model::CommitRecord;
use std::fmt;
use std::path::Path;

/// What the aggregator needs from a repository.
pub trait Repository {
    fn workdir(&self) -> &Path;

    /// Makes `branch` the head the following walks start from.
    fn switch_to(&mut self, branch: &str) -> Result<()>;

    /// Commits of `range`, newest first.
    fn commits(&self, range: &RevisionRange) -> Result<Vec<CommitRecord>>;
}

/// Commit span to walk.
///
/// Both bounds empty means the whole history of the current head. Otherwise
/// the walk is `start..end` where an empty start excludes nothing and an
/// empty end stands for the current head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionRange {
    Full,
    Bounded {
        start: Option<String>,
        end: Option<String>,
    },
}

impl RevisionRange {
    pub fn from_bounds(start: &str, end: &str) -> Self {
        let bound = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        match (bound(start), bound(end)) {
            (None, None) => RevisionRange::Full,
            (start, end) => RevisionRange::Bounded { start, end },
        }
    }
}

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionRange::Full => f.write_str("HEAD"),
            RevisionRange::Bounded { start, end } => write!(
                f,
                "{}..{}",
                start.as_deref().unwrap_or(""),
                end.as_deref().unwrap_or("HEAD")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_mean_full_history() {
        assert_eq!(RevisionRange::from_bounds("", ""), RevisionRange::Full);
        assert_eq!(RevisionRange::from_bounds(" ", ""), RevisionRange::Full);
        assert_eq!(RevisionRange::Full.to_string(), "HEAD");
    }

    #[test]
    fn one_sided_ranges_stay_bounded() {
        let open_end = RevisionRange::from_bounds("v1.0", "");
        assert_eq!(
            open_end,
            RevisionRange::Bounded {
                start: Some("v1.0".into()),
                end: None
            }
        );
        assert_eq!(open_end.to_string(), "v1.0..HEAD");

        let open_start = RevisionRange::from_bounds("", "abc");
        assert_eq!(open_start.to_string(), "..abc");
    }
}
