use crate::committer::Committer;
use crate::tracker::{TrackerKind, TrackerRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const SCHEMA_VERSION: u32 = 1;

/// One entry of a branch specification: which span of which branch is
/// reported under which logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRange {
    pub name: String,
    pub branch: String,
    pub start: String,
    pub end: String,
}

impl BranchRange {
    pub fn new(name: &str, branch: &str, start: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            branch: branch.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// The single range used when a repository has no branch specification.
    pub fn default_for(branch: &str, start: &str, end: &str) -> Self {
        Self::new(branch, branch, start, end)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub insertions: u64,
    pub deletions: u64,
    pub files: u64,
    pub lines: u64,
}

impl DiffStats {
    pub fn add_file(&mut self, added: u64, deleted: u64) {
        self.insertions += added;
        self.deletions += deleted;
        self.lines += added + deleted;
        self.files += 1;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub summary: String,
    pub message: String,
    pub stats: DiffStats,
}

/// Committer bucket: the accumulated names while walking, their distinct
/// count once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Committers {
    Count(usize),
    Names(Vec<String>),
}

impl Default for Committers {
    fn default() -> Self {
        Committers::Names(Vec::new())
    }
}

impl Committers {
    /// Finalized buckets ignore further names.
    pub fn push(&mut self, name: String) {
        if let Committers::Names(names) = self {
            names.push(name);
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Committers::Count(n) => *n,
            Committers::Names(names) => names.iter().collect::<HashSet<_>>().len(),
        }
    }

    pub fn finalize(&mut self) {
        *self = Committers::Count(self.count());
    }
}

/// Issue identifiers per tracker kind, all present from the start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackerLists {
    pub gh: Vec<String>,
    pub gh_cross: Vec<String>,
    pub bsc: Vec<String>,
    pub fate: Vec<String>,
    pub trello: Vec<String>,
    #[serde(rename = "CVE")]
    pub cve: Vec<String>,
}

impl TrackerLists {
    pub fn list(&self, kind: TrackerKind) -> &[String] {
        match kind {
            TrackerKind::GitHub => &self.gh,
            TrackerKind::GitHubCross => &self.gh_cross,
            TrackerKind::Bugzilla => &self.bsc,
            TrackerKind::Fate => &self.fate,
            TrackerKind::Trello => &self.trello,
            TrackerKind::Cve => &self.cve,
        }
    }

    pub fn list_mut(&mut self, kind: TrackerKind) -> &mut Vec<String> {
        match kind {
            TrackerKind::GitHub => &mut self.gh,
            TrackerKind::GitHubCross => &mut self.gh_cross,
            TrackerKind::Bugzilla => &mut self.bsc,
            TrackerKind::Fate => &mut self.fate,
            TrackerKind::Trello => &mut self.trello,
            TrackerKind::Cve => &mut self.cve,
        }
    }

    pub fn push(&mut self, reference: TrackerRef) {
        self.list_mut(reference.kind).push(reference.id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BranchResult {
    pub branch: String,
    pub start: String,
    pub end: String,
    pub commits: u64,
    pub deletions: u64,
    pub files: u64,
    pub insertions: u64,
    pub lines: u64,
    pub team_committers: Committers,
    pub external_committers: Committers,
    pub team_committers_mails: Vec<String>,
    pub external_committers_mails: Vec<String>,
    #[serde(flatten)]
    pub trackers: TrackerLists,
}

impl BranchResult {
    pub fn new(range: &BranchRange) -> Self {
        Self {
            branch: range.branch.clone(),
            start: range.start.clone(),
            end: range.end.clone(),
            ..Self::default()
        }
    }

    pub fn add_stats(&mut self, stats: &DiffStats) {
        self.insertions += stats.insertions;
        self.deletions += stats.deletions;
        self.files += stats.files;
        self.lines += stats.lines;
    }

    pub fn record_committer(&mut self, committer: Committer) {
        match committer {
            Committer::Team(mail) => {
                self.team_committers.push(mail.clone());
                self.team_committers_mails.push(mail);
            }
            Committer::External(mail) => {
                self.external_committers.push(mail.clone());
                self.external_committers_mails.push(mail);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchOutcome {
    Stats(Box<BranchResult>),
    Error { error: String },
}

impl BranchOutcome {
    pub fn error(message: impl ToString) -> Self {
        BranchOutcome::Error {
            error: message.to_string(),
        }
    }

    pub fn stats(&self) -> Option<&BranchResult> {
        match self {
            BranchOutcome::Stats(stats) => Some(stats),
            BranchOutcome::Error { .. } => None,
        }
    }
}

/// Logical branch name to outcome; a repeated name overwrites the earlier entry.
pub type RepositoryResult = BTreeMap<String, BranchOutcome>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub url: String,
    pub repository_path: String,
    pub branches: RepositoryResult,
}

/// One row of the tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub release: String,
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub lines: u64,
    pub fate: usize,
    pub bnc: usize,
    pub bsc: usize,
    pub files: u64,
    pub trello: usize,
    pub gh: usize,
    pub doccomments: usize,
    #[serde(rename = "team-committers")]
    pub team_committers: usize,
    #[serde(rename = "external-committers")]
    pub external_committers: usize,
}
