use super::{Repository, RevisionRange};
use crate::error::{DocstatsError, Result};
use crate::model::{CommitRecord, DiffStats};
use gix::object::tree::diff::ChangeDetached;
use gix::ObjectId;
use similar::{ChangeTag, TextDiff};
use std::collections::{BinaryHeap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub struct GitRepo {
    repo: gix::Repository,
    path: PathBuf,
    current: Option<ObjectId>,
}

impl GitRepo {
    /// Open the repository at exactly `path`; parent directories are not searched.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = gix::open(path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self {
            repo,
            path,
            current: None,
        })
    }

    fn resolve_commit(&self, rev: &str) -> Result<ObjectId> {
        let spec = format!("{rev}^{{commit}}");
        let id = self
            .repo
            .rev_parse_single(spec.as_str())
            .map_err(|e| DocstatsError::Parse(format!("Invalid revision '{rev}': {e}")))?;
        Ok(id.detach())
    }

    fn head_id(&self) -> Result<ObjectId> {
        if let Some(id) = self.current {
            return Ok(id);
        }
        let mut head = self.repo.head()?;
        Ok(head.peel_to_commit_in_place()?.id)
    }

    fn commit_time(&self, id: ObjectId) -> Result<i64> {
        Ok(self.repo.find_commit(id)?.time()?.seconds)
    }

    /// Every commit reachable from `tip`, `tip` included.
    fn ancestors(&self, tip: ObjectId) -> Result<HashSet<ObjectId>> {
        let mut seen = HashSet::new();
        let mut stack = vec![tip];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let commit = self.repo.find_commit(id)?;
            stack.extend(commit.parent_ids().map(|p| p.detach()));
        }
        Ok(seen)
    }

    fn walk(&self, tip: ObjectId, hidden: &HashSet<ObjectId>) -> Result<Vec<CommitRecord>> {
        let mut records = Vec::new();
        if hidden.contains(&tip) {
            return Ok(records);
        }

        let mut seen: HashSet<ObjectId> = HashSet::from([tip]);
        let mut queue: BinaryHeap<(i64, ObjectId)> = BinaryHeap::new();
        queue.push((self.commit_time(tip)?, tip));

        while let Some((_, id)) = queue.pop() {
            let commit = self.repo.find_commit(id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|p| p.detach()).collect();

            records.push(self.commit_record(&commit, parents.first().copied())?);

            for pid in parents {
                if hidden.contains(&pid) || !seen.insert(pid) {
                    continue;
                }
                queue.push((self.commit_time(pid)?, pid));
            }
        }
        Ok(records)
    }

    fn commit_record(&self, commit: &gix::Commit<'_>, parent: Option<ObjectId>) -> Result<CommitRecord> {
        let author = commit.author()?;
        let committer = commit.committer()?;
        let summary = commit.message()?.title.to_string().trim().to_string();
        let message = commit.message_raw()?.to_string();

        Ok(CommitRecord {
            id: commit.id.to_string(),
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            committer_name: committer.name.to_string(),
            committer_email: committer.email.to_string(),
            summary,
            message,
            stats: self.diff_stats(commit, parent)?,
        })
    }

    fn diff_stats(&self, commit: &gix::Commit<'_>, parent: Option<ObjectId>) -> Result<DiffStats> {
        let commit_tree = commit.tree()?;
        let parent_tree = match parent {
            Some(pid) => Some(self.repo.find_commit(pid)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut stats = DiffStats::default();
        for change in changes {
            self.handle_change(change, &mut stats);
        }
        trace!(commit = %commit.id, ?stats, "diff stats");
        Ok(stats)
    }

    fn handle_change(&self, change: ChangeDetached, stats: &mut DiffStats) {
        match change {
            ChangeDetached::Addition { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return;
                }
                let added = self.blob_lines(id);
                stats.add_file(added, 0);
            }
            ChangeDetached::Deletion { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return;
                }
                let deleted = self.blob_lines(id);
                stats.add_file(0, deleted);
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return;
                }
                let (added, deleted) = self.line_diff(previous_id, id);
                stats.add_file(added, deleted);
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return;
                }
                let (added, deleted) = self.line_diff(source_id, id);
                stats.add_file(added, deleted);
            }
        }
    }

    /// Text of a blob; `None` for binaries and objects outside this
    /// repository (submodule commits).
    fn blob_text(&self, id: ObjectId) -> Option<String> {
        let object = self.repo.find_object(id).ok()?;
        let data = object.data.as_slice();
        if data.iter().take(8192).any(|&b| b == 0) {
            return None;
        }
        Some(String::from_utf8_lossy(data).into_owned())
    }

    fn blob_lines(&self, id: ObjectId) -> u64 {
        self.blob_text(id)
            .map(|text| text.lines().count() as u64)
            .unwrap_or(0)
    }

    fn line_diff(&self, old_id: ObjectId, new_id: ObjectId) -> (u64, u64) {
        let (Some(old_text), Some(new_text)) = (self.blob_text(old_id), self.blob_text(new_id)) else {
            return (0, 0);
        };

        TextDiff::from_lines(&old_text, &new_text)
            .iter_all_changes()
            .fold((0, 0), |(added, deleted), change| match change.tag() {
                ChangeTag::Insert => (added + 1, deleted),
                ChangeTag::Delete => (added, deleted + 1),
                ChangeTag::Equal => (added, deleted),
            })
    }
}

impl Repository for GitRepo {
    fn workdir(&self) -> &Path {
        &self.path
    }

    fn switch_to(&mut self, branch: &str) -> Result<()> {
        // After a fetch the remote-tracking ref is newer than the local branch.
        let candidates = [format!("origin/{branch}"), branch.to_string()];
        for candidate in &candidates {
            if let Ok(id) = self.resolve_commit(candidate) {
                debug!("Switched to {candidate} ({id})");
                self.current = Some(id);
                return Ok(());
            }
        }
        Err(DocstatsError::checkout(branch, "no such branch or revision"))
    }

    fn commits(&self, range: &RevisionRange) -> Result<Vec<CommitRecord>> {
        let (tip, hidden) = match range {
            RevisionRange::Full => (self.head_id()?, HashSet::new()),
            RevisionRange::Bounded { start, end } => {
                let tip = match end {
                    Some(end) => self.resolve_commit(end)?,
                    None => self.head_id()?,
                };
                let hidden = match start {
                    Some(start) => self.ancestors(self.resolve_commit(start)?)?,
                    None => HashSet::new(),
                };
                (tip, hidden)
            }
        };
        self.walk(tip, &hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> String {
        let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
        assert!(out.status.success(), "git {args:?} failed");
        String::from_utf8(out.stdout).unwrap().trim().to_string()
    }

    /// Linear history c1..c4; returns the ids oldest first.
    fn linear_repo() -> Option<(TempDir, Vec<String>)> {
        Command::new("git").arg("--version").output().ok()?;
        let dir = TempDir::new().unwrap();
        let path = dir.path();
        git(path, &["init", "--quiet"]);
        git(path, &["config", "user.email", "you@example.com"]);
        git(path, &["config", "user.name", "Your Name"]);

        let mut ids = Vec::new();
        for i in 1..=4 {
            std::fs::write(path.join("file.txt"), "line\n".repeat(i)).unwrap();
            git(path, &["add", "."]);
            git(path, &["commit", "--quiet", "-m", &format!("c{i}")]);
            ids.push(git(path, &["rev-parse", "HEAD"]));
        }
        git(path, &["tag", "v1", &ids[1]]);
        Some((dir, ids))
    }

    fn summaries(repo: &GitRepo, start: &str, end: &str) -> Vec<String> {
        repo.commits(&RevisionRange::from_bounds(start, end))
            .unwrap()
            .into_iter()
            .map(|c| c.summary)
            .collect()
    }

    #[test]
    fn ranges_follow_git_semantics() {
        let Some((dir, ids)) = linear_repo() else { return };
        let repo = GitRepo::open(dir.path()).unwrap();

        assert_eq!(summaries(&repo, "", "").len(), 4);
        assert_eq!(summaries(&repo, "v1", ""), vec!["c4", "c3"]);
        assert_eq!(summaries(&repo, "", &ids[1]), vec!["c2", "c1"]);
        assert_eq!(summaries(&repo, &ids[0], &ids[2]), vec!["c3", "c2"]);
        assert!(summaries(&repo, &ids[3], &ids[3]).is_empty());
    }

    #[test]
    fn diff_stats_count_lines_per_commit() {
        let Some((dir, _)) = linear_repo() else { return };
        let repo = GitRepo::open(dir.path()).unwrap();

        let commits = repo.commits(&RevisionRange::Full).unwrap();
        let root = commits.last().unwrap();
        assert_eq!(root.stats, DiffStats { insertions: 1, deletions: 0, files: 1, lines: 1 });
        assert_eq!(commits[0].stats.insertions, 1);
        assert_eq!(commits[0].stats.deletions, 0);
    }

    #[test]
    fn switching_to_unknown_branch_fails() {
        let Some((dir, _)) = linear_repo() else { return };
        let mut repo = GitRepo::open(dir.path()).unwrap();

        assert!(matches!(
            repo.switch_to("no-such-branch"),
            Err(DocstatsError::Checkout { .. })
        ));
        repo.switch_to("v1").unwrap();
        assert_eq!(summaries(&repo, "", ""), vec!["c2", "c1"]);
    }

    #[test]
    fn unknown_revision_is_an_error() {
        let Some((dir, _)) = linear_repo() else { return };
        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(repo.commits(&RevisionRange::from_bounds("nope", "")).is_err());
    }
}
