use crate::model::{BranchOutcome, BranchResult, CsvRow, RepositoryResult};
use crate::tracker::TrackerKind;
use std::collections::HashSet;

/// Deduplicates every accumulated collection and turns committer buckets
/// into counts. Running it again changes nothing.
pub fn normalize(result: &mut RepositoryResult) {
    for outcome in result.values_mut() {
        if let BranchOutcome::Stats(branch) = outcome {
            normalize_branch(branch);
        }
    }
}

pub fn normalize_branch(branch: &mut BranchResult) {
    branch.team_committers.finalize();
    branch.external_committers.finalize();
    dedup(&mut branch.team_committers_mails);
    dedup(&mut branch.external_committers_mails);
    for kind in TrackerKind::ALL {
        dedup(branch.trackers.list_mut(kind));
    }
}

fn dedup(list: &mut Vec<String>) {
    list.sort_unstable();
    list.dedup();
}

fn distinct(list: &[String]) -> usize {
    list.iter().collect::<HashSet<_>>().len()
}

/// Flattens a branch into the counts of the tabular export.
pub fn tabular(name: &str, branch: &BranchResult) -> CsvRow {
    let trackers = &branch.trackers;
    CsvRow {
        release: name.to_string(),
        commits: branch.commits,
        insertions: branch.insertions,
        deletions: branch.deletions,
        lines: branch.lines,
        fate: distinct(trackers.list(TrackerKind::Fate)),
        bnc: 0,
        bsc: distinct(trackers.list(TrackerKind::Bugzilla)),
        files: branch.files,
        trello: distinct(trackers.list(TrackerKind::Trello)),
        gh: distinct(trackers.list(TrackerKind::GitHub)),
        doccomments: distinct(trackers.list(TrackerKind::GitHubCross)),
        team_committers: branch.team_committers.count(),
        external_committers: branch.external_committers.count(),
    }
}

/// Rows of every successfully analyzed branch, sorted by logical name.
pub fn table_rows(result: &RepositoryResult) -> Vec<CsvRow> {
    let mut rows: Vec<CsvRow> = result
        .iter()
        .filter_map(|(name, outcome)| outcome.stats().map(|branch| tabular(name, branch)))
        .collect();
    rows.sort_by(|a, b| a.release.cmp(&b.release));
    rows
}
