use super::normalize::normalize;
use crate::committer::TeamRoster;
use crate::error::Result;
use crate::git::{Repository, RevisionRange};
use crate::model::{BranchOutcome, BranchRange, BranchResult, CommitRecord, RepositoryResult};
use crate::tracker::find_references;
use tracing::{debug, info, warn};

/// Aggregates one branch range into `result` under `range.name`.
///
/// A branch that cannot be checked out is recorded as an error entry and is
/// not an error of this function. Errors while walking commits propagate;
/// nothing is recorded for the range in that case.
pub fn iter_commits<R: Repository + ?Sized>(
    repo: &mut R,
    roster: &TeamRoster,
    result: &mut RepositoryResult,
    range: &BranchRange,
) -> Result<()> {
    if let Err(e) = repo.switch_to(&range.branch) {
        warn!(
            "{}: cannot check out '{}' for {}: {e}",
            repo.workdir().display(),
            range.branch,
            range.name
        );
        insert(result, &range.name, BranchOutcome::error(e));
        return Ok(());
    }

    let revisions = RevisionRange::from_bounds(&range.start, &range.end);
    debug!("Walking {} of {} as {}", revisions, range.branch, range.name);

    let mut branch = BranchResult::new(range);
    let commits = repo.commits(&revisions)?;
    for commit in &commits {
        accumulate(&mut branch, roster, commit);
    }
    branch.commits = commits.len() as u64;

    info!("{}: {} commits", range.name, branch.commits);
    insert(result, &range.name, BranchOutcome::Stats(Box::new(branch)));
    Ok(())
}

/// Adds one commit to a branch: diff totals, committer, tracker references
/// found in the summary and in the full message.
pub fn accumulate(branch: &mut BranchResult, roster: &TeamRoster, commit: &CommitRecord) {
    branch.add_stats(&commit.stats);
    branch.record_committer(roster.classify(&commit.committer_name, &commit.committer_email));
    for text in [&commit.summary, &commit.message] {
        for reference in find_references(text) {
            branch.trackers.push(reference);
        }
    }
}

/// Walks every range in order and returns the normalized result. A failing
/// walk only marks its own range as failed.
pub fn analyze_branches<R: Repository + ?Sized>(
    repo: &mut R,
    roster: &TeamRoster,
    ranges: &[BranchRange],
) -> RepositoryResult {
    let mut result = RepositoryResult::new();
    for range in ranges {
        if let Err(e) = iter_commits(repo, roster, &mut result, range) {
            warn!(
                "{}: walking '{}' for {} failed: {e}",
                repo.workdir().display(),
                range.branch,
                range.name
            );
            insert(&mut result, &range.name, BranchOutcome::error(e));
        }
    }
    normalize(&mut result);
    result
}

fn insert(result: &mut RepositoryResult, name: &str, outcome: BranchOutcome) {
    if result.insert(name.to_string(), outcome).is_some() {
        warn!("Branch entry '{name}' appears more than once, keeping the last one");
    }
}
