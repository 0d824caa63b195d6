use crate::config::RepoConfig;
use crate::error::{DocstatsError, Result};
use crate::git::{self, Repository};
use crate::model::{CsvRow, RepositoryReport, SCHEMA_VERSION};
use crate::stats::aggregate::analyze_branches;
use crate::stats::normalize::table_rows;
use crate::stats::output::{output_stem, write_files};
use crate::util::elapsed;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, info_span};

/// Settings shared read-only by every repository task.
#[derive(Debug, Clone)]
pub struct AnalyzeContext {
    pub basedir: PathBuf,
    pub outdir: PathBuf,
    pub update: bool,
    pub progress: bool,
}

/// A repository that was acquired and analyzed.
#[derive(Debug)]
pub struct RepositoryRun {
    pub report: RepositoryReport,
    pub rows: Vec<CsvRow>,
    pub json_path: PathBuf,
}

pub type RepositoryOutcome = (String, Result<RepositoryRun>);

/// Acquires one repository, walks all of its branch ranges and writes the
/// JSON and CSV files.
pub fn clone_and_analyze(ctx: &AnalyzeContext, repo_config: &RepoConfig) -> Result<RepositoryRun> {
    let start = Instant::now();
    let gitdir = repo_config.clone_dir(&ctx.basedir);
    let mut repo = git::acquire(&repo_config.url, &gitdir, ctx.update)?;

    let ranges = repo_config.ranges();
    let branches = analyze_branches(&mut repo, &repo_config.team, &ranges);
    let rows = table_rows(&branches);

    let report = RepositoryReport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repo_config.name.clone(),
        url: repo_config.url.clone(),
        repository_path: repo.workdir().display().to_string(),
        branches,
    };

    let stem = output_stem(repo.workdir());
    let json_path = write_files(&report, &rows, &ctx.outdir, &stem)?;
    info!(
        "Analyzed {} range(s) in {}, wrote {}",
        ranges.len(),
        elapsed(start),
        json_path.display()
    );

    Ok(RepositoryRun {
        report,
        rows,
        json_path,
    })
}

/// Runs one task per repository on a pool of `jobs` threads. Results come
/// back in the order of `repos`; a failed repository never stops the others.
pub fn work(ctx: &AnalyzeContext, repos: &[RepoConfig], jobs: usize) -> Result<Vec<RepositoryOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|i| format!("docstats-worker-{i}"))
        .build()
        .map_err(|e| DocstatsError::Other(format!("Failed to build worker pool: {e}")))?;

    let pb = progress_bar(repos.len() as u64, ctx.progress);

    let outcomes = pool.install(|| {
        repos
            .par_iter()
            .map(|repo_config| {
                let span = info_span!("repo", name = %repo_config.name);
                let _guard = span.enter();

                pb.set_message(repo_config.name.clone());
                let outcome = clone_and_analyze(ctx, repo_config);
                if let Err(e) = &outcome {
                    error!("{} ({}) failed: {e}", repo_config.name, repo_config.url);
                }
                pb.inc(1);
                (repo_config.name.clone(), outcome)
            })
            .collect()
    });

    pb.finish_and_clear();
    Ok(outcomes)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::committer::TeamRoster;
    use tempfile::TempDir;

    fn repo_config(name: &str, url: &str) -> RepoConfig {
        RepoConfig {
            name: name.into(),
            url: url.into(),
            branch: "develop".into(),
            branches: None,
            team: TeamRoster::default(),
            start: String::new(),
            end: String::new(),
        }
    }

    #[test]
    fn unreachable_repositories_are_contained() {
        let tmp = TempDir::new().unwrap();
        let ctx = AnalyzeContext {
            basedir: tmp.path().join("clones"),
            outdir: tmp.path().join("out"),
            update: false,
            progress: false,
        };
        let missing = tmp.path().join("does-not-exist");
        let repos = vec![
            repo_config("first", &missing.display().to_string()),
            repo_config("second", &missing.display().to_string()),
        ];

        let outcomes = work(&ctx, &repos, 2).unwrap();
        let names: Vec<_> = outcomes.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(outcomes.iter().all(|(_, outcome)| outcome.is_err()));
    }
}
