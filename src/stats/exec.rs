use super::normalize::table_rows;
use super::output::{output_table, write_csv};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::model::RepositoryReport;
use crate::worker::{self, AnalyzeContext};
use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AnalyzeOptions {
    pub sections: Vec<String>,
    pub output: Option<PathBuf>,
    pub no_update: bool,
    pub json: bool,
    pub csv: bool,
}

pub fn analyze(common: &CommonArgs, config_path: &Path, opts: AnalyzeOptions) -> anyhow::Result<()> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("Failed to read configuration {}", config_path.display()))?;

    let repos = config.repositories(&opts.sections);
    if repos.is_empty() {
        warn!("No repositories to analyze in {}", config_path.display());
        return Ok(());
    }

    let ctx = AnalyzeContext {
        basedir: config.tempdir(),
        outdir: opts.output.unwrap_or_else(|| config.output_dir()),
        update: !opts.no_update,
        progress: !common.quiet && !opts.json && !opts.csv,
    };
    let jobs = common.jobs.unwrap_or_else(|| config.jobs());
    info!(
        "Analyzing {} repositories with {jobs} job(s), clones in {}",
        repos.len(),
        ctx.basedir.display()
    );

    let outcomes = worker::work(&ctx, &repos, jobs).context("Failed to run repository workers")?;

    let mut reports = Vec::new();
    let mut failed = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(run) => reports.push(run),
            Err(e) => failed.push((name, e)),
        }
    }

    if opts.json {
        let all: Vec<&RepositoryReport> = reports.iter().map(|run| &run.report).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else if opts.csv {
        for run in &reports {
            write_csv(std::io::stdout().lock(), &run.rows)?;
        }
    } else {
        for run in &reports {
            output_table(&run.report, &run.rows);
        }
    }

    if !failed.is_empty() {
        warn!("{} of {} repositories failed", failed.len(), repos.len());
        for (name, e) in &failed {
            warn!("  {name}: {e}");
        }
    }
    Ok(())
}

/// Prints a previously written JSON result file.
pub fn report(json_file: &Path, csv: bool) -> anyhow::Result<()> {
    let file = File::open(json_file).with_context(|| format!("Failed to open {}", json_file.display()))?;
    let report: RepositoryReport = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a docstats result file", json_file.display()))?;

    let rows = table_rows(&report.branches);
    if csv {
        write_csv(std::io::stdout().lock(), &rows)?;
    } else {
        output_table(&report, &rows);
    }
    Ok(())
}
