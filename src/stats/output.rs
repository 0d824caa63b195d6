use crate::error::Result;
use crate::model::{BranchOutcome, CsvRow, RepositoryReport};
use console::style;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output files are named after the last component of the working directory.
pub fn output_stem(workdir: &Path) -> String {
    workdir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string())
}

/// Writes `<dir>/<stem>.json` and `<dir>/<stem>.csv`, returning the JSON path.
pub fn write_files(report: &RepositoryReport, rows: &[CsvRow], dir: &Path, stem: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let json_path = dir.join(format!("{stem}.json"));
    let mut out = BufWriter::new(File::create(&json_path)?);
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    out.flush()?;

    let csv_path = dir.join(format!("{stem}.csv"));
    write_csv(File::create(csv_path)?, rows)?;

    Ok(json_path)
}

pub fn write_csv<W: Write>(out: W, rows: &[CsvRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn output_table(report: &RepositoryReport, rows: &[CsvRow]) {
    println!(
        "{} {}",
        style(&report.repository).bold(),
        style(&report.url).dim()
    );
    println!(
        "{:<30} {:>7} {:>8} {:>8} {:>5} {:>5} {:>5} {:>6} {:>5} {:>5}",
        style("Release").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Deleted").bold(),
        style("Files").bold(),
        style("bsc").bold(),
        style("gh").bold(),
        style("trello").bold(),
        style("Team").bold(),
        style("Ext").bold(),
    );
    println!("{}", "─".repeat(98));
    for r in rows {
        println!(
            "{:<30} {:>7} {:>8} {:>8} {:>5} {:>5} {:>5} {:>6} {:>5} {:>5}",
            r.release,
            r.commits,
            style(r.insertions).green(),
            style(r.deletions).red(),
            r.files,
            r.bsc,
            r.gh,
            r.trello,
            r.team_committers,
            r.external_committers,
        );
    }
    for (name, outcome) in &report.branches {
        if let BranchOutcome::Error { error } = outcome {
            println!("{:<30} {}", name, style(error).red());
        }
    }
    println!();
}
