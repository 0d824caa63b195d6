use super::GitRepo;
use crate::error::{DocstatsError, Result};
use crate::util::elapsed;
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use tracing::{debug, info};

/// Clones `url` into `gitdir`, or reuses an existing clone and fetches it
/// when `update` is set.
pub fn acquire(url: &str, gitdir: &Path, update: bool) -> Result<GitRepo> {
    let start = Instant::now();

    if gitdir.exists() {
        info!("{url} already cloned, using {}", gitdir.display());
        if update {
            git(url, Some(gitdir), &["fetch", "--quiet", "--prune", "origin"])?;
            debug!("Fetched {url} in {}", elapsed(start));
        }
    } else {
        if let Some(parent) = gitdir.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("Cloning {url} to {}", gitdir.display());
        let target = gitdir.to_string_lossy();
        git(url, None, &["clone", "--quiet", url, target.as_ref()])?;
        debug!("Cloned {url} in {}", elapsed(start));
    }

    GitRepo::open(gitdir)
}

fn git(url: &str, dir: Option<&Path>, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let output = cmd
        .args(args)
        .output()
        .map_err(|e| DocstatsError::acquire(url, format!("failed to invoke git: {e}")))?;

    if !output.status.success() {
        return Err(DocstatsError::acquire(
            url,
            format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }
    Ok(())
}
