//! Configuration file.
//!
//! ```toml
//! [globals]
//! branch = "develop"
//! tempdir = "/tmp/docstats-$USER"
//! team = """
//! Tux Penguin <tux@example.org>
//! """
//!
//! [doc-sle]
//! url = "git@github.com:SUSE/doc-sle.git"
//! branches = """
//! sle15  maintenance/SLE15  abc..def
//! """
//! ```
//!
//! Every repository table falls back to `[globals]` for the keys it omits.

use crate::branches;
use crate::committer::TeamRoster;
use crate::error::Result;
use crate::model::BranchRange;
use crate::util::expand_env;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

pub const DEFAULT_BRANCH: &str = "develop";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub branches: Option<String>,
    pub team: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Globals {
    #[serde(flatten)]
    pub defaults: Section,
    pub tempdir: Option<String>,
    pub output: Option<PathBuf>,
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub globals: Globals,
    #[serde(flatten)]
    pub sections: BTreeMap<String, Section>,
}

/// Everything needed to analyze one repository.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub name: String,
    pub url: String,
    pub branch: String,
    pub branches: Option<String>,
    pub team: TeamRoster,
    pub start: String,
    pub end: String,
}

impl Config {
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Directory the repositories are cloned into.
    pub fn tempdir(&self) -> PathBuf {
        match &self.globals.tempdir {
            Some(dir) => PathBuf::from(expand_env(dir)),
            None => std::env::temp_dir().join("docstats"),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.globals
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn jobs(&self) -> usize {
        self.globals.jobs.unwrap_or(1).max(1)
    }

    /// Repositories to analyze, optionally restricted to `only` section names.
    pub fn repositories(&self, only: &[String]) -> Vec<RepoConfig> {
        for name in only {
            if !self.sections.contains_key(name) {
                warn!("Section '{name}' not found in configuration");
            }
        }

        self.sections
            .iter()
            .filter(|(name, _)| only.is_empty() || only.contains(name))
            .filter_map(|(name, section)| self.resolve(name, section))
            .collect()
    }

    fn resolve(&self, name: &str, section: &Section) -> Option<RepoConfig> {
        let defaults = &self.globals.defaults;
        let pick = |own: &Option<String>, global: &Option<String>| own.clone().or_else(|| global.clone());

        let url = pick(&section.url, &defaults.url).filter(|u| !u.trim().is_empty());
        let Some(url) = url else {
            warn!("Section '{name}' has no url, skipping");
            return None;
        };

        let team = pick(&section.team, &defaults.team);
        Some(RepoConfig {
            name: name.to_string(),
            url: url.trim().to_string(),
            branch: pick(&section.branch, &defaults.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            branches: pick(&section.branches, &defaults.branches),
            team: TeamRoster::parse(team.as_deref()),
            start: pick(&section.start, &defaults.start).unwrap_or_default(),
            end: pick(&section.end, &defaults.end).unwrap_or_default(),
        })
    }
}

impl RepoConfig {
    /// Branch ranges from `branches`, or the default branch with the
    /// configured start/end when there is none.
    pub fn ranges(&self) -> Vec<BranchRange> {
        let ranges = branches::resolve(self.branches.as_deref(), &self.branch);
        if ranges.is_empty() {
            vec![BranchRange::default_for(&self.branch, &self.start, &self.end)]
        } else {
            ranges
        }
    }

    /// Clone location below `basedir`; the section name unless it is not a
    /// plain directory name.
    pub fn clone_dir(&self, basedir: &Path) -> PathBuf {
        let plain = !self.name.is_empty()
            && self.name != "."
            && self.name != ".."
            && !self.name.contains(['/', '\\']);
        if plain {
            return basedir.join(&self.name);
        }
        match RepoUrl::parse(&self.url) {
            Some(url) => basedir.join(format!("{}-{}", url.domain, url.repo)),
            None => basedir.join(self.name.replace(['/', '\\', '.'], "_")),
        }
    }
}

static GIT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<user>[\w.-]+)@(?P<server>[\w.-]+):(?P<domain>[\w.-]+)/(?P<repo>[\w.-]+?)(?:\.git)?/?$")
        .expect("valid regex literal")
});

static HTTP_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z][a-z+]*://(?:(?P<user>[^@/]+)@)?(?P<server>[\w.-]+(?::\d+)?)/(?P<domain>[\w.-]+)/(?P<repo>[\w.-]+?)(?:\.git)?/?$",
    )
    .expect("valid regex literal")
});

/// Parts of a hosted repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    pub user: Option<String>,
    pub server: String,
    pub domain: String,
    pub repo: String,
}

impl RepoUrl {
    /// Understands `git@server:domain/repo.git` and `scheme://server/domain/repo`.
    /// Local paths and anything else give `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let caps = GIT_URL_RE
            .captures(url)
            .or_else(|| HTTP_URL_RE.captures(url))?;
        Some(Self {
            user: caps.name("user").map(|m| m.as_str().to_string()),
            server: caps["server"].to_string(),
            domain: caps["domain"].to_string(),
            repo: caps["repo"].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[globals]
branch = "develop"
jobs = 3
team = """
tux@example.org
"""

[doc-a]
url = "git://doc-a.git"

[doc-b]
url = "git://doc-b.git"
branch = "main"
branches = """
maint/a
maint/b  abce
maint/c  ..f123
# maint/x
maint/d  abce..
maint/e  1234..345a
"""
team = "wilber@example.net"

[doc-c]
url = ""
"#;

    fn config() -> Config {
        Config::parse(SAMPLE).unwrap()
    }

    #[test]
    fn sections_without_url_are_skipped() {
        let names: Vec<_> = config()
            .repositories(&[])
            .into_iter()
            .map(|r| (r.name, r.url))
            .collect();
        assert_eq!(
            names,
            vec![
                ("doc-a".to_string(), "git://doc-a.git".to_string()),
                ("doc-b".to_string(), "git://doc-b.git".to_string()),
            ]
        );
    }

    #[test]
    fn section_filter() {
        let repos = config().repositories(&["doc-b".to_string(), "missing".to_string()]);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "doc-b");
    }

    #[test]
    fn globals_are_inherited() {
        let repos = config().repositories(&[]);
        let doc_a = &repos[0];
        assert_eq!(doc_a.branch, "develop");
        assert_eq!(doc_a.team.canonical("tux@example.org"), Some("tux@example.org"));
        assert_eq!(
            doc_a.ranges(),
            vec![BranchRange::new("develop", "develop", "", "")]
        );

        let doc_b = &repos[1];
        assert_eq!(doc_b.branch, "main");
        assert!(doc_b.team.canonical("tux@example.org").is_none());
        assert_eq!(config().jobs(), 3);
    }

    #[test]
    fn branch_specification_of_a_section() {
        let repos = config().repositories(&[]);
        let ranges: Vec<_> = repos[1]
            .ranges()
            .into_iter()
            .map(|r| (r.name, r.branch, r.start, r.end))
            .collect();
        let t = |n: &str, b: &str, s: &str, e: &str| (n.to_string(), b.to_string(), s.to_string(), e.to_string());
        assert_eq!(
            ranges,
            vec![
                t("maint/a", "main", "", ""),
                t("maint/b", "abce", "", ""),
                t("maint/c", "main", "", "f123"),
                t("maint/d", "main", "abce", ""),
                t("maint/e", "main", "1234", "345a"),
            ]
        );
    }

    #[test]
    fn defaults_without_globals() {
        let config = Config::parse("[repo]\nurl = \"/srv/git/repo\"\n").unwrap();
        let repos = config.repositories(&[]);
        assert_eq!(repos[0].branch, DEFAULT_BRANCH);
        assert!(repos[0].team.is_empty());
        assert_eq!(config.jobs(), 1);
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("[globals\nbranch = ").is_err());
    }

    #[test]
    fn clone_dir_prefers_section_name() {
        let mut repo = config().repositories(&[]).remove(0);
        assert_eq!(repo.clone_dir(Path::new("/tmp/x")), PathBuf::from("/tmp/x/doc-a"));

        repo.name = "suse/doc".into();
        repo.url = "git@github.com:SUSE/doc-sle.git".into();
        assert_eq!(repo.clone_dir(Path::new("/tmp/x")), PathBuf::from("/tmp/x/SUSE-doc-sle"));
    }

    #[test]
    fn url_forms() {
        let url = |user: Option<&str>, server: &str, domain: &str, repo: &str| RepoUrl {
            user: user.map(str::to_string),
            server: server.into(),
            domain: domain.into(),
            repo: repo.into(),
        };
        assert_eq!(
            RepoUrl::parse("git@github.com:x/y.git"),
            Some(url(Some("git"), "github.com", "x", "y"))
        );
        assert_eq!(
            RepoUrl::parse("git@Foo-bar.com:X-Z/A-b.git"),
            Some(url(Some("git"), "Foo-bar.com", "X-Z", "A-b"))
        );
        assert_eq!(
            RepoUrl::parse("https://github.com/X/Y.git"),
            Some(url(None, "github.com", "X", "Y"))
        );
        assert_eq!(
            RepoUrl::parse("ftp://github.com/X/Y"),
            Some(url(None, "github.com", "X", "Y"))
        );
        assert_eq!(RepoUrl::parse("http://github.com"), None);
        assert_eq!(RepoUrl::parse("/srv/git/repo"), None);
        assert_eq!(RepoUrl::parse("git@x"), None);
    }
}
