use crate::model::BranchRange;
use tracing::warn;

/// Parses a branch specification, one `NAME [BRANCH] [[START]..[END]]` entry
/// per line.
///
/// A missing branch falls back to `default_branch`. A range token without
/// `..` only sets the start. Lines starting with `#` or `;` are comments.
/// Entries are returned in input order, duplicates included.
pub fn resolve(spec: Option<&str>, default_branch: &str) -> Vec<BranchRange> {
    let Some(spec) = spec else {
        return Vec::new();
    };

    spec.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
        .map(|line| parse_line(line, default_branch))
        .collect()
}

fn parse_line(line: &str, default_branch: &str) -> BranchRange {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > 3 {
        warn!("Ignoring extra fields in branch entry '{line}'");
    }

    match tokens.as_slice() {
        [name] => BranchRange::new(name, default_branch, "", ""),
        [name, range] if range.contains("..") => {
            let (start, end) = split_range(range);
            BranchRange::new(name, default_branch, start, end)
        }
        [name, branch] => BranchRange::new(name, branch, "", ""),
        [name, branch, range, ..] => {
            let (start, end) = split_range(range);
            BranchRange::new(name, branch, start, end)
        }
        // `line` is trimmed and non-empty, so there is at least one token
        [] => BranchRange::new(line, default_branch, "", ""),
    }
}

fn split_range(token: &str) -> (&str, &str) {
    token.split_once("..").unwrap_or((token, ""))
}
