use regex::{Captures, Regex};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("valid regex literal"));

/// Replaces `$NAME` and `${NAME}` with environment values; unknown variables
/// are kept as written.
pub fn expand_env(path: &str) -> String {
    ENV_VAR_RE
        .replace_all(path, |caps: &Captures| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

pub fn elapsed(start: Instant) -> humantime::FormattedDuration {
    humantime::format_duration(Duration::from_millis(start.elapsed().as_millis() as u64))
}
