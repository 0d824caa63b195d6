use super::{TrackerKind, TrackerRef};
use regex::Regex;
use std::sync::LazyLock;

static CVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bCVE-(\d{4})-(\d{4,7})\b").expect("valid regex literal"));

pub fn cves(text: &str) -> Vec<TrackerRef> {
    CVE_RE
        .captures_iter(text)
        .map(|c| TrackerRef::new(TrackerKind::Cve, format!("{}-{}", &c[1], &c[2])))
        .collect()
}
