//! Team roster and committer classification.
//!
//! A roster is written one person per line. A line lists every address the
//! person commits with; the first one is canonical. An optional display name
//! may precede the addresses:
//!
//! ```text
//! # docs team
//! Tux Penguin <tux@example.org>, tux@old.example.org
//! wilber@example.net
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static MAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\s<>,;"]+@[^\s<>,;"]+"#).expect("valid regex literal"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committer {
    /// Roster member, identified by the canonical address.
    Team(String),
    /// Anyone else, identified by the lowercased commit address.
    External(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    mails: HashMap<String, String>,
    names: HashMap<String, String>,
}

impl TeamRoster {
    pub fn parse(text: Option<&str>) -> Self {
        let mut roster = Self::default();
        let Some(text) = text else {
            return roster;
        };

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let mut found = MAIL_RE.find_iter(line).peekable();
            let Some(first) = found.peek() else {
                continue;
            };

            let name = line[..first.start()]
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, '<' | ',' | '"'))
                .to_lowercase();

            let mut canonical: Option<String> = None;
            for m in found {
                let mail = m.as_str().to_lowercase();
                let primary = canonical.get_or_insert_with(|| mail.clone()).clone();
                roster.mails.insert(mail, primary);
            }

            if let Some(primary) = canonical.filter(|_| !name.is_empty()) {
                roster.names.insert(name, primary);
            }
        }
        roster
    }

    pub fn len(&self) -> usize {
        self.mails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mails.is_empty()
    }

    pub fn canonical(&self, email: &str) -> Option<&str> {
        self.mails.get(&email.to_lowercase()).map(String::as_str)
    }

    /// Decides whether a commit identity belongs to the team. The address is
    /// looked up first; a display name listed in the roster matches as well.
    pub fn classify(&self, name: &str, email: &str) -> Committer {
        let email = email.to_lowercase();
        if let Some(primary) = self.mails.get(&email) {
            return Committer::Team(primary.clone());
        }
        let name = name.trim().to_lowercase();
        match self.names.get(&name) {
            Some(primary) if !name.is_empty() => Committer::Team(primary.clone()),
            _ => Committer::External(email),
        }
    }
}
