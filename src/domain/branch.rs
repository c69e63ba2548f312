use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ticket::Ticket;

pub const SUMMARY_SLUG_MAX_LEN: usize = 50;

/// Prefix applied when a ticket type has no entry in the prefix map.
pub const DEFAULT_TYPE_PREFIX: &str = "feature";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Lower,
    Upper,
    Preserve,
}

impl KeyCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCase::Lower => "lower",
            KeyCase::Upper => "upper",
            KeyCase::Preserve => "preserve",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lower" => Some(KeyCase::Lower),
            "upper" => Some(KeyCase::Upper),
            "preserve" | "original" => Some(KeyCase::Preserve),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BranchNamingConfig {
    /// Template with `{type}`, `{ticket_key}` and `{summary}` placeholders.
    pub pattern: String,
    pub use_prefixes: bool,
    /// Ticket type (matched case-insensitively) to branch prefix.
    pub prefix_map: BTreeMap<String, String>,
    pub key_case: KeyCase,
}

impl Default for BranchNamingConfig {
    fn default() -> Self {
        Self {
            pattern: "{type}/{ticket_key}-{summary}".to_string(),
            use_prefixes: true,
            prefix_map: default_prefix_map(),
            key_case: KeyCase::Lower,
        }
    }
}

pub fn default_prefix_map() -> BTreeMap<String, String> {
    [
        ("Bug", "bugfix"),
        ("Story", "feature"),
        ("Task", "feature"),
        ("Epic", "feature"),
        ("Improvement", "improvement"),
        ("Spike", "spike"),
    ]
    .into_iter()
    .map(|(kind, prefix)| (kind.to_string(), prefix.to_string()))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministically derive a branch name from a ticket and naming rules.
    pub fn generate(ticket: &Ticket, config: &BranchNamingConfig) -> Self {
        let key = match config.key_case {
            KeyCase::Lower => ticket.key.trim().to_lowercase(),
            KeyCase::Upper => ticket.key.trim().to_uppercase(),
            KeyCase::Preserve => ticket.key.trim().to_string(),
        };
        let summary = slugify(&ticket.summary, SUMMARY_SLUG_MAX_LEN);
        let prefix = if config.use_prefixes {
            resolve_prefix(&ticket.issue_type, &config.prefix_map)
        } else {
            String::new()
        };

        let raw = config
            .pattern
            .replace("{type}", &prefix)
            .replace("{ticket_key}", &key)
            .replace("{summary}", &summary);

        let mut name = sanitize_ref(&raw);
        if name.is_empty() {
            name = sanitize_ref(&key);
        }
        if name.is_empty() {
            name = "ticket".to_string();
        }
        Self(name)
    }

    /// Clean up a user-edited name with the same rules as generated ones.
    /// Returns `None` when nothing usable remains.
    pub fn from_user_input(input: &str) -> Option<Self> {
        let name = sanitize_ref(input);
        if name.is_empty() { None } else { Some(Self(name)) }
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn resolve_prefix(issue_type: &str, prefix_map: &BTreeMap<String, String>) -> String {
    let wanted = issue_type.trim();
    prefix_map
        .iter()
        .find(|(kind, _)| kind.eq_ignore_ascii_case(wanted))
        .map(|(_, prefix)| prefix.clone())
        .unwrap_or_else(|| DEFAULT_TYPE_PREFIX.to_string())
}

/// Lowercase the input, turn every run of non-alphanumerics into a single
/// hyphen, and truncate without leaving a trailing hyphen.
fn slugify(input: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.len() > max_len {
        slug.truncate(max_len);
    }
    slug.trim_end_matches('-').to_string()
}

// Keeps alphanumerics, '.', '_', '-' and '/'; whitespace becomes a hyphen and
// anything else is dropped. Separator runs collapse and never start or end
// the name, so an empty `{type}` leaves no dangling separator behind.
fn sanitize_ref(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
            Some(ch)
        } else if ch == '/' || ch == '-' {
            Some(ch)
        } else if ch.is_whitespace() {
            Some('-')
        } else {
            None
        };
        let Some(next) = mapped else { continue };
        if (next == '-' && out.ends_with('-')) || (next == '/' && out.ends_with('/')) {
            continue;
        }
        out.push(next);
    }

    while out.contains("..") {
        out = out.replace("..", ".");
    }
    while out.contains("-/") {
        out = out.replace("-/", "/");
    }
    while out.contains("/-") {
        out = out.replace("/-", "/");
    }
    while out.contains("//") {
        out = out.replace("//", "/");
    }
    out.trim_matches(['-', '/', '.']).to_string()
}
