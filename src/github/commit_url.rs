// src/github/commit_url.rs
// =============================================================================
// This module recognizes GitHub commit URLs.
//
// Accepted shape (scheme and host are case-insensitive):
//   http(s)://github.com/<owner>/<repo>/commit/<sha>
//
// Two entry points:
// - is_commit_url: the strict paste-time gate, the whole (trimmed) text must
//   be exactly one commit URL with no extra path, query or fragment
// - parse_commit_url: finds a commit URL anywhere in a string and pulls out
//   {owner, repo, sha}
//
// Both share the same capture groups, so for a well-formed URL they always
// agree on the extracted triple.
// =============================================================================

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

// Owner and repo stop at '/', '?', '#' and whitespace so a query string or
// fragment can never hide inside a path segment.
static STRICT_COMMIT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?://github\.com)/([^/?#\s]+)/([^/?#\s]+)/commit/([a-f0-9]+)$")
        .expect("invalid regex")
});

static EMBEDDED_COMMIT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:https?://github\.com)/([^/?#\s]+)/([^/?#\s]+)/commit/([a-f0-9]+)")
        .expect("invalid regex")
});

/// The pieces of a commit URL needed to ask the API about it.
///
/// Only ever built from text that matched the commit URL pattern, so all
/// three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrlRef {
    pub owner: String,
    pub repo: String,
    pub sha: String,
}

impl fmt::Display for ParsedUrlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.sha)
    }
}

/// Text that is not exactly a GitHub commit URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a GitHub commit URL: {0}")]
pub struct InvalidUrl(pub String);

impl FromStr for ParsedUrlRef {
    type Err = InvalidUrl;

    // Parsing through FromStr uses the strict gate, not the permissive search.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STRICT_COMMIT_URL
            .captures(s.trim())
            .map(|caps| captures_to_ref(&caps))
            .ok_or_else(|| InvalidUrl(s.to_string()))
    }
}

/// Returns true when the trimmed text is exactly one GitHub commit URL.
pub fn is_commit_url(text: &str) -> bool {
    STRICT_COMMIT_URL.is_match(text.trim())
}

/// Extracts {owner, repo, sha} from the first commit URL found in `text`.
///
/// Meant for text already known to contain a commit URL; surrounding text is
/// ignored.
pub fn parse_commit_url(text: &str) -> Option<ParsedUrlRef> {
    EMBEDDED_COMMIT_URL
        .captures(text)
        .map(|caps| captures_to_ref(&caps))
}

fn captures_to_ref(caps: &regex::Captures<'_>) -> ParsedUrlRef {
    ParsedUrlRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
        sha: caps[3].to_string(),
    }
}
