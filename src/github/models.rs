// src/github/models.rs
// =============================================================================
// The normalized commit record and the code that builds it from the raw
// GitHub API response.
//
// The response is read as an untyped serde_json::Value and checked field by
// field. A CommitData only exists once every required field was found, so
// nothing downstream ever sees a half-filled record.
//
// Fallbacks:
// - author.login: the GitHub account login, else the raw git author name
// - author.avatar_url: empty string when the commit has no GitHub account
// - stats: {0, 0} when the API leaves them out (large diffs)
// =============================================================================

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::commit_url::ParsedUrlRef;

/// Length of the abbreviated sha shown on cards.
pub const SHORT_SHA_LEN: usize = 7;

/// A success-status body that is not usable commit JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed commit response: {0}")]
pub struct MalformedResponse(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAuthor {
    pub login: String,
    /// Empty when no avatar is available.
    pub avatar_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
}

/// Everything a commit card needs, normalized from one API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitData {
    pub sha: String,
    /// Raw commit message, possibly multi-line Markdown.
    pub message: String,
    pub author: CommitAuthor,
    /// ISO-8601 authorship time.
    pub date: String,
    pub stats: CommitStats,
    /// Canonical web URL as returned by the API.
    pub url: String,
    pub owner: String,
    pub repo: String,
}

impl CommitData {
    /// Builds a commit record from a `GET /repos/{owner}/{repo}/commits/{sha}`
    /// response body.
    ///
    /// `owner` and `repo` come from the pasted URL, never from the response.
    pub fn from_api_response(
        reference: &ParsedUrlRef,
        body: &Value,
    ) -> Result<Self, MalformedResponse> {
        let sha = required_str(body, &["sha"])?;
        if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MalformedResponse(format!("`sha` is not hexadecimal: {}", sha)));
        }

        let message = required_str(body, &["commit", "message"])?;
        let date = required_str(body, &["commit", "author", "date"])?;
        let url = required_str(body, &["html_url"])?;

        // `author` is null when the commit email is not tied to an account
        let login = optional_str(body, &["author", "login"])
            .or_else(|| optional_str(body, &["commit", "author", "name"]))
            .ok_or_else(|| {
                MalformedResponse("neither `author.login` nor `commit.author.name` present".into())
            })?;
        let avatar_url = optional_str(body, &["author", "avatar_url"]).unwrap_or_default();

        let stats = CommitStats {
            additions: lookup(body, &["stats", "additions"])
                .and_then(Value::as_u64)
                .unwrap_or(0),
            deletions: lookup(body, &["stats", "deletions"])
                .and_then(Value::as_u64)
                .unwrap_or(0),
        };

        Ok(CommitData {
            sha: sha.to_ascii_lowercase(),
            message: message.to_string(),
            author: CommitAuthor {
                login: login.to_string(),
                avatar_url: avatar_url.to_string(),
            },
            date: date.to_string(),
            stats,
            url: url.to_string(),
            owner: reference.owner.clone(),
            repo: reference.repo.clone(),
        })
    }

    pub fn short_sha(&self) -> &str {
        abbreviate_sha(&self.sha)
    }
}

/// First seven characters of a sha, or the whole thing if it is shorter.
pub fn abbreviate_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((end, _)) => &sha[..end],
        None => sha,
    }
}

fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |value, key| value.get(key))
}

fn optional_str<'a>(body: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(body, path).and_then(Value::as_str)
}

fn required_str<'a>(body: &'a Value, path: &[&str]) -> Result<&'a str, MalformedResponse> {
    optional_str(body, path)
        .ok_or_else(|| MalformedResponse(format!("missing `{}`", path.join("."))))
}
