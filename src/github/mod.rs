// src/github/mod.rs
// =============================================================================
// This module is everything that talks about GitHub:
// - Recognizing commit URLs and pulling out owner/repo/sha (commit_url.rs)
// - The normalized CommitData record (models.rs)
// - Fetching a commit from the REST API (fetch.rs)
// =============================================================================

mod commit_url;
mod fetch;
mod models;

pub use commit_url::{is_commit_url, parse_commit_url, InvalidUrl, ParsedUrlRef};
pub use fetch::{ClientError, CommitFetcher, CommitSource, FetchError, GITHUB_ACCEPT};
pub use models::{
    abbreviate_sha, CommitAuthor, CommitData, CommitStats, MalformedResponse, SHORT_SHA_LEN,
};
