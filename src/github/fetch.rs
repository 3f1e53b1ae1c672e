// src/github/fetch.rs
// =============================================================================
// This module fetches one commit from the GitHub REST API.
//
// Strategy:
// - Build https://api.github.com/repos/{owner}/{repo}/commits/{sha}
// - Send a single GET with the v3 JSON Accept header (no retries)
// - Translate every failure into one of three FetchError variants:
//     Network   the request never completed (DNS, timeout, reset)
//     Api       the API answered with a non-2xx status
//     Malformed a 2xx body that is not JSON or lacks required fields
// - Hand the JSON to CommitData::from_api_response for normalization
//
// The fetcher sits behind the CommitSource trait so the embed flow can be
// driven by a fake in tests.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace, warn};
use url::Url;

use super::commit_url::ParsedUrlRef;
use super::models::{CommitData, MalformedResponse};
use crate::config::Config;

/// Versioned JSON media type for the commits endpoint.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Why a commit could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport layer could not complete the request.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a status outside 200-299.
    #[error("GitHub API error: HTTP {status}")]
    Api { status: u16 },

    /// A success response whose body is unusable.
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl FetchError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors building a [`CommitFetcher`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),

    #[error("building HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything that can turn a parsed commit URL into commit data.
#[async_trait]
pub trait CommitSource: Send + Sync {
    async fn fetch(&self, reference: &ParsedUrlRef) -> Result<CommitData, FetchError>;
}

/// [`CommitSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct CommitFetcher {
    client: Client,
    api_base_url: Url,
}

impl CommitFetcher {
    /// Fetcher against api.github.com with default settings.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self, ClientError> {
        let api_base_url = Url::parse(&config.api_base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(config.api_base_url.clone()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_base_url,
        })
    }

    /// The commits endpoint for one reference. Path segments are
    /// percent-encoded.
    pub fn endpoint(&self, reference: &ParsedUrlRef) -> Url {
        let mut url = self.api_base_url.clone();
        // with_config only accepts base URLs that have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "repos",
                reference.owner.as_str(),
                reference.repo.as_str(),
                "commits",
                reference.sha.as_str(),
            ]);
        }
        url
    }
}

#[async_trait]
impl CommitSource for CommitFetcher {
    #[tracing::instrument(skip_all, fields(commit = %reference))]
    async fn fetch(&self, reference: &ParsedUrlRef) -> Result<CommitData, FetchError> {
        let url = self.endpoint(reference);
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| {
                warn!(timeout = e.is_timeout(), connect = e.is_connect(), "request failed: {}", e);
                FetchError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "GitHub API error");
            return Err(FetchError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::Network)?;
        trace!(bytes = body.len(), "received commit response");

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| MalformedResponse(format!("invalid JSON: {}", e)))?;

        Ok(CommitData::from_api_response(reference, &json)?)
    }
}
