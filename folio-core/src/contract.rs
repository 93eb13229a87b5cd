//! # contract: GitHub data and the fetch seam
//!
//! Records returned by the public GitHub REST API and the [`ActivitySource`]
//! trait that supplies them to the dashboard. The trait is the only
//! asynchronous boundary in the crate: [`crate::github::GitHubClient`]
//! implements it over HTTP, tests use the generated `MockActivitySource`.
//!
//! Optional or malformed fields are defaulted during deserialisation wherever
//! the aggregator has a sensible default, so one odd record never fails a whole
//! response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mockall::automock;

/// Account metadata from `/users/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

/// One entry of `/users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    /// Primary language as detected by GitHub; absent for empty or docs-only repos.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepoSummary {
    pub fn new(id: u64, name: &str, language: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            language: language.map(str::to_string),
            stargazers_count: 0,
            description: None,
            html_url: String::new(),
            updated_at: None,
        }
    }
}

/// Event type tag. Types the dashboard does not distinguish map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "PushEvent")]
    Push,
    #[serde(rename = "PullRequestEvent")]
    PullRequest,
    #[serde(rename = "WatchEvent")]
    Watch,
    #[serde(rename = "CreateEvent")]
    Create,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One entry of `/users/{username}/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub repo: EventRepo,
    /// Free-form; only `size` of push events is read.
    #[serde(default)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Read-only supplier of the dashboard's inputs.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Account metadata.
    async fn fetch_profile(&self) -> Result<GitHubUser, FetchError>;

    /// Most recently updated repositories, one bounded page.
    async fn fetch_repos(&self) -> Result<Vec<RepoSummary>, FetchError>;

    /// Most recent public events, newest first, one bounded page.
    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError>;
}
