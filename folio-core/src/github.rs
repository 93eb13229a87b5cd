//! HTTP implementation of [`ActivitySource`] against the public GitHub REST API.
//!
//! All settings arrive through [`GitHubConfig`] at construction. The client
//! never reads the environment; the CLI injects the optional token.

use crate::contract::{ActivitySource, Event, FetchError, GitHubUser, RepoSummary};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REPOS_PER_PAGE: u32 = 6;
pub const DEFAULT_EVENTS_PER_PAGE: u32 = 10;

#[derive(Clone)]
pub struct GitHubConfig {
    pub api_base: String,
    pub username: String,
    /// Raises the rate limit when set. Never logged.
    pub token: Option<String>,
    pub repos_per_page: u32,
    pub events_per_page: u32,
    /// GitHub rejects requests without a User-Agent.
    pub user_agent: String,
}

impl GitHubConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            username: username.into(),
            token: None,
            repos_per_page: DEFAULT_REPOS_PER_PAGE,
            events_per_page: DEFAULT_EVENTS_PER_PAGE,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base", &self.api_base)
            .field("username", &self.username)
            .field("token_set", &self.token.is_some())
            .field("repos_per_page", &self.repos_per_page)
            .field("events_per_page", &self.events_per_page)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                FetchError::Transport {
                    endpoint: config.api_base.clone(),
                    message: e.to_string(),
                }
            })?;
        info!(
            api_base = %config.api_base,
            username = %config.username,
            token_set = config.token.is_some(),
            "Initialised GitHub client"
        );
        Ok(Self { http, config })
    }

    fn user_url(&self) -> String {
        format!(
            "{}/users/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.username
        )
    }

    pub fn profile_url(&self) -> String {
        self.user_url()
    }

    pub fn repos_url(&self) -> String {
        format!(
            "{}/repos?sort=updated&per_page={}",
            self.user_url(),
            self.config.repos_per_page
        )
    }

    pub fn events_url(&self) -> String {
        format!(
            "{}/events?per_page={}",
            self.user_url(),
            self.config.events_per_page
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: String) -> Result<T, FetchError> {
        debug!(endpoint, url = %url, "Fetching from GitHub");
        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, endpoint, url = %url, "GitHub request failed");
            FetchError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, endpoint, url = %url, "GitHub returned an error status");
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = ?e, endpoint, "Failed to read GitHub response body");
            FetchError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, endpoint, "Failed to decode GitHub response");
            FetchError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ActivitySource for GitHubClient {
    async fn fetch_profile(&self) -> Result<GitHubUser, FetchError> {
        let user: GitHubUser = self.get_json("profile", self.profile_url()).await?;
        info!(login = %user.login, "Fetched GitHub profile");
        Ok(user)
    }

    async fn fetch_repos(&self) -> Result<Vec<RepoSummary>, FetchError> {
        let repos: Vec<RepoSummary> = self.get_json("repos", self.repos_url()).await?;
        info!(count = repos.len(), "Fetched GitHub repositories");
        Ok(repos)
    }

    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError> {
        let events: Vec<Event> = self.get_json("events", self.events_url()).await?;
        info!(count = events.len(), "Fetched GitHub events");
        Ok(events)
    }
}
