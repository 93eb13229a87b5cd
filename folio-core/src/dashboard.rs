//! Dashboard assembly: fetch the three GitHub resources concurrently, then
//! aggregate them.
//!
//! A failed fetch fails the whole load with that one [`FetchError`]; no
//! partial dashboard is built and nothing is retried.

use crate::activity::{
    category_radar, describe_event, intensity_series, profile_overview, top_commit_repos,
    top_languages, CommitRanking, IntensitySeries, LanguageShare, ProfileOverview, RadarPoint,
};
use crate::contract::{ActivitySource, Event, FetchError, GitHubUser, RepoSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

/// Default size of the language and commit rankings.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub overview: ProfileOverview,
    pub languages: Vec<LanguageShare>,
    pub commits: CommitRanking,
    pub radar: Vec<RadarPoint>,
    pub intensity: IntensitySeries,
    pub feed: Vec<FeedEntry>,
}

/// Builds the dashboard from already fetched data.
pub fn build_dashboard(
    user: &GitHubUser,
    repos: &[RepoSummary],
    events: &[Event],
    top_n: usize,
) -> Dashboard {
    Dashboard {
        overview: profile_overview(user),
        languages: top_languages(repos, top_n),
        commits: top_commit_repos(events, top_n),
        radar: category_radar(repos),
        intensity: intensity_series(events),
        feed: events
            .iter()
            .map(|e| FeedEntry {
                message: describe_event(e),
                at: e.created_at,
            })
            .collect(),
    }
}

/// Fetches profile, repositories and events jointly, then aggregates.
pub async fn load_dashboard<S>(source: &S, top_n: usize) -> Result<Dashboard, FetchError>
where
    S: ActivitySource + ?Sized,
{
    info!("Loading dashboard data");
    let (user, repos, events) = futures::try_join!(
        source.fetch_profile(),
        source.fetch_repos(),
        source.fetch_events()
    )
    .map_err(|e| {
        error!(error = %e, "Failed to load dashboard data");
        e
    })?;

    let dashboard = build_dashboard(&user, &repos, &events, top_n);
    info!(
        login = %dashboard.overview.login,
        repos = repos.len(),
        events = events.len(),
        languages = dashboard.languages.len(),
        "Dashboard assembled"
    );
    Ok(dashboard)
}
