//! # activity: statistics derived from a GitHub account's repos and events
//!
//! Every function here is a pure, single-pass transformation. None of them
//! fail: missing languages, missing push sizes and empty inputs all have an
//! explicit default or empty-state result.
//!
//! - [`top_languages`]: language histogram with percentage shares
//! - [`top_commit_repos`]: repositories ranked by pushed commits
//! - [`category_radar`]: five-category focus radar
//! - [`intensity_series`]: chronological activity signal for charting
//! - [`describe_event`], [`profile_overview`]: activity feed lines and headline counts

use crate::contract::{Event, EventKind, GitHubUser, RepoSummary};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub count: usize,
    /// Share of all repositories that have a language, 0..=100.
    pub percent: f64,
}

/// Counts repositories per language and returns the `n` most common.
///
/// Repositories without a language are left out of both the counts and the
/// denominator of `percent`. Ties keep first-encountered order.
pub fn top_languages(repos: &[RepoSummary], n: usize) -> Vec<LanguageShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        let Some(language) = repo.language.as_deref().filter(|l| !l.trim().is_empty()) else {
            continue;
        };
        match index.get(language) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(language, counts.len());
                counts.push((language.to_string(), 1));
            }
        }
    }
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    // sort_by is stable, which keeps ties in encounter order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(name, count)| LanguageShare {
            name,
            count,
            percent: count as f64 / total as f64 * 100.0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoCommits {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "repos", rename_all = "snake_case")]
pub enum CommitRanking {
    /// No push events in the window.
    NoRecentActivity,
    Ranked(Vec<RepoCommits>),
}

impl CommitRanking {
    pub fn entries(&self) -> &[RepoCommits] {
        match self {
            CommitRanking::NoRecentActivity => &[],
            CommitRanking::Ranked(entries) => entries,
        }
    }

    pub fn max_count(&self) -> u64 {
        self.entries().iter().map(|r| r.count).max().unwrap_or(0)
    }
}

/// Ranks repositories by commits pushed, summing each push event's size.
pub fn top_commit_repos(events: &[Event], n: usize) -> CommitRanking {
    let mut totals: Vec<RepoCommits> = Vec::new();
    for event in events.iter().filter(|e| e.kind == EventKind::Push) {
        let name = short_repo_name(&event.repo.name);
        let commits = push_size(event);
        match totals.iter_mut().find(|r| r.name == name) {
            Some(entry) => entry.count += commits,
            None => totals.push(RepoCommits {
                name: name.to_string(),
                count: commits,
            }),
        }
    }
    if totals.is_empty() {
        return CommitRanking::NoRecentActivity;
    }
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals.truncate(n);
    CommitRanking::Ranked(totals)
}

/// Repository part of `owner/name`; the raw name when there is no owner
/// prefix, `unknown` when the name is empty.
pub fn short_repo_name(full_name: &str) -> &str {
    match full_name.split('/').nth(1) {
        Some(short) if !short.is_empty() => short,
        _ if !full_name.is_empty() => full_name,
        _ => "unknown",
    }
}

/// Commits in a push event. Missing, zero or non-numeric sizes count as one.
pub fn push_size(event: &Event) -> u64 {
    event
        .payload
        .get("size")
        .and_then(serde_json::Value::as_u64)
        .filter(|&size| size > 0)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Frontend,
    Backend,
    Data,
    Mobile,
    DevOps,
}

impl Category {
    /// Radar and JSON output order. Fixed regardless of which categories have activity.
    pub const ALL: [Category; 5] = [
        Category::Frontend,
        Category::Backend,
        Category::Data,
        Category::Mobile,
        Category::DevOps,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Frontend => "Frontend",
            Category::Backend => "Backend",
            Category::Data => "Data",
            Category::Mobile => "Mobile",
            Category::DevOps => "DevOps",
        }
    }
}

/// Static language table. Anything unlisted is backend work.
pub fn classify_language(language: &str) -> Category {
    match language {
        "TypeScript" | "JavaScript" | "HTML" | "CSS" | "Vue" | "React" => Category::Frontend,
        "Python" | "Jupyter Notebook" | "R" => Category::Data,
        "Swift" | "Kotlin" | "Dart" => Category::Mobile,
        "Shell" | "Dockerfile" => Category::DevOps,
        _ => Category::Backend,
    }
}

/// Radar value shown for every category when there are no repositories.
pub const RADAR_PLACEHOLDER: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub category: Category,
    /// 0..=100, relative to the busiest category.
    pub value: u32,
}

/// Per-category repository counts normalised to the largest category.
pub fn category_radar(repos: &[RepoSummary]) -> Vec<RadarPoint> {
    if repos.is_empty() {
        return Category::ALL
            .iter()
            .map(|&category| RadarPoint {
                category,
                value: RADAR_PLACEHOLDER,
            })
            .collect();
    }
    let mut counts = [0u32; 5];
    for language in repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.trim().is_empty())
    {
        let category = classify_language(language);
        counts[category as usize] += 1;
    }
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    Category::ALL
        .iter()
        .map(|&category| RadarPoint {
            category,
            value: (counts[category as usize] as f64 / max as f64 * 100.0).round() as u32,
        })
        .collect()
}

pub const INTENSITY_FLOOR: f64 = 5.0;
pub const INTENSITY_CEILING: f64 = 15.0;
/// Signal value that maps to the top edge of the chart.
const CHART_FULL_SCALE: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensitySample {
    pub index: usize,
    pub kind: EventKind,
    pub at: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntensitySeries {
    pub samples: Vec<IntensitySample>,
}

impl IntensitySeries {
    /// Samples as `(x, y)` points in a `width` by `height` box with y pointing
    /// down, spread evenly along x.
    pub fn chart_points(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        let span = self.samples.len().saturating_sub(1).max(1) as f64;
        self.samples
            .iter()
            .map(|s| {
                let x = s.index as f64 / span * width;
                let y = height - s.value * height / CHART_FULL_SCALE;
                (x, y)
            })
            .collect()
    }

    /// One block character per sample, for terminal output.
    pub fn sparkline(&self) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        self.samples
            .iter()
            .map(|s| {
                let t = (s.value - INTENSITY_FLOOR) / (INTENSITY_CEILING - INTENSITY_FLOOR);
                BARS[(t.clamp(0.0, 1.0) * 7.0).round() as usize]
            })
            .collect()
    }
}

/// How much an event counts towards the activity signal.
fn event_weight(event: &Event) -> f64 {
    match event.kind {
        EventKind::Push => 2.0 + push_size(event).min(8) as f64,
        EventKind::PullRequest => 6.0,
        EventKind::Create => 4.0,
        EventKind::Watch => 1.0,
        EventKind::Other => 2.0,
    }
}

/// Oldest-first activity samples, each a deterministic function of the
/// event's type and size.
pub fn intensity_series(events: &[Event]) -> IntensitySeries {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|e| e.created_at);
    let samples = ordered
        .into_iter()
        .enumerate()
        .map(|(index, event)| IntensitySample {
            index,
            kind: event.kind,
            at: event.created_at,
            value: (INTENSITY_FLOOR + event_weight(event)).clamp(INTENSITY_FLOOR, INTENSITY_CEILING),
        })
        .collect();
    IntensitySeries { samples }
}

/// One line of the activity feed.
pub fn describe_event(event: &Event) -> String {
    let repo = &event.repo.name;
    match event.kind {
        EventKind::Push => format!("Pushed to {}", short_repo_name(repo)),
        EventKind::PullRequest => format!("Opened PR in {repo}"),
        EventKind::Watch => format!("Starred {repo}"),
        EventKind::Create => format!("Created {repo}"),
        EventKind::Other => format!("Activity in {repo}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOverview {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub public_gists: u32,
    pub member_since: i32,
}

pub fn profile_overview(user: &GitHubUser) -> ProfileOverview {
    ProfileOverview {
        login: user.login.clone(),
        name: user.name.clone(),
        bio: user.bio.clone(),
        location: user.location.clone(),
        public_repos: user.public_repos,
        followers: user.followers,
        public_gists: user.public_gists,
        member_since: user.created_at.year(),
    }
}
