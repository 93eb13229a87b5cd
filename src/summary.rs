//! Terminal rendering of a [`Dashboard`].

use folio_core::activity::CommitRanking;
use folio_core::dashboard::Dashboard;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn bar(value: f64, max: f64) -> String {
    let filled = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "#".repeat(filled.min(BAR_WIDTH))
}

pub fn render_summary(dashboard: &Dashboard) -> String {
    let o = &dashboard.overview;
    let mut out = String::new();

    let _ = writeln!(out, "{}", o.name.as_deref().unwrap_or(&o.login));
    let _ = writeln!(out, "@{}", o.login);
    if let Some(bio) = o.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        let _ = writeln!(out, "{bio}");
    }
    if let Some(location) = o.location.as_deref() {
        let _ = writeln!(out, "{location}");
    }
    let _ = writeln!(
        out,
        "{} repos | {} followers | {} gists | since {}",
        o.public_repos, o.followers, o.public_gists, o.member_since
    );

    out.push_str("\nTop languages\n");
    if dashboard.languages.is_empty() {
        out.push_str("  (none)\n");
    }
    for lang in &dashboard.languages {
        let _ = writeln!(
            out,
            "  {:<16} {:>5.1}% {}",
            lang.name,
            lang.percent,
            bar(lang.percent, 100.0)
        );
    }

    out.push_str("\nCommits by repository\n");
    match &dashboard.commits {
        CommitRanking::NoRecentActivity => out.push_str("  No recent activity\n"),
        CommitRanking::Ranked(repos) => {
            let max = dashboard.commits.max_count() as f64;
            for repo in repos {
                let _ = writeln!(
                    out,
                    "  {:<16} {:>4} {}",
                    repo.name,
                    repo.count,
                    bar(repo.count as f64, max)
                );
            }
        }
    }

    out.push_str("\nFocus\n");
    for point in &dashboard.radar {
        let _ = writeln!(
            out,
            "  {:<16} {:>4} {}",
            point.category.label(),
            point.value,
            bar(point.value as f64, 100.0)
        );
    }

    out.push_str("\nActivity\n");
    let _ = writeln!(out, "  {}", dashboard.intensity.sparkline());

    out.push_str("\nRecent events\n");
    for entry in &dashboard.feed {
        let _ = writeln!(out, "  {} {}", entry.at.format("%Y-%m-%d"), entry.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use folio_core::contract::{GitHubUser, RepoSummary};
    use folio_core::dashboard::build_dashboard;

    #[test]
    fn summary_shows_empty_states() {
        let user = GitHubUser {
            login: "octocat".to_string(),
            avatar_url: String::new(),
            html_url: String::new(),
            name: None,
            location: None,
            bio: None,
            public_repos: 1,
            public_gists: 0,
            followers: 3,
            following: 0,
            created_at: Utc.with_ymd_and_hms(2015, 2, 3, 0, 0, 0).unwrap(),
        };
        let repos = vec![RepoSummary::new(1, "site", Some("TypeScript"))];

        let text = render_summary(&build_dashboard(&user, &repos, &[], 5));

        assert!(text.starts_with("octocat\n@octocat\n"));
        assert!(text.contains("1 repos | 3 followers | 0 gists | since 2015"));
        assert!(text.contains("TypeScript"));
        assert!(text.contains("No recent activity"));
        assert!(text.contains("Frontend"));
    }
}
