//! Terminal and JSON renderings of an [`Analysis`].

use crate::model::{Analysis, RepositorySummary};
use chrono::{DateTime, Utc};

const BAR_MAX_WIDTH: usize = 40;

/// `updated_at` as a calendar date, or the raw value if it does not parse.
pub fn updated_date(repo: &RepositorySummary) -> String {
    DateTime::parse_from_rfc3339(&repo.updated_at)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| repo.updated_at.clone())
}

fn bar(count: u32, max: u32) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = (count as usize * BAR_MAX_WIDTH).div_ceil(max as usize);
    "█".repeat(width.max(1))
}

pub fn render_text(analysis: &Analysis) -> String {
    let mut out = String::new();

    out.push_str(&format!("GitHub profile: {}\n", analysis.username));
    out.push_str(&format!("{}\n", "=".repeat(50)));

    out.push_str(&format!("\nRepositories ({})\n", analysis.repositories.len()));
    if analysis.repositories.is_empty() {
        out.push_str("  (none)\n");
    }
    for repo in &analysis.repositories {
        out.push_str(&format!(
            "  {}  ★ {} | forks {} | updated {}\n    {}\n",
            repo.name,
            repo.stargazers_count,
            repo.forks_count,
            updated_date(repo),
            repo.html_url
        ));
    }

    if !analysis.failed_repos.is_empty() {
        out.push_str(&format!(
            "\nCommit history unavailable for: {}\n",
            analysis.failed_repos.join(", ")
        ));
    }

    out.push_str(&format!(
        "\nDaily commits ({} total across {} repositories)\n",
        analysis.total_commits(),
        analysis.analyzed_repos.len()
    ));
    if analysis.daily_commits.is_empty() {
        out.push_str("  (no commit activity)\n");
    }

    let max = analysis
        .daily_commits
        .iter()
        .map(|d| d.count)
        .max()
        .unwrap_or(0);
    for d in &analysis.daily_commits {
        out.push_str(&format!(
            "  {} {:>4} {}\n",
            d.date.format("%Y-%m-%d"),
            d.count,
            bar(d.count, max)
        ));
    }

    out
}

pub fn render_json(analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}
