use crate::github::DEFAULT_API_URL;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "gh-profile-analyzer")]
#[command(about = "Summarize a GitHub user's repositories and recent daily commit activity")]
#[command(version)]
pub struct Cli {
    /// GitHub usernames to analyze. Read from stdin, one per line, when omitted
    pub usernames: Vec<String>,

    /// Personal access token; requests are anonymous without one
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write dark and light SVG commit charts into this directory
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "gh-profile-analyzer",
            "octocat",
            "torvalds",
            "--format",
            "json",
            "--api-url",
            "http://localhost:8080",
            "--svg-dir",
            "charts",
        ])
        .unwrap();

        assert_eq!(cli.usernames, vec!["octocat", "torvalds"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_url, "http://localhost:8080");
        assert_eq!(cli.svg_dir, Some(PathBuf::from("charts")));
    }
}
