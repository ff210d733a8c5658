use anyhow::{Context, Result};
use clap::Parser;
use gh_profile_analyzer::cli::{Cli, OutputFormat};
use gh_profile_analyzer::github::GithubClient;
use gh_profile_analyzer::query::{QueryState, Session};
use gh_profile_analyzer::{report, svg};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = GithubClient::new(&cli.api_url, cli.token.clone())
        .context("Failed to build GitHub client")?;
    let mut session = Session::new();

    if cli.usernames.is_empty() {
        return interactive(&cli, &client, &mut session).await;
    }

    let mut failed = 0usize;
    for username in &cli.usernames {
        let state = session.submit(&client, username).await;
        if !show(&cli, state)? {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} queries failed", cli.usernames.len());
    }
    Ok(())
}

/// Prompt for usernames on stdin until EOF.
async fn interactive(cli: &Cli, client: &GithubClient, session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("Enter GitHub username: ");
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let state = session.submit(client, &line).await;
        show(cli, state)?;
    }

    Ok(())
}

/// Print a finished query. Returns whether it succeeded.
fn show(cli: &Cli, state: &QueryState) -> Result<bool> {
    match state {
        QueryState::Ready(analysis) => {
            match cli.format {
                OutputFormat::Text => println!("{}", report::render_text(analysis)),
                OutputFormat::Json => println!(
                    "{}",
                    report::render_json(analysis).context("Failed to serialize analysis")?
                ),
            }

            if let Some(dir) = &cli.svg_dir {
                let written = svg::write_charts(dir, analysis)
                    .with_context(|| format!("Failed to write charts into {}", dir.display()))?;
                for path in written {
                    info!(path = %path.display(), "wrote chart");
                }
            }
            Ok(true)
        }
        QueryState::Failed { username, error } => {
            error!(%username, %error, "query failed");
            Ok(false)
        }
        QueryState::Idle | QueryState::Loading { .. } => Ok(false),
    }
}
